use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    #[error("No starting node found")]
    NoStartNode,

    #[error("Node not found: {0}")]
    UnknownNode(String),
}

pub type PreviewResult<T> = Result<T, PreviewError>;
