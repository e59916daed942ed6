use thiserror::Error;

pub type FlowchartResult<T> = Result<T, FlowchartError>;

#[derive(Error, Debug)]
pub enum FlowchartError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FlowchartError {
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound(id.into())
    }

    pub fn duplicate_node(id: impl Into<String>) -> Self {
        Self::DuplicateNode(id.into())
    }
}
