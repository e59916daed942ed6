//! Error types for the editor

use storymate_flowchart::FlowchartError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Flowchart error: {0}")]
    Flowchart(#[from] FlowchartError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Failures reported by a [`crate::FlowchartStore`]
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid flowchart data: {0}")]
    Flowchart(#[from] FlowchartError),

    #[error("Invalid project id: {0:?}")]
    InvalidProjectId(String),

    #[error("Store rejected request: {0}")]
    Rejected(String),
}
