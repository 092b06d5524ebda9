use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

pub type Result<T, E = KnowledgeBaseError> = std::result::Result<T, E>;
