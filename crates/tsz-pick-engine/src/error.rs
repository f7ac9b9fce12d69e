use std::path::PathBuf;

/// Why a query produced no answer.
///
/// A query either yields a complete record or exactly one of these; nothing
/// is retried and no partial record is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum PickError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("could not resolve project: {0}")]
    ProjectResolution(String),

    #[error("could not build program: {0}")]
    OracleConstruction(String),
}

impl PickError {
    pub(crate) fn invalid_query(message: impl Into<String>) -> Self {
        PickError::InvalidQuery(message.into())
    }
}

pub type Result<T> = std::result::Result<T, PickError>;
