use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForestError {
    #[error("key not found")]
    KeyNotFound,
    #[error("tree invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, ForestError>;
