use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("virtual path must not be empty")]
    EmptyPath,
}

/// Convenience alias for type results.
pub type TypeResult<T> = Result<T, TypeError>;
