use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Product not found")]
    NotFound,
    #[error("{0}")]
    ValidationFailed(String),
    #[error("Infrastructure failure: {0}")]
    Infrastructure(String),
}
