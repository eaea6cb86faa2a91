//! Failure outcomes of product and option requests.
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Invalid Id provided.")]
    InvalidId,
    #[error("Invalid optionId provided.")]
    InvalidOptionId,
    #[error("Request body is missing or malformed")]
    MissingPayload,
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Not found")]
    NotFound,
    #[error("Product not Found")]
    ProductNotFound,
    #[error("Product Option not Found")]
    ProductOptionNotFound,
    /// The store applied the change set but reported no changed rows
    #[error("{0}")]
    CommitFailed(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type ProductResult<T> = Result<T, ProductError>;
