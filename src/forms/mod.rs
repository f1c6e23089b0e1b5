//! Payload definitions backing the product write routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod product;

#[derive(Debug, Error)]
/// Errors that can occur when processing submitted product data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid name")]
    InvalidName,

    #[error("invalid category")]
    InvalidCategory,

    #[error("invalid price")]
    InvalidPrice,

    #[error("no fields to update")]
    EmptyUpdate,
}
