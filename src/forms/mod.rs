//! Request payloads accepted by the storefront API.

use thiserror::Error;
use validator::ValidationErrors;

pub mod leads;
pub mod products;

#[derive(Debug, Error)]
/// Errors that can occur when processing submitted payloads.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid name")]
    InvalidName,

    #[error("invalid price")]
    InvalidPrice,

    #[error("invalid description")]
    InvalidDescription,

    #[error("invalid category")]
    InvalidCategory,

    #[error("invalid image")]
    InvalidImage,

    #[error("username, phone, and country are required")]
    MissingContactDetails,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid status")]
    InvalidStatus,
}
