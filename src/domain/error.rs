//! Error types and result alias for car store operations.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// A single field-level constraint violation, reported back to the client
/// in the body of a 422 response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldViolation {
    /// Name of the offending field (`"body"` for a malformed request body).
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All failures a car store operation can surface.
///
/// Driver-level failures are wrapped, not retried; the HTTP layer maps each
/// variant onto a status code and a JSON error envelope.
#[derive(Debug, Error)]
pub enum CarStoreError {
    /// One or more fields violate the car schema constraints.
    #[error("car payload failed validation")]
    Validation(Vec<FieldViolation>),
    /// The identifier string is not a well-formed ObjectId.
    #[error("malformed car id {0}")]
    InvalidIdentifier(String),
    /// No document matches the identifier.
    #[error("car with id {0} not found")]
    NotFound(String),
    /// An error bubbled up from the MongoDB driver.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

pub type CarStoreResult<T> = Result<T, CarStoreError>;
