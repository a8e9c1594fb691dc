use crate::app::database_service::DatabaseService;
use crate::domain::car::CarRecord;
use crate::domain::error::{CarStoreError, FieldViolation};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Default page size for the list endpoint.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;
/// Hard cap on the page size; larger requests are clamped, not rejected.
pub const MAX_PAGE_LIMIT: i64 = 100;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseService>,
}

/// Pagination query parameters for the list endpoint.
///
/// Zero/negative values are clamped to sane ones rather than rejected so the
/// endpoint never errors on nonsensical but harmless input.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub page: Option<u64>,
    pub limit: Option<i64>,
}

impl ListParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT)
    }
}

/// A car as serialized in API responses, identifier rendered as a hex string.
#[derive(Debug, Serialize, ToSchema)]
pub struct CarResponse {
    pub id: String,
    pub brand: String,
    pub make: String,
    pub year: i32,
    pub cm3: i32,
    pub km: i32,
    pub price: i32,
}

impl From<CarRecord> for CarResponse {
    fn from(record: CarRecord) -> Self {
        Self {
            id: record.id.to_hex(),
            brand: record.brand,
            make: record.make,
            year: record.year,
            cm3: record.cm3,
            km: record.km,
            price: record.price,
        }
    }
}

/// One page of cars plus navigation metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct CarListResponse {
    pub cars: Vec<CarResponse>,
    pub page: u64,
    pub has_more: bool,
}

/// Uniform JSON error envelope for every failure response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

impl IntoResponse for CarStoreError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            CarStoreError::Validation(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "car payload failed validation".to_string(),
                Some(violations),
            ),
            CarStoreError::InvalidIdentifier(id) => (
                StatusCode::BAD_REQUEST,
                "invalid_identifier",
                format!("malformed car id {id}"),
                None,
            ),
            CarStoreError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("car with id {id} not found"),
                None,
            ),
            CarStoreError::Database(err) => {
                tracing::error!(error = %err, "database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                error: code.to_string(),
                message,
                details,
            }),
        )
            .into_response()
    }
}

/// Maps a malformed/mistyped JSON body onto the validation taxonomy (422),
/// carrying the rejection text as a `body` violation.
pub fn rejection_to_error(err: JsonRejection) -> CarStoreError {
    CarStoreError::Validation(vec![FieldViolation::new("body", err.body_text())])
}
