use crate::domain::car::{CarInput, CarUpdate};
use crate::domain::error::{CarStoreError, CarStoreResult};
use crate::transport::http::types::{
    rejection_to_error, AppState, CarListResponse, CarResponse, ErrorBody, ListParams,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bson::oid::ObjectId;

fn parse_car_id(id: &str) -> CarStoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| CarStoreError::InvalidIdentifier(id.to_string()))
}

#[utoipa::path(
    post,
    path = "/cars",
    request_body = CarInput,
    responses(
        (status = 201, description = "Car created", body = CarResponse),
        (status = 422, description = "Payload failed validation", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn create_car_handler(
    State(state): State<AppState>,
    payload: Result<Json<CarInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CarResponse>), CarStoreError> {
    let Json(input) = payload.map_err(rejection_to_error)?;
    let record = state.db.insert_car(input).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

#[utoipa::path(
    get,
    path = "/cars/{id}",
    params(
        ("id" = String, Path, description = "Car identifier (hex ObjectId)")
    ),
    responses(
        (status = 200, description = "The requested car", body = CarResponse),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "No car with this identifier", body = ErrorBody)
    )
)]
pub async fn show_car_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CarResponse>, CarStoreError> {
    let id = parse_car_id(&id)?;
    let record = state.db.find_car(id).await?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    get,
    path = "/cars",
    params(
        ("page" = Option<u64>, Query, description = "1-based page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 10, capped at 100)")
    ),
    responses(
        (status = 200, description = "One page of cars, sorted by brand", body = CarListResponse),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn list_cars_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<CarListResponse>, CarStoreError> {
    let page = params.page();
    let limit = params.limit();

    let (records, has_more) = state.db.list_cars(page, limit).await?;
    Ok(Json(CarListResponse {
        cars: records.into_iter().map(CarResponse::from).collect(),
        page,
        has_more,
    }))
}

#[utoipa::path(
    put,
    path = "/cars/{id}",
    params(
        ("id" = String, Path, description = "Car identifier (hex ObjectId)")
    ),
    request_body = CarUpdate,
    responses(
        (status = 200, description = "The car after the merge", body = CarResponse),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "No car with this identifier", body = ErrorBody),
        (status = 422, description = "A supplied field failed validation", body = ErrorBody)
    )
)]
pub async fn update_car_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CarUpdate>, JsonRejection>,
) -> Result<Json<CarResponse>, CarStoreError> {
    let id = parse_car_id(&id)?;
    let Json(update) = payload.map_err(rejection_to_error)?;
    let update = update.validated()?;

    let record = state.db.update_car(id, &update).await?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    delete,
    path = "/cars/{id}",
    params(
        ("id" = String, Path, description = "Car identifier (hex ObjectId)")
    ),
    responses(
        (status = 204, description = "Car removed"),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "No car with this identifier", body = ErrorBody)
    )
)]
pub async fn delete_car_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CarStoreError> {
    let id = parse_car_id(&id)?;
    state.db.delete_car(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
