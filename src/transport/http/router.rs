use crate::domain::car::{CarInput, CarUpdate};
use crate::domain::error::FieldViolation;
use crate::transport::http::handlers::{cars, health};
use crate::transport::http::types::{AppState, CarListResponse, CarResponse, ErrorBody};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root_handler,
        health::healthcheck_handler,
        cars::create_car_handler,
        cars::list_cars_handler,
        cars::show_car_handler,
        cars::update_car_handler,
        cars::delete_car_handler
    ),
    components(schemas(
        CarInput,
        CarUpdate,
        CarResponse,
        CarListResponse,
        ErrorBody,
        FieldViolation
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/cars",
            get(cars::list_cars_handler).post(cars::create_car_handler),
        )
        .route(
            "/cars/:id",
            get(cars::show_car_handler)
                .put(cars::update_car_handler)
                .delete(cars::delete_car_handler),
        )
        .with_state(app_state)
}
