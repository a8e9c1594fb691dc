use std::sync::Arc;

use car_inventory_api::infra::{config::Settings, observability};
use car_inventory_api::{transport, DatabaseService};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    observability::init();

    let settings = Settings::from_env()?;

    tracing::info!(db_name = %settings.db_name, "initializing DatabaseService");
    let db = Arc::new(DatabaseService::connect(&settings).await?);

    let app_state = transport::http::AppState { db: db.clone() };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&settings.listen_addr).await?;
    tracing::info!(addr = %settings.listen_addr, "API server listening");
    tracing::info!("Swagger UI available at /swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    db.shutdown().await;
    tracing::info!("database connection closed, exiting");

    Ok(())
}
