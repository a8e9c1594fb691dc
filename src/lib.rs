pub mod app;
pub mod domain;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::database_service::DatabaseService;
pub use domain::car::{CarInput, CarRecord, CarUpdate};
pub use domain::error::{CarStoreError, CarStoreResult, FieldViolation};
pub use infra::config::Settings;
