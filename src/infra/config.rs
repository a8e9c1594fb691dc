//! Centralized configuration (environment variables + defaults).
//!
//! Values come from the process environment (a `.env` file is loaded by the
//! entrypoint before this runs). Required settings are checked once at
//! startup; a missing or blank value aborts the boot instead of surfacing
//! later as a connection error.

use thiserror::Error;

const DB_URL: &str = "DB_URL";
const DB_NAME: &str = "DB_NAME";
const LISTEN_ADDR: &str = "LISTEN_ADDR";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),
    #[error("environment variable {0} must not be blank")]
    Blank(&'static str),
}

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// MongoDB connection string (required).
    pub db_url: String,
    /// Database name holding the `cars` collection (required).
    pub db_name: String,
    /// Socket address the HTTP server binds to.
    pub listen_addr: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            db_url: required(DB_URL)?,
            db_name: required(DB_NAME)?,
            listen_addr: std::env::var(LISTEN_ADDR)
                .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string()),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::Blank(name)),
        Ok(value) => Ok(value),
        Err(_) => Err(ConfigError::Missing(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-global, so all cases live in one test
    // to keep them from racing the parallel test runner.
    #[test]
    fn from_env_requires_db_settings() {
        std::env::remove_var(DB_URL);
        std::env::remove_var(DB_NAME);
        std::env::remove_var(LISTEN_ADDR);
        assert!(matches!(
            Settings::from_env(),
            Err(ConfigError::Missing(DB_URL))
        ));

        std::env::set_var(DB_URL, "mongodb://localhost:27017");
        assert!(matches!(
            Settings::from_env(),
            Err(ConfigError::Missing(DB_NAME))
        ));

        std::env::set_var(DB_NAME, "   ");
        assert!(matches!(
            Settings::from_env(),
            Err(ConfigError::Blank(DB_NAME))
        ));

        std::env::set_var(DB_NAME, "carsdb");
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.db_name, "carsdb");
        assert_eq!(settings.listen_addr, DEFAULT_LISTEN_ADDR);

        std::env::remove_var(DB_URL);
        std::env::remove_var(DB_NAME);
    }
}
