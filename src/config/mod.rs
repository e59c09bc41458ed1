//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BOOK_AGORA` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use book_agora::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod analysis;
mod auth;
mod catalog;
mod database;
mod debate;
mod error;
mod server;

pub use analysis::AnalysisConfig;
pub use auth::AuthConfig;
pub use catalog::CatalogConfig;
pub use database::DatabaseConfig;
pub use debate::DebateConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the Book Agora service.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Authentication configuration (JWT verification)
    pub auth: AuthConfig,

    /// Analysis provider configuration (OpenAI-compatible endpoint)
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Book catalog configuration (external lookup service)
    pub catalog: CatalogConfig,

    /// Debate scheduling configuration
    #[serde(default)]
    pub debate: DebateConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BOOK_AGORA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BOOK_AGORA__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BOOK_AGORA__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BOOK_AGORA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - URL formats
    /// - Pool size constraints
    /// - Debate timing bounds
    /// - Production-specific requirements (e.g., HTTPS, secret length)
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.analysis.validate()?;
        self.catalog.validate(&self.server.environment)?;
        self.debate.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("BOOK_AGORA__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("BOOK_AGORA__AUTH__JWT_SECRET", "test-secret-for-local-development");
        env::set_var("BOOK_AGORA__ANALYSIS__API_KEY", "sk-xxx");
        env::set_var("BOOK_AGORA__CATALOG__BASE_URL", "http://localhost:9090");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("BOOK_AGORA__DATABASE__URL");
        env::remove_var("BOOK_AGORA__AUTH__JWT_SECRET");
        env::remove_var("BOOK_AGORA__ANALYSIS__API_KEY");
        env::remove_var("BOOK_AGORA__CATALOG__BASE_URL");
        env::remove_var("BOOK_AGORA__SERVER__PORT");
        env::remove_var("BOOK_AGORA__SERVER__ENVIRONMENT");
        env::remove_var("BOOK_AGORA__DEBATE__DEBATE_WINDOW_HOURS");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.catalog.base_url, "http://localhost:9090");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok());
        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_debate_defaults_match_policy() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        let policy = config.debate.to_policy();
        assert_eq!(policy.min_lead_hours, 24);
        assert_eq!(policy.debate_window_hours, 24);
    }

    #[test]
    fn test_custom_debate_window() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("BOOK_AGORA__DEBATE__DEBATE_WINDOW_HOURS", "48");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.debate.debate_window_hours, 48);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("BOOK_AGORA__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }
}
