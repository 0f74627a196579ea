//! Application configuration loaded from environment variables.
//!
//! `AppConfig` is built once at startup and handed to the server state; route
//! handlers and services receive the values they need from there instead of
//! reading the environment themselves.

use std::env;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Endpoints and client credentials for the university OAuth provider.
#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub token_url: String,
    pub profile_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub timeout_secs: u64,
}

/// Represents the complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Session token lifetime. `None` issues tokens without an `exp` claim.
    pub jwt_duration_minutes: Option<u64>,
    pub oauth: OAuthSettings,
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self {
            env: or("APP_ENV", "development"),
            project_name: or("PROJECT_NAME", "cmu-queue"),
            log_level: or("LOG_LEVEL", "api=info,services=info"),
            log_file: or("LOG_FILE", "api.log"),
            log_to_stdout: or("LOG_TO_STDOUT", "false") == "true",
            database_path: required("DATABASE_PATH")?,
            host: or("HOST", "127.0.0.1"),
            port: parse("PORT", &or("PORT", "3000"))?,
            jwt_secret: required("JWT_SECRET_KEY")?,
            jwt_duration_minutes: lookup("JWT_DURATION_MINUTES")
                .filter(|v| !v.trim().is_empty())
                .map(|v| parse("JWT_DURATION_MINUTES", &v))
                .transpose()?,
            oauth: OAuthSettings {
                token_url: required("CMU_OAUTH_GET_TOKEN_URL")?,
                profile_url: required("CMU_OAUTH_GET_BASIC_INFO")?,
                client_id: required("CMU_OAUTH_CLIENT_ID")?,
                client_secret: required("CMU_OAUTH_CLIENT_SECRET")?,
                timeout_secs: parse("OAUTH_TIMEOUT_SECS", &or("OAUTH_TIMEOUT_SECS", "10"))?,
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
