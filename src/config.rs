use std::{env, str::FromStr};

use tracing::Level;

use crate::errors::ConfigError;

pub const DEFAULT_CART_API_BASE_URL: &str = "http://localhost:9999";
pub const DEFAULT_AXUM_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub cart_api_base_url: String,
    pub axum_port: u16,
    pub log_path: Option<String>,
    pub log_level: Level,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        Ok(AppConfig {
            cart_api_base_url: lookup("CART_API_BASE_URL")
                .unwrap_or_else(|| String::from(DEFAULT_CART_API_BASE_URL)),
            axum_port: parse_or("AXUM_PORT", lookup("AXUM_PORT"), DEFAULT_AXUM_PORT)?,
            log_path: lookup("LOG_PATH").filter(|p| !p.is_empty()),
            log_level: parse_or("LOG_LEVEL", lookup("LOG_LEVEL"), Level::DEBUG)?,
        })
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name: name,
            reason: format!("{:?}: {}", value, e),
        }),
        None => Ok(default),
    }
}
