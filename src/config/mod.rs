pub mod database;
pub mod server;
pub mod upload;

use anyhow::Result;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

pub use database::DatabaseConfig;
pub use server::ServerConfig;
pub use upload::UploadConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub upload: UploadConfig,
}

impl AppConfig {
    /// Read and validate every setting once at startup.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            upload: UploadConfig::from_env()?,
        })
    }
}

/// Parse an optional variable, failing on a present but malformed value.
pub(crate) fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", name, e)),
        Err(_) => Ok(default),
    }
}

pub(crate) fn env_string(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
