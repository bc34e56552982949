use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::env;
use std::time::Duration;

use super::env_or;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => compose_mysql_url()?,
        };

        Ok(Self {
            url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 10)?,
            min_connections: env_or("DB_MIN_CONNECTIONS", 2)?,
        })
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

/// Build a MySQL URL from the discrete `DB_*` variables the hosting panel exports.
fn compose_mysql_url() -> Result<String> {
    let name = env::var("DB_NAME").map_err(|_| {
        anyhow::anyhow!("DATABASE_URL or DB_NAME environment variable must be set")
    })?;
    let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port: u16 = env_or("DB_PORT", 3306)?;
    let user = env::var("DB_USER").unwrap_or_else(|_| "root".to_string());
    let pass = env::var("DB_PASS").unwrap_or_default();

    Ok(mysql_url(&user, &pass, &host, port, &name))
}

fn mysql_url(user: &str, pass: &str, host: &str, port: u16, name: &str) -> String {
    let user = urlencoding::encode(user);
    let credentials = if pass.is_empty() {
        user.into_owned()
    } else {
        format!("{}:{}", user, urlencoding::encode(pass))
    };

    format!("mysql://{}@{}:{}/{}", credentials, host, port, name)
}

pub async fn get_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true);

    Database::connect(opt).await
}
