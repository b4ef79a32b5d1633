//! Server settings for the merch tracker
//!
//! Later layers win: built-in defaults, then `config/<environment>.toml`
//! when present, then `MERCH__SECTION__KEY` variables (for example
//! `MERCH__DATABASE__URL`). `MERCH_ENVIRONMENT` picks the file and
//! defaults to `development`.

use config::{ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// `development` runs pending migrations on startup
    pub environment: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

/// Listen address of the HTTP API
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Postgres pool holding tours, shows, catalog and counts
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// No default; must come from the file or `MERCH__DATABASE__URL`
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Token settings for Manager and Seller sessions
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// HMAC key shared by issuing and checking access tokens
    pub secret: String,
    /// Seconds
    pub access_token_expiry: i64,
    /// Seconds; a refresh rotates the stored token hash
    pub refresh_token_expiry: i64,
}

impl Config {
    /// Resolve the environment name from `MERCH_ENVIRONMENT` and load its layers
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("MERCH_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        Self::load_for(&environment)
    }

    /// Load the layers for a named environment
    pub fn load_for(environment: &str) -> Result<Self, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            // one hour access, one week refresh
            .set_default("jwt.access_token_expiry", 3600)?
            .set_default("jwt.refresh_token_expiry", 604800)?
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(
                Environment::with_prefix("MERCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// `host:port` for the TCP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
