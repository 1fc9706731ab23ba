//! Server configuration
//!
//! Configuration is layered: defaults, then an optional `config.toml`,
//! then `ZARISH__*` environment variables (e.g. `ZARISH__SERVER__PORT`,
//! `ZARISH__DATABASE__URL`). A `.env` file is honored for local
//! development.

use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
    pub fhir: FhirConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Maximum accepted request body size in bytes
    pub max_request_body_size: usize,

    /// Allowed CORS origins. Empty means no CORS headers are emitted.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_request_body_size: 2 * 1024 * 1024,
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,

    /// Override used by the integration test harness
    pub test_database_url: Option<String>,

    pub pool_max_size: u32,
    pub pool_acquire_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost:5432/zarish".to_string(),
            test_database_url: None,
            pool_max_size: 10,
            pool_acquire_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the Elasticsearch cluster
    pub url: String,

    pub request_timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".to_string(),
            request_timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter directive; `RUST_LOG` overrides it
    pub filter: String,

    /// Emit JSON log lines instead of the human-readable format
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "zarish=info,tower_http=info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FhirConfig {
    pub version: String,
}

impl Default for FhirConfig {
    fn default() -> Self {
        Self {
            version: "R4".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> anyhow::Result<Self> {
        // Best effort: a missing .env file is fine.
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("ZARISH")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Validate settings that would otherwise fail late and obscurely
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.database.url.is_empty() {
            return Err("database.url must not be empty".to_string());
        }
        if self.search.url.is_empty() {
            return Err("search.url must not be empty".to_string());
        }
        if self.server.max_request_body_size == 0 {
            return Err("server.max_request_body_size must be positive".to_string());
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid listen address: {e}"))
    }
}
