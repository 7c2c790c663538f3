/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables (prefixed with ROSTER_)
        settings = settings.add_source(
            config::Environment::with_prefix("ROSTER")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.is_empty() {
            return Err(ServerError::Config(
                "Database URL is required (set ROSTER_STORAGE_DATABASE_URL)".to_string(),
            ));
        }

        if self.storage.export_path.as_os_str().is_empty() {
            return Err(ServerError::Config(
                "Export path is required (set ROSTER_STORAGE_EXPORT_PATH)".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        export_path: default_export_path(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/roster.db".to_string()
}

fn default_export_path() -> PathBuf {
    PathBuf::from("./data/users.csv")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
        }
    }
}
