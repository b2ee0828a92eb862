//! Configuration loading and management

use crate::actions::INVOICES_ROUTE;
use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Environment variable overriding `server.address`
pub const ENV_ADDRESS: &str = "DASHBOARD_ADDRESS";
/// Environment variable overriding `database.url`
pub const ENV_DATABASE_URL: &str = "POSTGRES_URL";
/// Environment variable overriding `server.allowed_origins` (comma separated)
pub const ENV_ALLOWED_ORIGINS: &str = "DASHBOARD_ALLOWED_ORIGINS";

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind (e.g., "127.0.0.1:3000")
    #[serde(default = "default_address")]
    pub address: String,

    /// Extra hosts (optionally with port) allowed to submit form actions
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            allowed_origins: Vec::new(),
        }
    }
}

/// View routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Invoice listing view; form actions live beneath it
    #[serde(default = "default_invoices_route")]
    pub invoices: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            invoices: default_invoices_route(),
        }
    }
}

/// Database settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL; in-memory storage is used when absent
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_invoices_route() -> String {
    INVOICES_ROUTE.to_string()
}

fn default_max_connections() -> u32 {
    5
}

/// Complete dashboard configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub routes: RoutesConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;

        Self::parse(&content, Some(path.display().to_string()))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    fn parse(yaml: &str, file: Option<String>) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration for local development
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                address: default_address(),
                allowed_origins: vec!["localhost".to_string(), "localhost:3000".to_string()],
            },
            routes: RoutesConfig::default(),
            database: DatabaseConfig::default(),
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (`DASHBOARD_ADDRESS`, `POSTGRES_URL`,
    /// `DASHBOARD_ALLOWED_ORIGINS`)
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(address) = lookup(ENV_ADDRESS) {
            self.server.address = address;
        }
        if let Some(url) = lookup(ENV_DATABASE_URL).filter(|u| !u.trim().is_empty()) {
            self.database.url = Some(url);
        }
        if let Some(origins) = lookup(ENV_ALLOWED_ORIGINS) {
            self.server.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        self.validate()?;
        Ok(self)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.address.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "server.address".to_string(),
                value: self.server.address.clone(),
                message: "expected a socket address such as 127.0.0.1:3000".to_string(),
            });
        }

        let route = &self.routes.invoices;
        if !route.starts_with('/') || route.len() < 2 || route.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "routes.invoices".to_string(),
                value: route.clone(),
                message: "expected an absolute path without a trailing slash".to_string(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
