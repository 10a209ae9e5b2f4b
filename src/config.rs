//! Server configuration.
//!
//! Every field is optional; missing fields fall back to the defaults below.
//!
//! # Example Config (YAML)
//!
//! ```yaml
//! bind_address: "0.0.0.0:8080"
//! log_level: debug
//! title: "Reading Room"
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use reflective_display::config::ServerConfig;
//!
//! let config = ServerConfig::load("config/reflectd.yaml")?;
//! let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::Deserialize;

use crate::Error;

/// Default listen address
pub const DEFAULT_BIND_ADDRESS: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 5000);

/// Configuration for the `reflectd` server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_address: SocketAddr,
    /// Log filter used when `RUST_LOG` is not set (e.g., "info", "reflective_display=debug")
    pub log_level: String,
    /// Heading of the index page
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS,
            log_level: "info".to_string(),
            title: "Reflective E-Reader Display".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Override the listen address.
    #[must_use]
    pub fn with_bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:5000");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
bind_address: "0.0.0.0:8080"
log_level: debug
title: "Reading Room"
"#;
        let config = ServerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.title, "Reading Room");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = ServerConfig::from_yaml("title: Den\n").unwrap();
        assert_eq!(config.title, "Den");
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);

        assert_eq!(ServerConfig::from_yaml("").unwrap(), ServerConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ServerConfig::from_yaml("bind_address: not-an-address\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = ServerConfig::from_yaml("port: 5000\n").unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ServerConfig::load("/nonexistent/reflectd.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/reflectd.yaml"));
    }

    #[test]
    fn test_with_bind_address() {
        let addr: SocketAddr = "0.0.0.0:9000".parse().unwrap();
        assert_eq!(ServerConfig::default().with_bind_address(addr).bind_address, addr);
    }
}
