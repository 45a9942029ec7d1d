//! Configuration loading and management
//!
//! Handles parsing of `.taskdeck.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".taskdeck.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Client configuration
    #[serde(default)]
    pub client: ClientConfig,

    /// Mirror cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Server listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for `taskdeck serve`
    #[serde(default = "default_host")]
    pub host: String,

    /// Listener port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7450
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the task API
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    format!("http://{}:{}", default_host(), default_port())
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

/// Mirror cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache directory; defaults to the platform cache dir when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, or from `.taskdeck.toml`
    /// in the working directory. A missing file yields the defaults; a
    /// present but unparsable file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::InvalidConfig(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => {
                let default = PathBuf::from(CONFIG_FILE);
                if !default.exists() {
                    return Ok(Config::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_local() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.client.api_url, "http://127.0.0.1:7450");
        assert!(config.cache.dir.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9000
            "#,
        )
        .expect("parse");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.client.api_url, "http://127.0.0.1:7450");
    }

    #[test]
    fn cache_dir_can_be_overridden() {
        let config: Config = toml::from_str(
            r#"
            [cache]
            dir = "/tmp/taskdeck-cache"
            "#,
        )
        .expect("parse");
        assert_eq!(
            config.cache.dir.as_deref(),
            Some(Path::new("/tmp/taskdeck-cache"))
        );
    }
}
