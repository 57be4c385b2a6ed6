//! Server configuration types for Bookshelf.
//!
//! `ServerConfig` represents the top-level `config.toml` that controls the
//! listen address and the database location.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Bookshelf server.
///
/// Loaded from `~/.bookshelf/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind the HTTP listener to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port for the HTTP listener.
    #[serde(default = "default_port")]
    pub port: u16,

    /// sqlx connection URL. `None` means `{data_dir}/bookshelf.db`.
    #[serde(default)]
    pub database_url: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
        }
    }
}
