//! Server configuration for the scoring service.
//!
//! All runtime knobs are collected here and read once at process start; no
//! handler consults the environment afterwards.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the scoring server.
///
/// # Example
///
/// ```
/// use triage_serving::config::ServerConfig;
///
/// let config = ServerConfig::builder()
///     .host("127.0.0.1")
///     .port(8000)
///     .model_dir("artifacts")
///     .build();
/// assert_eq!(config.socket_addr(), "127.0.0.1:8000");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to (default: "0.0.0.0").
    pub host: String,

    /// Port to listen on (default: 8000). Port 0 binds an ephemeral port.
    pub port: u16,

    /// Directory holding the trained artifacts.
    pub model_dir: PathBuf,

    /// Path the JSON API docs are served under; `None` disables docs and
    /// the root redirect to them.
    pub docs_url: Option<String>,

    /// Upper bound on request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_dir: PathBuf::from("artifacts"),
            docs_url: Some("/docs".to_string()),
            max_body_bytes: 64 * 1024,
        }
    }
}

impl ServerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Get the socket address string for binding.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidBodyLimit);
        }
        if let Some(path) = &self.docs_url {
            if !path.starts_with('/') || path == "/" {
                return Err(ConfigError::InvalidDocsPath(path.clone()));
            }
        }
        Ok(())
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    model_dir: Option<PathBuf>,
    docs_url: Option<Option<String>>,
    max_body_bytes: Option<usize>,
}

impl ServerConfigBuilder {
    /// Set the host address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the port number.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the artifact directory.
    pub fn model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    /// Serve the JSON API docs under `path`.
    pub fn docs_url(mut self, path: impl Into<String>) -> Self {
        self.docs_url = Some(Some(path.into()));
        self
    }

    /// Disable the docs endpoint and the root redirect to it.
    pub fn disable_docs(mut self) -> Self {
        self.docs_url = Some(None);
        self
    }

    /// Set the request body size limit.
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = Some(limit);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ServerConfig {
        let default = ServerConfig::default();
        ServerConfig {
            host: self.host.unwrap_or(default.host),
            port: self.port.unwrap_or(default.port),
            model_dir: self.model_dir.unwrap_or(default.model_dir),
            docs_url: self.docs_url.unwrap_or(default.docs_url),
            max_body_bytes: self.max_body_bytes.unwrap_or(default.max_body_bytes),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Host must be non-empty.
    #[error("Invalid host: host cannot be empty")]
    EmptyHost,

    /// Body limit must be positive.
    #[error("Invalid body limit: must be greater than 0")]
    InvalidBodyLimit,

    /// Docs path must be an absolute path other than "/".
    #[error("Invalid docs path: {0:?} must start with '/' and not be the root")]
    InvalidDocsPath(String),
}
