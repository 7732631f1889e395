//! Yars connection parameters

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ActiveRdfError, ActiveRdfResult};

/// Default Yars HTTP port
pub const DEFAULT_PORT: u16 = 8080;

/// Query language advertised by the adapter. Informational only; it is never
/// negotiated with the store.
pub const DEFAULT_QUERY_LANGUAGE: &str = "n3";

/// Connection parameters for a Yars store at `http://{host}:{port}/{context}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YarsConfig {
    /// Store host name (required)
    pub host: String,
    /// Store port
    pub port: u16,
    /// Named graph, addressed as a URL path segment
    pub context: String,
    /// HTTP proxy URL, e.g. `http://proxy.local:3128`
    pub proxy: Option<String>,
    /// Query language tag
    pub query_language: String,
    /// Per-request timeout in seconds (None = transport default)
    pub timeout_secs: Option<u64>,
    /// Extra attempts after a failed connection. Status failures are never retried.
    pub retries: u32,
    /// Keep idle connections between calls instead of one connection per call
    pub pool_connections: bool,
}

impl Default for YarsConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            context: String::new(),
            proxy: None,
            query_language: DEFAULT_QUERY_LANGUAGE.to_string(),
            timeout_secs: None,
            retries: 0,
            pool_connections: false,
        }
    }
}

impl YarsConfig {
    /// Create a configuration for the given host with defaults elsewhere
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_pooling(mut self, pool_connections: bool) -> Self {
        self.pool_connections = pool_connections;
        self
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> ActiveRdfResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> ActiveRdfResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ActiveRdfError::ConfigurationError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Context without surrounding slashes
    pub fn normalized_context(&self) -> &str {
        self.context.trim_matches('/')
    }
}
