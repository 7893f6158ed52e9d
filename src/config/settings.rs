//! Settings structures for the gateway configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use url::Url;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub meilisearch: MeilisearchSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source
    pub fn merge_vars<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("MEILI_GATEWAY_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("MEILI_GATEWAY_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("MEILI_GATEWAY_GRAPHIQL") {
            self.server.graphiql = val.parse().unwrap_or(self.server.graphiql);
        }
        if let Some(val) = var("MEILI_HOST") {
            self.meilisearch.host = val;
        }
        if let Some(val) = var("MEILI_API_KEY") {
            self.meilisearch.api_key = Some(val).filter(|k| !k.is_empty());
        }
        if let Some(val) = var("MEILI_API_VERSION") {
            if let Ok(version) = val.parse() {
                self.meilisearch.api_version = version;
            }
        }
        if let Some(val) = var("MEILI_GATEWAY_DEFAULT_INDEX") {
            self.meilisearch.default_index = val;
        }
    }

    /// Reject settings the gateway cannot start with
    pub fn validate(&self) -> Result<()> {
        let host = Url::parse(&self.meilisearch.host)?;
        if !matches!(host.scheme(), "http" | "https") {
            bail!("meilisearch.host must be an http(s) URL, got {}", host);
        }
        if self.meilisearch.documents_batch_size == 0 {
            bail!("meilisearch.documents_batch_size must be positive");
        }
        let timeout = self.meilisearch.request_timeout;
        if !timeout.is_finite() || timeout <= 0.0 {
            bail!("meilisearch.request_timeout must be positive");
        }
        if self.meilisearch.default_index.is_empty() {
            bail!("meilisearch.default_index must not be empty");
        }
        Ok(())
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Serve the GraphiQL console on GET /graphql
    pub graphiql: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_address: "0.0.0.0".to_string(),
            graphiql: true,
        }
    }
}

/// Downstream search engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeilisearchSettings {
    /// Engine base URL
    pub host: String,
    /// Sent as a bearer token when set
    pub api_key: Option<String>,
    /// Search parameter names the engine understands
    pub api_version: ApiVersion,
    /// Index searched by the root `search` field
    pub default_index: String,
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Page size used when dumping all documents of an index
    pub documents_batch_size: usize,
}

impl Default for MeilisearchSettings {
    fn default() -> Self {
        Self {
            host: "http://127.0.0.1:7700".to_string(),
            api_key: None,
            api_version: ApiVersion::default(),
            default_index: "movies".to_string(),
            request_timeout: 5.0,
            documents_batch_size: 1000,
        }
    }
}

/// Generation of the engine's search API.
///
/// Engines before v0.28 take `matches` and `facetsDistribution`; later ones
/// renamed them to `showMatchesPosition` and `facets` and reject the old
/// names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    #[default]
    Legacy,
    Current,
}

impl FromStr for ApiVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(ApiVersion::Legacy),
            "current" => Ok(ApiVersion::Current),
            other => bail!("unknown api version: {}", other),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Idle connections kept per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}
