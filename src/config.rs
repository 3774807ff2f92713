//! Document Store Gateway configuration
//!
//! A small tree of `Default`-implementing structs covering the one thing this crate's
//! core genuinely needs to be told from outside: how to reach the document store.
//! `tools_server_url` belongs to the out-of-scope orchestrator and is not modeled here.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_DOC_STORE_URL: &str = "http://localhost:9200";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Authentication against the document store. An API key takes precedence over
/// basic auth when both are present, matching the reference implementation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DocStoreAuth {
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Gateway configuration: where the document store lives and how to reach it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub doc_store_url: String,
    #[serde(default)]
    pub auth: DocStoreAuth,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            doc_store_url: DEFAULT_DOC_STORE_URL.to_string(),
            auth: DocStoreAuth::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from `doc_store_*` environment variables, falling back to
    /// defaults for anything unset. An API key wins over a username/password pair.
    pub fn from_env() -> Self {
        let doc_store_url = std::env::var("DOC_STORE_URL")
            .unwrap_or_else(|_| DEFAULT_DOC_STORE_URL.to_string());

        let api_key = std::env::var("DOC_STORE_API_KEY").ok().filter(|s| !s.is_empty());
        let username = std::env::var("DOC_STORE_USERNAME").ok().filter(|s| !s.is_empty());
        let password = std::env::var("DOC_STORE_PASSWORD").ok().filter(|s| !s.is_empty());

        Self {
            doc_store_url,
            auth: DocStoreAuth { api_key, username, password },
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Parse configuration from a TOML document (e.g. a loaded config file).
    pub fn from_toml_str(body: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(body)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
