//! Configuration model loaded from external sources.

use std::time::Duration;

use config::{Config, ConfigError};
use serde::Deserialize;

use crate::search::state::DEFAULT_PAGE_SIZE;

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the HTTP repository and the list orchestrators.
pub struct ClientConfig {
    /// Backend root, e.g. `https://api.example.com/v1`.
    pub api_url: String,
    /// Bearer token; an empty value sends no `Authorization` header.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Reads `config/default`, the optional `config/{app_env}` profile and
    /// `APP_`-prefixed environment variables, later sources winning.
    pub fn load(app_env: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Token to send, if any.
    pub fn bearer_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
