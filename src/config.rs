//! Environment-backed configuration.

use figment::{Figment, providers::Env};
use serde::Deserialize;

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_hn_base_url() -> String {
    crate::hn::client::DEFAULT_BASE_URL.to_owned()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Base URL of the Hacker News API.
    #[serde(default = "default_hn_base_url")]
    pub hn_base_url: String,
    /// Raw cache retention setting. Kept unparsed so the cache can resolve it
    /// lazily and degrade a bad value to infinite retention instead of
    /// failing startup.
    #[serde(default)]
    pub cache_retention_seconds: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new().merge(Env::raw()).extract()
    }
}
