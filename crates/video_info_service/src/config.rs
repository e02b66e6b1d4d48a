use std::fmt;
use std::net::SocketAddr;

use youtube_client::DEFAULT_BASE_URL;

pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const API_BASE_URL_VAR: &str = "YOUTUBE_API_BASE_URL";
pub const LISTEN_ADDR_VAR: &str = "LISTEN_ADDR";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid LISTEN_ADDR {value:?}: {source}")]
    InvalidListenAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Settings read once at startup and handed to the handler
#[derive(Clone)]
pub struct Config {
    /// `None` when unset or empty; requests then fail with a configuration error
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub listen_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source, so tests need not touch the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR).filter(|key| !key.is_empty());

        let api_base_url = lookup(API_BASE_URL_VAR)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let listen_addr =
            lookup(LISTEN_ADDR_VAR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidListenAddr {
                value: listen_addr.clone(),
                source,
            })?;

        Ok(Self {
            api_key,
            api_base_url,
            listen_addr,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            listen_addr: ([0, 0, 0, 0], 3000).into(),
        }
    }
}

// keeps the key out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("listen_addr", &self.listen_addr)
            .finish()
    }
}
