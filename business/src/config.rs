use std::env::vars;
use std::num::NonZeroUsize;

use serde::Deserialize;

use crate::http::Client;

/// Production backend.
pub const DEFAULT_API_BASE_URL: &str = "https://brightpath-3.onrender.com";

/// Rows per table page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(size) => size,
    None => unreachable!(),
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(String),
    #[error("BRIGHTPATH_PAGE_SIZE must be greater than zero")]
    ZeroPageSize,
    #[error("BRIGHTPATH_API_URL must not be empty")]
    EmptyApiUrl,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    brightpath_api_url: Option<String>,
    brightpath_page_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
    pub page_size: NonZeroUsize,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Read `BRIGHTPATH_API_URL` and `BRIGHTPATH_PAGE_SIZE`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_env::from_iter(vars()).map_err(|e| ConfigError::Env(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let api_base_url = match raw.brightpath_api_url {
            Some(url) if url.trim().is_empty() => return Err(ConfigError::EmptyApiUrl),
            Some(url) => url.trim().to_owned(),
            None => DEFAULT_API_BASE_URL.to_owned(),
        };

        let page_size = match raw.brightpath_page_size {
            Some(size) => NonZeroUsize::new(size).ok_or(ConfigError::ZeroPageSize)?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            api_base_url,
            page_size,
        })
    }

    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn client(&self) -> Client {
        Client::new(self.api_base_url.as_str())
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
