//! Directory endpoint configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::directory_http::DirectoryEndpoints;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_LIST_URL: &str = "https://mocki.io/v1/a6a0fb6b-a84a-4934-b3f2-5c92cc77c44e";

/// Errors raised while turning settings into usable endpoints.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{key} is not a usable URL ({value:?}): {reason}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Where the Remote Directory Service lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_DIRECTORY")]
pub struct DirectorySettings {
    /// Base URL for `/api/users` create, update and delete calls.
    pub api_base_url: Option<String>,
    /// Absolute URL answering the list call.
    pub list_url: Option<String>,
    /// Per-request timeout in seconds. Zero waits indefinitely.
    #[ortho_config(default = 0)]
    pub request_timeout_secs: u64,
}

impl DirectorySettings {
    /// Return the configured API base URL, falling back to the default.
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// Return the configured list URL, falling back to the default.
    pub fn list_url(&self) -> &str {
        self.list_url.as_deref().unwrap_or(DEFAULT_LIST_URL)
    }

    /// Request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Parse both URLs into adapter endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidUrl`] when either URL does not parse or
    /// the API base cannot carry a path.
    pub fn endpoints(&self) -> Result<DirectoryEndpoints, SettingsError> {
        let api_base_url = parse_url("api_base_url", self.api_base_url())?;
        if api_base_url.cannot_be_a_base() {
            return Err(SettingsError::InvalidUrl {
                key: "api_base_url",
                value: self.api_base_url().to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }
        Ok(DirectoryEndpoints {
            list_url: parse_url("list_url", self.list_url())?,
            api_base_url,
        })
    }
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|error| SettingsError::InvalidUrl {
        key,
        value: value.to_owned(),
        reason: error.to_string(),
    })
}
