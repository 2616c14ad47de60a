//! Client configuration, resolved once at start-up.

use crate::{SyncError, SyncResult};
use reqwest::Url;
use std::time::Duration;

/// Pause in typing after which a search is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Base URL of the trip search API when `TRIPS_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:4001";

#[derive(Clone, Debug)]
pub struct SyncConfig {
    api_url: Url,
    debounce: Duration,
}

impl SyncConfig {
    pub fn new(api_url: Url, debounce: Duration) -> Self {
        Self { api_url, debounce }
    }

    /// Resolve both settings from raw (possibly unset) values, as read from the environment.
    pub fn from_env_values(
        api_url: Option<String>,
        debounce_ms: Option<String>,
    ) -> SyncResult<Self> {
        Ok(Self::new(
            api_url_from_env_value(api_url)?,
            debounce_from_env_value(debounce_ms)?,
        ))
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the API base URL from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_API_URL`].
pub fn api_url_from_env_value(value: Option<String>) -> SyncResult<Url> {
    let value = non_blank(value).unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let url = Url::parse(&value)
        .map_err(|e| SyncError::InvalidInput(format!("invalid API URL {value:?}: {e}")))?;

    if url.cannot_be_a_base() {
        return Err(SyncError::InvalidInput(format!(
            "API URL cannot be used as a base: {value:?}"
        )));
    }

    Ok(url)
}

/// Parse the debounce delay (whole milliseconds) from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DEBOUNCE`].
pub fn debounce_from_env_value(value: Option<String>) -> SyncResult<Duration> {
    match non_blank(value) {
        None => Ok(DEFAULT_DEBOUNCE),
        Some(v) => v.parse::<u64>().map(Duration::from_millis).map_err(|e| {
            SyncError::InvalidInput(format!("invalid debounce milliseconds {v:?}: {e}"))
        }),
    }
}
