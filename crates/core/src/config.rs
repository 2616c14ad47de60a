//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Request handlers never read environment variables.

use crate::constants::DEFAULT_REST_ADDR;
use crate::{TripError, TripResult};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    data_file: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `data_file`, when given, must name an existing regular file.
    pub fn new(data_file: Option<PathBuf>) -> TripResult<Self> {
        if let Some(path) = &data_file {
            if !path.is_file() {
                return Err(TripError::InvalidInput(format!(
                    "trip data file does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(Self { data_file })
    }

    /// Catalogue file to load instead of the bundled catalogue.
    pub fn data_file(&self) -> Option<&Path> {
        self.data_file.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the catalogue path from an optional string value.
///
/// `None` or empty/whitespace means "use the bundled catalogue".
pub fn data_file_from_env_value(value: Option<String>) -> Option<PathBuf> {
    non_blank(value).map(PathBuf::from)
}

/// Parse the REST bind address from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_REST_ADDR`].
pub fn rest_addr_from_env_value(value: Option<String>) -> TripResult<SocketAddr> {
    let value = non_blank(value).unwrap_or_else(|| DEFAULT_REST_ADDR.to_string());
    value
        .parse()
        .map_err(|e| TripError::InvalidInput(format!("invalid REST address {value:?}: {e}")))
}
