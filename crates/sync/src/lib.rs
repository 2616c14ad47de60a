//! # Trips Sync
//!
//! Client side of trip search.
//!
//! [`QuerySync`] keeps a result list in step with a search term edited keystroke by keystroke:
//! edits are debounced, superseded requests are cancelled, and responses that arrive out of
//! order are never shown. Results come from a [`TripSource`], either the REST API
//! ([`HttpTripSource`]) or an in-memory catalogue ([`CatalogTripSource`]).

pub mod config;
pub mod error;
pub mod query_sync;
pub mod source;

pub use config::{SyncConfig, DEFAULT_API_URL, DEFAULT_DEBOUNCE};
pub use error::{SyncError, SyncResult};
pub use query_sync::{toggled_term, QuerySync, RequestToken, SyncPhase, ViewState};
pub use source::{CatalogTripSource, HttpTripSource, TripSource};

pub use reqwest::Url;
pub use tokio_util::sync::CancellationToken;
