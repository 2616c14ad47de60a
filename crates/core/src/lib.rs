//! # Trips Core
//!
//! Core business logic for the trip search system.
//!
//! This crate contains pure data operations:
//! - Trip records and the read-only in-memory catalogue
//! - Keyword matching (case-insensitive, OR-combined substring search)
//! - Start-up configuration and the search service boundary
//!
//! **No API concerns**: HTTP servers and clients belong in `api-rest` and `trips-sync`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod matcher;
pub mod service;
pub mod trip;

pub use api_shared::TripRecord;
pub use catalog::TripCatalog;
pub use config::CoreConfig;
pub use constants::{DEFAULT_REST_ADDR, KEYWORDS_PARAM};
pub use error::{TripError, TripResult};
pub use matcher::{match_trips, KeywordMatcher};
pub use service::TripService;
pub use trip::Trip;
pub use trips_types::{Keyword, NonEmptyText};
