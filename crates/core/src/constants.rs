//! Constants used throughout the trip search core crate.

/// Query parameter carrying the raw search term.
pub const KEYWORDS_PARAM: &str = "keywords";

/// Address the REST server binds to when `TRIPS_REST_ADDR` is not set.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:4001";

/// Catalogue compiled into the binary, used when no data file is configured.
pub const BUNDLED_CATALOGUE: &str = include_str!("../data/trips.yaml");
