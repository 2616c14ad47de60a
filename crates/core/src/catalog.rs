//! In-memory trip catalogue.
//!
//! The catalogue is loaded once at start-up and shared read-only between requests. It is a
//! YAML sequence of trip records; JSON arrays load too since YAML is a superset of JSON.
//!
//! ```yaml
//! - id: "1"
//!   title: Island hopping around Koh Lipe
//!   description: Long-tail boats between the small islands...
//!   tags: [beach, sea]
//!   photos: [https://img.trips.example.com/lipe/1.jpg]
//!   url: https://trips.example.com/koh-lipe
//! ```

use crate::constants::BUNDLED_CATALOGUE;
use crate::trip::Trip;
use crate::{CoreConfig, TripError, TripResult};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Read-only, cheaply clonable collection of trips in source order.
#[derive(Clone, Debug)]
pub struct TripCatalog {
    trips: Arc<[Trip]>,
}

impl TripCatalog {
    /// Build a catalogue from already-parsed trips.
    ///
    /// # Errors
    /// Returns [`TripError::DuplicateTripId`] if two trips share an id.
    pub fn new(trips: Vec<Trip>) -> TripResult<Self> {
        let mut seen = HashSet::with_capacity(trips.len());
        for trip in &trips {
            if !seen.insert(trip.id.as_str()) {
                return Err(TripError::DuplicateTripId(trip.id.clone()));
            }
        }

        Ok(Self {
            trips: trips.into(),
        })
    }

    /// Parse a catalogue from YAML (or JSON) text.
    pub fn from_yaml_str(text: &str) -> TripResult<Self> {
        let trips: Vec<Trip> =
            serde_yaml::from_str(text).map_err(TripError::YamlDeserialization)?;
        Self::new(trips)
    }

    pub fn from_file(path: &Path) -> TripResult<Self> {
        let text = std::fs::read_to_string(path).map_err(TripError::FileRead)?;
        Self::from_yaml_str(&text)
    }

    /// The catalogue compiled into the crate.
    pub fn bundled() -> TripResult<Self> {
        Self::from_yaml_str(BUNDLED_CATALOGUE)
    }

    /// Load the catalogue named by `cfg`, falling back to the bundled one.
    pub fn load(cfg: &CoreConfig) -> TripResult<Self> {
        let catalog = match cfg.data_file() {
            Some(path) => {
                tracing::info!("loading trip catalogue from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::bundled()?,
        };
        tracing::info!("trip catalogue ready with {} trips", catalog.len());
        Ok(catalog)
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
