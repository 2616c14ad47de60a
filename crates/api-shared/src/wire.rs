//! JSON bodies exchanged over `GET /api/trips` and friends.
//!
//! These are plain wire structs: no validation happens here. The server builds them from the
//! validated domain records in `trips-core`; the client decodes them as-is.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A single trip as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TripRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub url: String,
}

/// Query string accepted by the trip search endpoint.
///
/// `keywords` is optional at the type level so the handler can tell an absent parameter
/// (rejected) from an empty one (matches every trip).
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TripsQuery {
    /// Whitespace-separated keywords; any one of them matching is enough.
    pub keywords: Option<String>,
}

/// Successful search response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TripsRes {
    /// Matching trips in catalogue order. A `null` or missing value decodes as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<TripRecord>,
}

/// Error body returned for rejected requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
