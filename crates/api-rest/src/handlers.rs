//! Request handlers for the trip search REST API.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Json,
};

use api_shared::{ErrorRes, HealthRes, HealthService, TripRecord, TripsQuery, TripsRes};
use trips_core::TripError;

use crate::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "Plain-text greeting", body = String)
    )
)]
pub async fn hello() -> &'static str {
    "Hello World!"
}

#[utoipa::path(
    get,
    path = "/api/trips",
    params(TripsQuery),
    responses(
        (status = 200, description = "Trips matching any keyword, in catalogue order", body = TripsRes),
        (status = 400, description = "The keywords parameter is missing or malformed", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Search trips by keyword
///
/// Splits `keywords` on whitespace and returns every trip whose title, description or tags
/// contain at least one keyword, ignoring case. An empty `keywords` value returns the whole
/// catalogue.
///
/// # Errors
/// Returns `400 Bad Request` with an [`ErrorRes`] body if:
/// - the `keywords` query parameter is absent, or
/// - the query string cannot be decoded (for example `keywords` given twice).
#[axum::debug_handler]
pub async fn search_trips(
    State(state): State<AppState>,
    query: Result<Query<TripsQuery>, QueryRejection>,
) -> Result<Json<TripsRes>, (StatusCode, Json<ErrorRes>)> {
    let Query(query) = query.map_err(|rejection| {
        tracing::warn!("Rejected trip search query: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ErrorRes {
                message: rejection.body_text(),
            }),
        )
    })?;

    match state.trip_service.search(query.keywords.as_deref()) {
        Ok(trips) => Ok(Json(TripsRes {
            data: trips.into_iter().map(TripRecord::from).collect(),
        })),
        Err(e @ TripError::MissingParameter(_)) => {
            tracing::warn!("Rejected trip search: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorRes {
                    message: e.to_string(),
                }),
            ))
        }
        Err(e) => {
            tracing::error!("Trip search error: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorRes {
                    message: "Internal error".into(),
                }),
            ))
        }
    }
}
