//! Where search results come from.
//!
//! [`QuerySync`](crate::QuerySync) only talks to a [`TripSource`]. The HTTP implementation
//! calls `GET /api/trips`; the catalogue implementation searches an in-memory catalogue and is
//! used for offline runs.

use api_shared::{ErrorRes, TripRecord, TripsRes};
use async_trait::async_trait;
use reqwest::Url;
use tokio_util::sync::CancellationToken;
use trips_core::{TripService, KEYWORDS_PARAM};

use crate::{SyncError, SyncResult};

/// A searchable source of trips.
#[async_trait]
pub trait TripSource: Send + Sync + 'static {
    /// Search for `term`.
    ///
    /// Implementations should stop work and return [`SyncError::Cancelled`] once `cancel`
    /// fires. Callers must not rely on that: a result that arrives after cancellation is
    /// discarded regardless.
    async fn fetch_trips(
        &self,
        term: &str,
        cancel: &CancellationToken,
    ) -> SyncResult<Vec<TripRecord>>;
}

/// Trip search over HTTP.
#[derive(Clone, Debug)]
pub struct HttpTripSource {
    client: reqwest::Client,
    trips_url: Url,
}

impl HttpTripSource {
    /// Create a source for the API rooted at `api_url`.
    ///
    /// Any path on `api_url` is kept as a prefix, so `https://host/base` searches
    /// `https://host/base/api/trips`.
    pub fn new(api_url: &Url) -> SyncResult<Self> {
        let mut base = api_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let trips_url = base
            .join("api/trips")
            .map_err(|e| SyncError::InvalidInput(format!("invalid API URL {api_url}: {e}")))?;

        let client = reqwest::Client::builder().build()?;

        Ok(Self { client, trips_url })
    }

    pub fn trips_url(&self) -> &Url {
        &self.trips_url
    }

    async fn request(&self, term: &str) -> SyncResult<Vec<TripRecord>> {
        let response = self
            .client
            .get(self.trips_url.clone())
            .query(&[(KEYWORDS_PARAM, term)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorRes>().await {
                Ok(body) => body.message,
                Err(_) => status.to_string(),
            };
            return Err(SyncError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: TripsRes = response.json().await?;
        Ok(body.data)
    }
}

#[async_trait]
impl TripSource for HttpTripSource {
    async fn fetch_trips(
        &self,
        term: &str,
        cancel: &CancellationToken,
    ) -> SyncResult<Vec<TripRecord>> {
        // Dropping the request future aborts the underlying HTTP exchange.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(SyncError::Cancelled),
            result = self.request(term) => result,
        }
    }
}

/// Trip search against an in-memory catalogue, without a server.
#[derive(Clone, Debug)]
pub struct CatalogTripSource {
    service: TripService,
}

impl CatalogTripSource {
    pub fn new(service: TripService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl TripSource for CatalogTripSource {
    async fn fetch_trips(
        &self,
        term: &str,
        cancel: &CancellationToken,
    ) -> SyncResult<Vec<TripRecord>> {
        if cancel.is_cancelled() {
            return Err(SyncError::Cancelled);
        }

        let trips = self.service.search(Some(term))?;
        Ok(trips.into_iter().map(TripRecord::from).collect())
    }
}
