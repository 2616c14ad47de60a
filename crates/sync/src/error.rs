#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The request was superseded or explicitly cancelled. Never shown to the user.
    #[error("request cancelled")]
    Cancelled,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },
    #[error("search failed: {0}")]
    Search(#[from] trips_core::TripError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl SyncError {
    /// True for intentional cancellation, as opposed to a genuine failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SyncError::Cancelled)
    }
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;
