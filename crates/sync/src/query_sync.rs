//! Debounced, cancellable synchronisation of a search box with search results.
//!
//! Every edit of the search term re-arms a delay timer. Only when the timer elapses without a
//! further edit is a request issued. Each armed search carries a [`RequestToken`]; the latest
//! token is owned by the [`QuerySync`] instance and a response is applied only if it still
//! carries that token.
//!
//! Phases, as seen through [`ViewState::phase`]:
//!
//! ```text
//!  Idle/Resolved --edit--> Pending --delay elapsed--> InFlight --response--> Resolved
//!                            ^  |                        |
//!                            +--+ edit (re-arm)          +--edit--> Pending (old request cancelled)
//! ```
//!
//! Notes:
//! - An edit while a request is in flight cancels that request through its
//!   [`CancellationToken`]. Whether or not the source stops early, its response is dropped as
//!   stale.
//! - Cancellation is never an error. It does not touch the results.
//! - Any other failure is logged and leaves the previous results on screen. There is no retry:
//!   the next edit starts a fresh cycle.
//! - The loading indicator is raised on entering `Pending` and cleared on `Resolved`, on a
//!   failure, or when the latest search is cancelled without a successor.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use api_shared::TripRecord;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use trips_core::Keyword;

use crate::source::TripSource;
use crate::{SyncError, SyncResult};

/// Identifies one armed search. Tokens increase monotonically per [`QuerySync`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncPhase {
    /// Nothing armed or in flight.
    #[default]
    Idle,
    /// Delay timer armed; no request sent yet.
    Pending,
    /// Request sent, awaiting the response.
    InFlight,
    /// Results of the latest request are shown.
    Resolved,
}

/// What a search screen renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    /// The term as last edited.
    pub term: String,
    pub results: Vec<TripRecord>,
    pub is_loading: bool,
    pub phase: SyncPhase,
    /// Token of the request whose results are shown.
    pub shown: Option<RequestToken>,
    /// Number of times results have been replaced.
    pub revision: u64,
}

#[derive(Default)]
struct Control {
    term: String,
    latest: Option<RequestToken>,
    cancel: Option<CancellationToken>,
    issued: u64,
}

struct Shared {
    control: Mutex<Control>,
    view: watch::Sender<ViewState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move `token` to `InFlight` if it is still the latest search.
    fn mark_in_flight(&self, token: RequestToken) -> bool {
        let control = self.lock();
        if control.latest != Some(token) {
            return false;
        }
        self.view.send_modify(|view| view.phase = SyncPhase::InFlight);
        true
    }

    fn settle(
        &self,
        token: RequestToken,
        cancel: &CancellationToken,
        result: SyncResult<Vec<TripRecord>>,
    ) {
        let control = self.lock();

        if control.latest != Some(token) || cancel.is_cancelled() {
            match result {
                Err(SyncError::Cancelled) => tracing::debug!("search {} cancelled", token),
                _ => tracing::debug!("discarding stale response for search {}", token),
            }
            return;
        }

        match result {
            Ok(trips) => {
                tracing::debug!("search {} resolved with {} trips", token, trips.len());
                self.view.send_modify(|view| {
                    view.results = trips;
                    view.is_loading = false;
                    view.phase = SyncPhase::Resolved;
                    view.shown = Some(token);
                    view.revision += 1;
                });
            }
            Err(SyncError::Cancelled) => {
                tracing::debug!("search {} cancelled by its source", token);
                self.view.send_modify(|view| {
                    view.is_loading = false;
                    view.phase = SyncPhase::Idle;
                });
            }
            Err(e) => {
                tracing::error!("Error fetching trips for search {}: {}", token, e);
                self.view.send_modify(|view| {
                    view.is_loading = false;
                    view.phase = SyncPhase::Idle;
                });
            }
        }
    }
}

/// Keeps search results in step with a search term that is edited keystroke by keystroke.
pub struct QuerySync<S: TripSource> {
    source: Arc<S>,
    debounce: Duration,
    shared: Arc<Shared>,
}

impl<S: TripSource> QuerySync<S> {
    /// Create an idle synchroniser with no results.
    ///
    /// Call [`set_term`](Self::set_term) with an empty term to load the full catalogue.
    pub fn new(source: S, debounce: Duration) -> Self {
        let (view, _) = watch::channel(ViewState::default());
        Self {
            source: Arc::new(source),
            debounce,
            shared: Arc::new(Shared {
                control: Mutex::new(Control::default()),
                view,
            }),
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Current term.
    pub fn term(&self) -> String {
        self.shared.lock().term.clone()
    }

    /// Snapshot of the current view state.
    pub fn view(&self) -> ViewState {
        self.shared.view.borrow().clone()
    }

    /// Receiver notified on every view change.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.shared.view.subscribe()
    }

    /// Record an edit of the search term.
    ///
    /// Cancels any armed timer or in-flight request and arms a new search for `term`.
    /// Setting the term it already has is not an edit: the current search carries on and its
    /// token is returned.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn set_term(&self, term: impl Into<String>) -> RequestToken {
        let term = term.into();
        let mut control = self.shared.lock();

        if let Some(latest) = control.latest {
            if control.term == term {
                return latest;
            }
        }

        if let Some(previous) = control.cancel.take() {
            previous.cancel();
        }

        control.issued += 1;
        let token = RequestToken(control.issued);
        let cancel = CancellationToken::new();
        control.term = term.clone();
        control.latest = Some(token);
        control.cancel = Some(cancel.clone());

        self.shared.view.send_modify(|view| {
            view.term = term.clone();
            view.is_loading = true;
            view.phase = SyncPhase::Pending;
        });
        drop(control);

        tracing::debug!("search {} armed for {:?}", token, term);
        tokio::spawn(run_search(
            Arc::clone(&self.source),
            Arc::clone(&self.shared),
            token,
            term,
            cancel,
            self.debounce,
        ));

        token
    }

    /// Replace the term with a single tag, as when a tag on a result is clicked.
    pub fn select_tag(&self, tag: &str) -> RequestToken {
        self.set_term(tag)
    }

    /// Add the keywords of `tag` to the term, or remove them if all are already present.
    pub fn toggle_keyword(&self, tag: &str) -> RequestToken {
        let term = toggled_term(&self.term(), tag);
        self.set_term(term)
    }

    /// Abandon the armed or in-flight search without starting another one.
    ///
    /// Results are left as they are and the loading indicator is cleared.
    pub fn cancel(&self) {
        let mut control = self.shared.lock();
        if let Some(cancel) = control.cancel.take() {
            cancel.cancel();
        }
        if let Some(token) = control.latest.take() {
            tracing::debug!("search {} cancelled", token);
            self.shared.view.send_modify(|view| {
                if view.is_loading {
                    view.is_loading = false;
                    view.phase = SyncPhase::Idle;
                }
            });
        }
    }
}

impl<S: TripSource> Drop for QuerySync<S> {
    fn drop(&mut self) {
        if let Some(cancel) = self.shared.lock().cancel.take() {
            cancel.cancel();
        }
    }
}

async fn run_search<S: TripSource>(
    source: Arc<S>,
    shared: Arc<Shared>,
    token: RequestToken,
    term: String,
    cancel: CancellationToken,
    debounce: Duration,
) {
    tokio::select! {
        _ = cancel.cancelled() => {
            tracing::debug!("search {} superseded before sending", token);
            return;
        }
        _ = tokio::time::sleep(debounce) => {}
    }

    if !shared.mark_in_flight(token) {
        return;
    }

    let result = source.fetch_trips(&term, &cancel).await;
    shared.settle(token, &cancel, result);
}

/// Toggle the keywords of `tag` within `term`.
///
/// If every keyword of `tag` already appears in `term` (ignoring case) they are all removed;
/// otherwise the missing ones are appended. Keywords are re-joined with single spaces.
pub fn toggled_term(term: &str, tag: &str) -> String {
    let mut current = Keyword::split(term);
    let toggled = Keyword::split(tag);
    if toggled.is_empty() {
        return term.to_string();
    }

    let present = |keyword: &Keyword, within: &[Keyword]| {
        within.iter().any(|k| k.folded() == keyword.folded())
    };

    if toggled.iter().all(|k| present(k, &current[..])) {
        current.retain(|k| !present(k, &toggled[..]));
    } else {
        for keyword in toggled {
            if !present(&keyword, &current[..]) {
                current.push(keyword);
            }
        }
    }

    current
        .iter()
        .map(Keyword::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
