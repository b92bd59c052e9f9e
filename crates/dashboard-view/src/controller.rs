//! View state controller
//!
//! Owns the dashboard's [`ViewState`] and runs its two request families:
//! ticker search and analysis. Each family has its own loading flag and a
//! monotonically increasing request token; only the latest request of a
//! family may write its result, and a drop guard clears the loading flag
//! however the request ends (success, failure or task cancellation).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::DashboardBackend;
use crate::model::{AnalysisKind, StockSnapshot, TickerQuery};

/// Everything the dashboard displays
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Ticker input text
    pub ticker: String,
    /// A ticker search is in flight
    pub loading: bool,
    /// Last error, from either request family
    pub error: Option<String>,
    /// Dataset of the last successful search
    pub data: Option<StockSnapshot>,
    pub selected_analysis: Option<AnalysisKind>,
    /// Prose of the last successful analysis
    pub analysis: Option<String>,
    /// An analysis request is in flight
    pub analysis_loading: bool,
}

/// How a controller request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Precondition not met; no request was issued
    Skipped,
    /// Result (data or error) was written to the view state
    Applied,
    /// A newer request of the same family started first; result dropped
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestFamily {
    Search,
    Analysis,
}

#[derive(Debug, Default)]
struct Shared {
    view: ViewState,
    search_seq: u64,
    analysis_seq: u64,
}

impl Shared {
    fn is_current(&self, family: RequestFamily, token: u64) -> bool {
        match family {
            RequestFamily::Search => self.search_seq == token,
            RequestFamily::Analysis => self.analysis_seq == token,
        }
    }

    fn clear_loading(&mut self, family: RequestFamily) {
        match family {
            RequestFamily::Search => self.view.loading = false,
            RequestFamily::Analysis => self.view.analysis_loading = false,
        }
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears a family's loading flag on drop, unless a newer request owns it
struct LoadingGuard {
    shared: Arc<Mutex<Shared>>,
    family: RequestFamily,
    token: u64,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let mut shared = lock(&self.shared);
        if shared.is_current(self.family, self.token) {
            shared.clear_loading(self.family);
        }
    }
}

/// Controller for one mounted dashboard.
///
/// Clones share the same state, so a clone can be moved into a spawned
/// request task while the host keeps rendering.
pub struct DashboardController<B: ?Sized> {
    backend: Arc<B>,
    shared: Arc<Mutex<Shared>>,
}

impl<B: ?Sized> Clone for DashboardController<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<B: DashboardBackend + ?Sized> DashboardController<B> {
    /// Mount a dashboard with empty state
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            shared: Arc::new(Mutex::new(Shared::default())),
        }
    }

    /// Snapshot of the current view state
    pub fn state(&self) -> ViewState {
        lock(&self.shared).view.clone()
    }

    /// Ticker input handler
    pub fn set_ticker(&self, text: impl Into<String>) {
        lock(&self.shared).view.ticker = text.into();
    }

    /// Search for whatever is in the ticker input
    pub async fn submit_current_ticker(&self) -> RequestOutcome {
        let ticker = self.state().ticker;
        self.submit_ticker_search(&ticker).await
    }

    /// Fetch data for `ticker_text`, replacing the current dataset.
    ///
    /// Blank input is a no-op. Starting a search also discards any
    /// analysis in flight, since it describes the dataset being replaced.
    pub async fn submit_ticker_search(&self, ticker_text: &str) -> RequestOutcome {
        let Some(query) = TickerQuery::parse(ticker_text) else {
            debug!("Ignoring empty ticker search");
            return RequestOutcome::Skipped;
        };

        let token = {
            let mut shared = lock(&self.shared);
            shared.search_seq += 1;
            shared.analysis_seq += 1;

            let view = &mut shared.view;
            view.ticker = ticker_text.trim().to_string();
            view.loading = true;
            view.error = None;
            view.data = None;
            view.selected_analysis = None;
            view.analysis = None;
            view.analysis_loading = false;

            shared.search_seq
        };
        let guard = LoadingGuard {
            shared: Arc::clone(&self.shared),
            family: RequestFamily::Search,
            token,
        };

        info!(ticker = %query, "Searching ticker");
        let result = self.backend.fetch_stock(&query).await;

        let outcome = {
            let mut shared = lock(&self.shared);
            if shared.is_current(RequestFamily::Search, token) {
                match result {
                    Ok(snapshot) => {
                        debug!(
                            ticker = %query,
                            quarters = snapshot.quarterly_data.len(),
                            "Search succeeded"
                        );
                        shared.view.data = Some(snapshot);
                    }
                    Err(err) => {
                        warn!(ticker = %query, error = %err, "Search failed");
                        shared.view.error = Some(err.to_string());
                    }
                }
                RequestOutcome::Applied
            } else {
                debug!(ticker = %query, "Dropping superseded search response");
                RequestOutcome::Superseded
            }
        };

        drop(guard);
        outcome
    }

    /// Request `kind` commentary for the current dataset.
    ///
    /// No-op while no dataset is loaded.
    pub async fn request_analysis(&self, kind: AnalysisKind) -> RequestOutcome {
        let (token, snapshot) = {
            let mut shared = lock(&self.shared);
            let Some(snapshot) = shared.view.data.clone() else {
                debug!(%kind, "Ignoring analysis request without data");
                return RequestOutcome::Skipped;
            };
            shared.analysis_seq += 1;

            let view = &mut shared.view;
            view.analysis_loading = true;
            view.selected_analysis = Some(kind);
            view.analysis = None;

            (shared.analysis_seq, snapshot)
        };
        let guard = LoadingGuard {
            shared: Arc::clone(&self.shared),
            family: RequestFamily::Analysis,
            token,
        };

        info!(%kind, ticker = %snapshot.company_info.ticker, "Requesting analysis");
        let result = self.backend.request_analysis(kind, &snapshot).await;

        let outcome = {
            let mut shared = lock(&self.shared);
            if shared.is_current(RequestFamily::Analysis, token) {
                match result {
                    Ok(text) => shared.view.analysis = Some(text),
                    Err(err) => {
                        warn!(%kind, error = %err, "Analysis failed");
                        shared.view.error = Some(err.to_string());
                    }
                }
                RequestOutcome::Applied
            } else {
                debug!(%kind, "Dropping superseded analysis response");
                RequestOutcome::Superseded
            }
        };

        drop(guard);
        outcome
    }
}

impl<B: DashboardBackend + ?Sized + 'static> DashboardController<B> {
    /// Run [`Self::submit_ticker_search`] as a tokio task
    pub fn spawn_ticker_search(&self, ticker_text: impl Into<String>) -> JoinHandle<RequestOutcome> {
        let controller = self.clone();
        let ticker_text = ticker_text.into();
        tokio::spawn(async move { controller.submit_ticker_search(&ticker_text).await })
    }

    /// Run [`Self::request_analysis`] as a tokio task
    pub fn spawn_analysis(&self, kind: AnalysisKind) -> JoinHandle<RequestOutcome> {
        let controller = self.clone();
        tokio::spawn(async move { controller.request_analysis(kind).await })
    }
}
