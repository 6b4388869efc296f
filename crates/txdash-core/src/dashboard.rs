//! Dashboard state container
//!
//! Holds the single fetched snapshot and turns it, together with the caller's
//! [`ViewParams`], into exactly one renderable [`DashboardState`].
//!
//! Loads are numbered. A load that completes after a newer one has started is
//! discarded, so the most recently started load always wins.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::client::SourceRef;
use crate::error::{ClientError, ClientResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::models::TransactionData;
use crate::view::{compute_stats, compute_view, TransactionStats, TransactionView, ViewParams};

/// Message shown when an error renders as an empty string
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Fetch lifecycle of the snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// A fetch is in flight, or none has completed yet
    Loading,
    /// The last fetch failed; no snapshot is kept
    Failed(ClientError),
    /// The last fetch succeeded
    Loaded(TransactionData),
}

/// What the presentation layer should draw
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardState {
    Loading,
    Error { message: String },
    /// The snapshot holds no transactions at all
    Empty { currency: String },
    Content(TransactionView),
}

/// Snapshot owner shared by every request handler
pub struct Dashboard {
    source: SourceRef,
    page_size: usize,
    state: RwLock<LoadState>,
    generation: AtomicU64,
    logger: Arc<dyn ErrorLogger>,
}

impl Dashboard {
    /// Create a dashboard in the `Loading` state. Nothing is fetched until
    /// [`load`](Self::load) is called.
    pub fn new(source: SourceRef, page_size: usize) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            state: RwLock::new(LoadState::Loading),
            generation: AtomicU64::new(0),
            logger: Arc::new(DefaultErrorLogger),
        }
    }

    /// Replace the error logger
    pub fn with_logger(mut self, logger: Arc<dyn ErrorLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Configured page size
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Default view parameters for this dashboard
    pub fn default_params(&self) -> ViewParams {
        ViewParams::new(self.page_size)
    }

    /// Number of loads started so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Fetch the snapshot and store the outcome.
    ///
    /// Returns the outcome of this particular fetch. The outcome is only
    /// stored when no newer load has started in the meantime.
    pub async fn load(&self) -> ClientResult<()> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            *state = LoadState::Loading;
        }
        log::debug!("Starting load #{}", ticket);

        let result = self
            .source
            .fetch_all()
            .await
            .map_err(|error| ClientError::from_source(error, ClientError::Unknown));

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            let outcome = if result.is_ok() { "success" } else { "failure" };
            self.logger.log_debug(
                "Discarding stale load result",
                &ErrorContext::new("load")
                    .with_generation(ticket)
                    .with_data("outcome", serde_json::json!(outcome)),
            );
            return result.map(|_| ());
        }

        match result {
            Ok(data) => {
                log::info!(
                    "Loaded {} transactions (load #{})",
                    data.transactions.len(),
                    ticket
                );
                *state = LoadState::Loaded(data);
                Ok(())
            }
            Err(error) => {
                self.logger
                    .log_error(&error, &ErrorContext::new("load").with_generation(ticket));
                *state = LoadState::Failed(error.clone());
                Err(error)
            }
        }
    }

    /// Fetch again. View parameters live with the caller and are untouched.
    pub async fn refetch(&self) -> ClientResult<()> {
        self.load().await
    }

    /// Current load state
    pub async fn load_state(&self) -> LoadState {
        self.state.read().await.clone()
    }

    /// Current snapshot, if the last load succeeded
    pub async fn snapshot(&self) -> Option<TransactionData> {
        match &*self.state.read().await {
            LoadState::Loaded(data) => Some(data.clone()),
            _ => None,
        }
    }

    /// Statistics over the snapshot; all zero without one
    pub async fn stats(&self) -> TransactionStats {
        match &*self.state.read().await {
            LoadState::Loaded(data) => compute_stats(data),
            _ => TransactionStats::default(),
        }
    }

    /// Resolve the renderable state for `params`
    pub async fn state(&self, params: &ViewParams) -> DashboardState {
        match &*self.state.read().await {
            LoadState::Loading => DashboardState::Loading,
            LoadState::Failed(error) => DashboardState::Error {
                message: error_message(error),
            },
            LoadState::Loaded(data) if data.is_empty() => DashboardState::Empty {
                currency: data.currency.clone(),
            },
            LoadState::Loaded(data) => DashboardState::Content(compute_view(data, params)),
        }
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("page_size", &self.page_size)
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

fn error_message(error: &ClientError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
