//! Debounced member search.
//!
//! [`UserSearch`] turns keystrokes in the "invite member" box into at most
//! one backend request per pause in typing. Results are published through a
//! `tokio::sync::watch` channel so a view can re-render on every change.
//!
//! Guarantees:
//! - Queries shorter than [`SearchSettings::min_chars`] clear the results and
//!   never reach the backend.
//! - A keystroke within the debounce window cancels the pending request and
//!   restarts the timer.
//! - Only results for the most recent query are ever published.
//! - Dropping the controller cancels its pending work; nothing is published
//!   afterwards.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use taskboard_invite::{ProjectId, UserSummary};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::TaskboardClient;
use crate::error::ClientResult;

/// Source of invitable users for a project.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find users matching `query` that can be invited to `project_id`.
    async fn search_users(
        &self,
        project_id: ProjectId,
        query: &str,
    ) -> ClientResult<Vec<UserSummary>>;
}

#[async_trait]
impl UserDirectory for TaskboardClient {
    async fn search_users(
        &self,
        project_id: ProjectId,
        query: &str,
    ) -> ClientResult<Vec<UserSummary>> {
        TaskboardClient::search_users(self, project_id, query).await
    }
}

/// Timing and threshold for member search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Quiet period after the last keystroke before a request is sent.
    pub debounce: Duration,

    /// Minimum query length (in characters) that triggers a request.
    pub min_chars: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_chars: 2,
        }
    }
}

/// What the search box currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSnapshot {
    /// Query as last typed.
    pub query: String,

    /// Users matching the most recent completed query.
    pub results: Vec<UserSummary>,

    /// A request for `query` is in flight.
    pub loading: bool,

    /// Why the last request failed; results are empty when set.
    pub error: Option<String>,
}

/// Debounced search controller for one project's invite box.
///
/// Must be driven from within a Tokio runtime.
pub struct UserSearch<D: ?Sized> {
    directory: Arc<D>,
    project_id: ProjectId,
    settings: SearchSettings,
    latest: Arc<AtomicU64>,
    state: Arc<watch::Sender<SearchSnapshot>>,
    pending: Option<JoinHandle<()>>,
}

impl<D> UserSearch<D>
where
    D: UserDirectory + ?Sized + 'static,
{
    /// Creates an idle search over `directory` for `project_id`.
    pub fn new(directory: Arc<D>, project_id: ProjectId, settings: SearchSettings) -> Self {
        let (state, _) = watch::channel(SearchSnapshot::default());
        Self {
            directory,
            project_id,
            settings,
            latest: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
            pending: None,
        }
    }

    /// Receive every state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.state.subscribe()
    }

    /// Current state.
    pub fn snapshot(&self) -> SearchSnapshot {
        self.state.borrow().clone()
    }

    /// Users from the most recent completed query.
    pub fn results(&self) -> Vec<UserSummary> {
        self.state.borrow().results.clone()
    }

    /// Handle a change of the search box.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.cancel_pending();
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        if query.chars().count() < self.settings.min_chars {
            self.state.send_modify(|s| {
                s.query = query;
                s.results.clear();
                s.loading = false;
                s.error = None;
            });
            return;
        }

        let published = query.clone();
        self.state.send_modify(|s| {
            s.query = published;
            s.loading = false;
        });

        let directory = Arc::clone(&self.directory);
        let latest = Arc::clone(&self.latest);
        let state = Arc::clone(&self.state);
        let debounce = self.settings.debounce;
        let project_id = self.project_id;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let current = state.send_if_modified(|s| {
                if latest.load(Ordering::SeqCst) != generation {
                    return false;
                }
                s.loading = true;
                true
            });
            if !current {
                return;
            }

            debug!(project_id, query = %query, "Searching invitable users");
            let outcome = directory.search_users(project_id, &query).await;

            state.send_if_modified(|s| {
                if latest.load(Ordering::SeqCst) != generation {
                    debug!(query = %query, "Discarding stale search results");
                    return false;
                }
                s.loading = false;
                match outcome {
                    Ok(users) => {
                        s.results = users;
                        s.error = None;
                    }
                    Err(e) => {
                        warn!(query = %query, error = %e, "Member search failed");
                        s.results.clear();
                        s.error = Some(e.to_string());
                    }
                }
                true
            });
        }));
    }

    /// Empty the box and forget any results.
    pub fn clear(&mut self) {
        self.set_query(String::new());
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl<D: ?Sized> Drop for UserSearch<D> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
