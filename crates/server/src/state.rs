use std::sync::Arc;

use cinedeck_metadata::{MovieApi, lookup_many};
use tokio::sync::Mutex;
use tracing::debug;

use crate::controller::{CloseReason, Controller, PageView, SearchOutcome};

/// Shared application state passed to all handlers.
///
/// The controller lock is never held across a network call: each action
/// takes a ticket under the lock, releases it for the fetch, then re-locks
/// to apply the outcome.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn MovieApi>,
    pub controller: Arc<Mutex<Controller>>,
    pub catalogue: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(api: Arc<dyn MovieApi>, catalogue: Vec<String>) -> Self {
        Self {
            api,
            controller: Arc::new(Mutex::new(Controller::new())),
            catalogue: Arc::new(catalogue),
        }
    }

    /// Load the default catalogue.
    pub async fn load_catalogue(&self) {
        let ticket = self.controller.lock().await.begin_initial_load();
        debug!(count = self.catalogue.len(), provider = self.api.name(), "loading catalogue");

        let results = lookup_many(self.api.as_ref(), self.catalogue.as_slice()).await;
        self.controller
            .lock()
            .await
            .finish_initial_load(&ticket, results);
    }

    pub async fn submit_search(&self, query: &str) {
        let Some(ticket) = self.controller.lock().await.begin_search(query) else {
            return;
        };
        let query = ticket.query().unwrap_or_default();

        let outcome = match self.api.search_by_title(query).await {
            Ok(hits) => {
                for h in &hits {
                    debug!(
                        id = %h.id,
                        title = %h.title,
                        kind = ?h.kind,
                        year = ?h.year,
                        "search hit"
                    );
                }
                let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
                let results = lookup_many(self.api.as_ref(), ids.as_slice()).await;
                Ok(SearchOutcome {
                    hit_count: hits.len(),
                    results,
                })
            }
            Err(e) => Err(e),
        };

        self.controller.lock().await.finish_search(&ticket, outcome);
    }

    pub async fn select_genre(&self, genre: &str) {
        self.controller.lock().await.select_genre(genre);
    }

    pub async fn open_detail(&self, id: &str) {
        let ticket = self.controller.lock().await.begin_detail(id);
        let outcome = self.api.lookup_detail(&ticket.id).await;
        self.controller.lock().await.finish_detail(&ticket, outcome);
    }

    pub async fn close_modal(&self, reason: CloseReason) {
        self.controller.lock().await.close_modal(reason);
    }

    /// Snapshot of everything the page displays.
    pub async fn view(&self) -> PageView {
        self.controller.lock().await.view().clone()
    }
}
