use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, instrument};

use crate::error::LoadError;
use crate::meals::{load_categories, load_meals};
use crate::state::AppState;
use crate::view::{Commit, Intent, LoadMode, LoadTicket, ViewState};

/// Outcome of one listing load as seen by the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub generation: u64,
    pub commit: Commit,
    /// Number of meals on success.
    pub result: Result<usize, LoadError>,
}

/// Owns the view state and runs loads against the recipe API.
#[derive(Clone)]
pub struct Browser {
    state: AppState,
    view: Arc<Mutex<ViewState>>,
}

impl Browser {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            view: Arc::new(Mutex::new(ViewState::new())),
        }
    }

    pub async fn snapshot(&self) -> ViewState {
        self.view.lock().await.clone()
    }

    /// Loads the category chips once. On failure the current chips stay.
    pub async fn load_categories(&self) -> Result<usize, LoadError> {
        match load_categories(self.state.api.as_ref()).await {
            Ok(categories) => {
                let count = categories.len();
                self.view.lock().await.set_categories(categories);
                Ok(count)
            }
            Err(e) => {
                error!(error = %e, "failed to load categories");
                Err(e)
            }
        }
    }

    /// Applies an intent to the view state without waiting for any load.
    pub async fn apply(&self, intent: Intent) -> Option<LoadTicket> {
        self.view.lock().await.apply(intent)
    }

    /// Starts a load of the current filter, e.g. the first listing on startup.
    pub async fn reload(&self) -> LoadTicket {
        self.view.lock().await.begin_load(LoadMode::Full)
    }

    /// Fetches the listing for `ticket` and commits it if still current.
    #[instrument(skip(self), fields(generation = ticket.generation))]
    pub async fn run(&self, ticket: LoadTicket) -> LoadReport {
        let config = &self.state.config;
        let outcome = load_meals(
            self.state.api.as_ref(),
            &config.limits,
            &ticket.filter,
            config.fan_out,
        )
        .await;

        if let Err(e) = &outcome {
            error!(error = %e, filter = ?ticket.filter, "failed to load meals");
        }
        let result = outcome.as_ref().map(|b| b.meals.len()).map_err(Clone::clone);

        let commit = self.view.lock().await.commit(&ticket, outcome);
        if commit == Commit::Stale {
            info!("load superseded by a newer one");
        }

        LoadReport {
            generation: ticket.generation,
            commit,
            result,
        }
    }

    /// Applies an intent and, when it needs one, runs the load to completion.
    #[cfg(test)]
    pub async fn dispatch(&self, intent: Intent) -> Option<LoadReport> {
        let ticket = self.apply(intent).await?;
        Some(self.run(ticket).await)
    }
}
