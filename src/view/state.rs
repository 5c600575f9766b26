use time::OffsetDateTime;
use tracing::debug;

use crate::error::LoadError;
use crate::meals::{Category, Filter, Meal, MealBatch};

/// A user action on the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Typing in the search box; nothing is fetched.
    EditSearch(String),
    /// Submitting the search box with this text.
    SubmitSearch(String),
    SelectCategory(String),
    /// Clear filters, or the "All" chip.
    ClearFilters,
    /// Pull-to-refresh on the current filter.
    Refresh,
    /// Tap the card at this grid position.
    OpenMeal(usize),
    CloseMeal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Full-screen spinner when there is nothing to show yet.
    Full,
    /// Lightweight indicator over the existing list.
    Refresh,
}

/// Issued by [`ViewState::begin_load`]; only the newest ticket may commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub filter: Filter,
    pub mode: LoadMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    /// A newer load was started; the outcome was dropped.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub filter: Filter,
    pub search_input: String,
    pub meals: Vec<Meal>,
    pub categories: Vec<Category>,
    pub selected: Option<Meal>,
    pub loading: bool,
    pub refreshing: bool,
    pub last_error: Option<String>,
    pub last_updated: Option<OffsetDateTime>,
    generation: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Applies an intent and returns a ticket when it requires a reload.
    pub fn apply(&mut self, intent: Intent) -> Option<LoadTicket> {
        match intent {
            Intent::EditSearch(text) => {
                self.search_input = text;
                None
            }
            Intent::SubmitSearch(text) => {
                let filter = Filter::search(&text);
                self.search_input = text;
                if !filter.is_active() {
                    return None;
                }
                self.filter = filter;
                Some(self.begin_load(LoadMode::Full))
            }
            Intent::SelectCategory(name) => {
                self.search_input.clear();
                self.filter = Filter::Category(name);
                Some(self.begin_load(LoadMode::Full))
            }
            Intent::ClearFilters => {
                self.search_input.clear();
                self.filter = Filter::None;
                Some(self.begin_load(LoadMode::Full))
            }
            Intent::Refresh => Some(self.begin_load(LoadMode::Refresh)),
            Intent::OpenMeal(index) => {
                if let Some(meal) = self.meals.get(index) {
                    self.selected = Some(meal.clone());
                }
                None
            }
            Intent::CloseMeal => {
                self.selected = None;
                None
            }
        }
    }

    pub fn begin_load(&mut self, mode: LoadMode) -> LoadTicket {
        self.generation += 1;
        match mode {
            LoadMode::Full => self.loading = true,
            LoadMode::Refresh => self.refreshing = true,
        }
        LoadTicket {
            generation: self.generation,
            filter: self.filter.clone(),
            mode,
        }
    }

    /// Commits the outcome of a load.
    ///
    /// The list always shows the latest successful outcome: an empty batch
    /// clears it, a failure leaves it untouched and sets `last_error`.
    pub fn commit(&mut self, ticket: &LoadTicket, outcome: Result<MealBatch, LoadError>) -> Commit {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping stale load"
            );
            return Commit::Stale;
        }

        self.loading = false;
        self.refreshing = false;
        match outcome {
            Ok(batch) => {
                self.meals = batch.meals;
                self.last_error = (batch.failed > 0)
                    .then(|| format!("{} recipe(s) could not be loaded", batch.failed));
                self.last_updated = Some(OffsetDateTime::now_utc());
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
        Commit::Applied
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn show_spinner(&self) -> bool {
        self.loading && self.meals.is_empty()
    }

    pub fn show_empty(&self) -> bool {
        !self.loading && self.meals.is_empty()
    }
}
