use std::str::FromStr;

use futures_util::future::join_all;
use tracing::{debug, info, instrument, warn};

use super::dto::{Category, Filter, Meal};
use crate::api::dto::meal_id;
use crate::api::RecipeApi;
use crate::error::{ApiError, LoadError, UnknownPolicy};

/// What to do with a listing when some detail lookups fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FanOutPolicy {
    /// Any failed lookup fails the whole load.
    #[default]
    DiscardOnFailure,
    /// Keep the meals that resolved; fail only if none did.
    KeepPartial,
}

impl FromStr for FanOutPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" => Ok(Self::DiscardOnFailure),
            "partial" => Ok(Self::KeepPartial),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadLimits {
    /// Lookups per search or category listing.
    pub search: usize,
    /// Lookups for the unfiltered listing.
    pub initial: usize,
    /// Category shown when no filter is active.
    pub default_category: String,
}

impl Default for LoadLimits {
    fn default() -> Self {
        Self {
            search: 20,
            initial: 15,
            default_category: "Beef".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealBatch {
    pub meals: Vec<Meal>,
    /// Lookups that failed and were dropped under [`FanOutPolicy::KeepPartial`].
    pub failed: usize,
}

#[instrument(skip(api))]
pub async fn load_categories(api: &dyn RecipeApi) -> Result<Vec<Category>, LoadError> {
    let res = api.categories().await?;
    let categories: Vec<Category> = res
        .categories
        .unwrap_or_default()
        .into_iter()
        .map(Category::from)
        .collect();
    info!(count = categories.len(), "categories loaded");
    Ok(categories)
}

/// Fetches the listing for `filter` and resolves every retained match into a
/// full meal, one lookup per match, all in flight at once.
///
/// A listing without `meals` is an empty batch, not an error.
#[instrument(skip(api, limits))]
pub async fn load_meals(
    api: &dyn RecipeApi,
    limits: &LoadLimits,
    filter: &Filter,
    policy: FanOutPolicy,
) -> Result<MealBatch, LoadError> {
    let (listing, cap) = match filter {
        Filter::Search(text) => (api.search(text).await?, limits.search),
        Filter::Category(name) => (api.filter_by_category(name).await?, limits.search),
        Filter::None => (
            api.filter_by_category(&limits.default_category).await?,
            limits.initial,
        ),
    };

    let Some(matches) = listing.meals else {
        info!("no meals matched");
        return Ok(MealBatch::default());
    };

    let ids: Vec<String> = matches
        .iter()
        .take(cap)
        .filter_map(|raw| {
            let id = meal_id(raw);
            if id.is_none() {
                warn!("listing entry without idMeal skipped");
            }
            id
        })
        .collect();
    debug!(matched = matches.len(), lookups = ids.len(), "resolving meal details");

    let results = join_all(ids.iter().map(|id| lookup_meal(api, id))).await;
    settle(results, policy)
}

async fn lookup_meal(api: &dyn RecipeApi, id: &str) -> Result<Meal, ApiError> {
    api.lookup(id)
        .await?
        .meals
        .and_then(|meals| meals.into_iter().next())
        .and_then(|raw| Meal::from_record(&raw))
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
}

fn settle(results: Vec<Result<Meal, ApiError>>, policy: FanOutPolicy) -> Result<MealBatch, LoadError> {
    let total = results.len();
    let mut meals = Vec::with_capacity(total);
    let mut failed = 0;
    for result in results {
        match result {
            Ok(meal) => meals.push(meal),
            Err(e) => {
                warn!(error = %e, "meal lookup failed");
                failed += 1;
            }
        }
    }

    let rejected = match policy {
        FanOutPolicy::DiscardOnFailure => failed > 0,
        FanOutPolicy::KeepPartial => failed > 0 && failed == total,
    };
    if rejected {
        return Err(LoadError::Lookups { failed, total });
    }

    info!(count = meals.len(), failed, "meals loaded");
    Ok(MealBatch { meals, failed })
}
