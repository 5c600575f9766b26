use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::{CategoriesResponse, CategoryRecord, MealsResponse, RawMeal, RecipeApi};
use crate::error::ApiError;

/// In-memory recipe API that records every call.
#[derive(Default)]
pub struct FakeApi {
    categories: Vec<String>,
    categories_fail: bool,
    listings_fail: bool,
    searches: HashMap<String, Vec<String>>,
    by_category: HashMap<String, Vec<String>>,
    details: HashMap<String, RawMeal>,
    failing_lookups: HashSet<String>,
    delays: HashMap<String, Duration>,
    pub lookups: Mutex<Vec<String>>,
    pub listings: Mutex<Vec<String>>,
    lookups_in_flight: AtomicUsize,
    peak_lookups: AtomicUsize,
}

pub fn detail_record(id: &str, name: &str, category: &str) -> RawMeal {
    let v = json!({
        "idMeal": id,
        "strMeal": name,
        "strMealThumb": format!("https://img.local/{id}.jpg"),
        "strCategory": category,
        "strArea": "British",
        "strInstructions": "Cook it.",
        "strTags": null,
        "strYoutube": "",
        "strIngredient1": "Salt",
        "strMeasure1": "1 tsp",
        "strIngredient2": "Water",
        "strMeasure2": "",
    });
    v.as_object().cloned().unwrap_or_default()
}

fn partial_record(raw: &RawMeal) -> RawMeal {
    ["idMeal", "strMeal", "strMealThumb"]
        .into_iter()
        .filter_map(|k| raw.get(k).map(|v| (k.to_string(), v.clone())))
        .collect()
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(mut self, names: &[&str]) -> Self {
        self.categories = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Registers a meal and lists it under its category.
    pub fn with_meal(mut self, id: &str, name: &str, category: &str) -> Self {
        self.details.insert(id.into(), detail_record(id, name, category));
        self.by_category
            .entry(category.into())
            .or_default()
            .push(id.into());
        self
    }

    /// Registers `count` meals `{prefix}-1..` under `category`.
    pub fn with_many(mut self, prefix: &str, category: &str, count: usize) -> Self {
        for n in 1..=count {
            self = self.with_meal(&format!("{prefix}-{n}"), &format!("{prefix} {n}"), category);
        }
        self
    }

    pub fn with_search(mut self, text: &str, ids: &[&str]) -> Self {
        self.searches
            .insert(text.into(), ids.iter().map(|i| i.to_string()).collect());
        self
    }

    pub fn failing_lookup(mut self, id: &str) -> Self {
        self.failing_lookups.insert(id.into());
        self
    }

    pub fn failing_categories(mut self) -> Self {
        self.categories_fail = true;
        self
    }

    pub fn failing_listings(mut self) -> Self {
        self.listings_fail = true;
        self
    }

    /// Delays the call for a key such as `search:soup`, `filter:Beef` or
    /// `lookup:52771`.
    pub fn delayed(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.into(), delay);
        self
    }

    pub fn lookup_calls(&self) -> Vec<String> {
        self.lookups.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn listing_calls(&self) -> Vec<String> {
        self.listings.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Highest number of lookups that were pending at the same moment.
    pub fn peak_concurrent_lookups(&self) -> usize {
        self.peak_lookups.load(Ordering::SeqCst)
    }

    async fn listing(&self, key: String, ids: Option<&Vec<String>>) -> Result<MealsResponse, ApiError> {
        if let Ok(mut calls) = self.listings.lock() {
            calls.push(key.clone());
        }
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        if self.listings_fail {
            return Err(ApiError::Network {
                endpoint: key,
                message: "connection refused".into(),
            });
        }
        Ok(match ids {
            Some(ids) => MealsResponse::from_meals(
                ids.iter()
                    .map(|id| {
                        self.details
                            .get(id)
                            .map(partial_record)
                            .unwrap_or_else(|| partial_record(&detail_record(id, id, "Unknown")))
                    })
                    .collect(),
            ),
            None => MealsResponse::none(),
        })
    }
}

#[async_trait]
impl RecipeApi for FakeApi {
    async fn categories(&self) -> Result<CategoriesResponse, ApiError> {
        if self.categories_fail {
            return Err(ApiError::Status {
                endpoint: "categories.php".into(),
                status: 503,
            });
        }
        Ok(CategoriesResponse {
            categories: Some(
                self.categories
                    .iter()
                    .map(|name| CategoryRecord {
                        name: name.clone(),
                        ..Default::default()
                    })
                    .collect(),
            ),
        })
    }

    async fn search(&self, text: &str) -> Result<MealsResponse, ApiError> {
        self.listing(format!("search:{text}"), self.searches.get(text)).await
    }

    async fn filter_by_category(&self, category: &str) -> Result<MealsResponse, ApiError> {
        self.listing(format!("filter:{category}"), self.by_category.get(category))
            .await
    }

    async fn lookup(&self, id: &str) -> Result<MealsResponse, ApiError> {
        if let Ok(mut calls) = self.lookups.lock() {
            calls.push(id.to_string());
        }
        let pending = self.lookups_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_lookups.fetch_max(pending, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&format!("lookup:{id}")) {
            tokio::time::sleep(*delay).await;
        }
        self.lookups_in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_lookups.contains(id) {
            return Err(ApiError::Status {
                endpoint: "lookup.php".into(),
                status: 500,
            });
        }
        Ok(match self.details.get(id) {
            Some(raw) => MealsResponse::from_meals(vec![raw.clone()]),
            None => MealsResponse::none(),
        })
    }
}
