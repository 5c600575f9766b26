use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{CategoriesResponse, MealsResponse, RecipeApi};
use crate::config::ApiConfig;
use crate::error::ApiError;

#[derive(Clone)]
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("mealdb-browser/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to build http client, using defaults");
                Client::new()
            });
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Network {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| ApiError::Network {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;
        debug!(endpoint, bytes = text.len(), "response received");

        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl RecipeApi for MealDbClient {
    #[instrument(skip(self))]
    async fn categories(&self) -> Result<CategoriesResponse, ApiError> {
        self.get_json("categories.php", &[]).await
    }

    #[instrument(skip(self))]
    async fn search(&self, text: &str) -> Result<MealsResponse, ApiError> {
        self.get_json("search.php", &[("s", text)]).await
    }

    #[instrument(skip(self))]
    async fn filter_by_category(&self, category: &str) -> Result<MealsResponse, ApiError> {
        self.get_json("filter.php", &[("c", category)]).await
    }

    #[instrument(skip(self))]
    async fn lookup(&self, id: &str) -> Result<MealsResponse, ApiError> {
        self.get_json("lookup.php", &[("i", id)]).await
    }
}
