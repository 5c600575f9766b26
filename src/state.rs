use std::sync::Arc;

use crate::api::{MealDbClient, RecipeApi};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: Arc<dyn RecipeApi>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let api = Arc::new(MealDbClient::new(&config.api)) as Arc<dyn RecipeApi>;
        Ok(Self { config, api })
    }

    pub fn from_parts(config: Arc<AppConfig>, api: Arc<dyn RecipeApi>) -> Self {
        Self { config, api }
    }

    #[cfg(test)]
    pub fn fake(api: crate::api::fake::FakeApi) -> (Self, Arc<crate::api::fake::FakeApi>) {
        Self::fake_with(AppConfig::default(), api)
    }

    #[cfg(test)]
    pub fn fake_with(
        config: AppConfig,
        api: crate::api::fake::FakeApi,
    ) -> (Self, Arc<crate::api::fake::FakeApi>) {
        let api = Arc::new(api);
        let state = Self::from_parts(Arc::new(config), api.clone() as Arc<dyn RecipeApi>);
        (state, api)
    }
}
