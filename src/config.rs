use std::time::Duration;

use serde::Deserialize;

use crate::meals::services::{FanOutPolicy, LoadLimits};

pub const DEFAULT_API_BASE: &str = "https://www.themealdb.com/api/json/v1/1";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub limits: LoadLimits,
    pub fan_out: FanOutPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_BASE.into(),
                timeout_secs: 15,
            },
            limits: LoadLimits::default(),
            fan_out: FanOutPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let base_url = get("MEALDB_API_BASE")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api.base_url);
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!("MEALDB_API_BASE must be an http(s) url, got {base_url:?}");
        }

        let api = ApiConfig {
            base_url,
            timeout_secs: positive_or(get("MEALDB_TIMEOUT_SECS"), defaults.api.timeout_secs),
        };

        let limits = LoadLimits {
            search: positive_or(get("MEALDB_SEARCH_LIMIT"), defaults.limits.search),
            initial: positive_or(get("MEALDB_DEFAULT_LIMIT"), defaults.limits.initial),
            default_category: get("MEALDB_DEFAULT_CATEGORY")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.limits.default_category),
        };

        let fan_out = match get("MEALDB_FANOUT_POLICY").as_deref() {
            None => defaults.fan_out,
            Some(v) => v.parse()?,
        };

        Ok(Self {
            api,
            limits,
            fan_out,
        })
    }
}

/// Parses a count or duration. Zero and garbage both mean "use the default".
fn positive_or<T>(value: Option<String>, default: T) -> T
where
    T: std::str::FromStr + PartialOrd + Default,
{
    value
        .and_then(|v| v.trim().parse::<T>().ok())
        .filter(|n| *n > T::default())
        .unwrap_or(default)
}
