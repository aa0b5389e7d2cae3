//! Nutritionix API configuration
//!
//! Credentials are read once at startup and handed to the client; nothing
//! else reads the environment.

use serde::Serialize;

/// Public Nutritionix natural-language nutrients endpoint
pub const DEFAULT_ENDPOINT: &str = "https://trackapi.nutritionix.com/v2/natural/nutrients";

pub const APP_ID_VAR: &str = "NUTRITIONIX_APP_ID";
pub const APP_KEY_VAR: &str = "NUTRITIONIX_APP_KEY";
pub const ENDPOINT_VAR: &str = "NUTRITIONIX_ENDPOINT";

/// Credentials and endpoint for the lookup service
#[derive(Debug, Clone, Serialize)]
pub struct NutritionixConfig {
    pub app_id: String,
    #[serde(skip_serializing)]
    pub app_key: String,
    pub endpoint: String,
}

impl NutritionixConfig {
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Load from the process environment.
    ///
    /// Missing credentials become empty strings; requests are then rejected
    /// by the service rather than locally.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            app_id: lookup(APP_ID_VAR).unwrap_or_default(),
            app_key: lookup(APP_KEY_VAR).unwrap_or_default(),
            endpoint: lookup(ENDPOINT_VAR)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }

    /// Point the client at a different endpoint (mock servers, proxies)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn has_credentials(&self) -> bool {
        !self.app_id.is_empty() && !self.app_key.is_empty()
    }
}
