use std::time::Duration;

use crate::api::ApiError;

/// Where the backend lives and how long to wait for it.
///
/// | env var                 | field          | default                      |
/// |-------------------------|----------------|------------------------------|
/// | `SHOP_API_URL`          | `base_url`     | `http://localhost:8080/api`  |
/// | `SHOP_API_TIMEOUT_SECS` | `timeout_secs` | `30`                         |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Root URL every route is joined onto. A trailing slash is ignored.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(
        mut self,
        seconds: u64,
    ) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Replaces the base URL after checking it is an http(s) URL.
    ///
    /// # Errors
    /// [`ApiError::Configuration`] for anything else.
    pub fn with_base_url(
        mut self,
        url: &str,
    ) -> Result<Self, ApiError> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ApiError::Configuration(format!(
                "base URL must be an http(s) URL, got '{url}'"
            )));
        }
        self.base_url = url.to_string();
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reads the configuration from the environment, falling back to the
    /// defaults for unset variables.
    ///
    /// # Errors
    /// [`ApiError::Configuration`] when a variable is set but unusable.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = Self::default();

        if let Some(url) = lookup("SHOP_API_URL") {
            config = config.with_base_url(&url)?;
        }

        if let Some(secs) = lookup("SHOP_API_TIMEOUT_SECS") {
            config.timeout_secs = secs.trim().parse().map_err(|e| {
                ApiError::Configuration(format!("invalid SHOP_API_TIMEOUT_SECS '{secs}': {e}"))
            })?;
        }

        Ok(config)
    }
}
