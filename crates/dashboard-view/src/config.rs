//! Configuration for the dashboard backend client

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default backend address (the analysis service's development port)
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

/// Environment variable overriding the backend address
pub const ENV_API_BASE: &str = "DASHBOARD_API_BASE";

/// Configuration for talking to the dashboard backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Backend base URL; endpoints live under `{api_base}/api/`
    pub api_base: String,

    /// Per-request timeout. `None` leaves requests to the transport
    pub request_timeout: Option<Duration>,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: None,
            user_agent: concat!("stock-dashboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Load the backend address from `DASHBOARD_API_BASE`
    pub fn with_env_api_base(mut self) -> Self {
        if let Ok(base) = std::env::var(ENV_API_BASE) {
            self.api_base = base;
        }
        self
    }

    /// Parsed base URL
    pub fn base_url(&self) -> Result<Url> {
        let mut url = Url::parse(self.api_base.trim())?;
        // Without a trailing slash `join` would replace the last path segment
        if !url.path().ends_with('/') {
            url.set_path(&format!("{}/", url.path()));
        }
        Ok(url)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            return Err(DashboardError::Config("api_base must not be empty".to_string()));
        }

        let url = self.base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DashboardError::Config(format!(
                "api_base must be an http(s) URL, got scheme '{}'",
                url.scheme()
            )));
        }

        if self.request_timeout == Some(Duration::ZERO) {
            return Err(DashboardError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for DashboardConfig
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    api_base: Option<String>,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl DashboardConfigBuilder {
    /// Set the backend base URL
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set a request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Load the backend address from environment unless already set
    pub fn with_env_api_base(mut self) -> Self {
        if self.api_base.is_none() {
            if let Ok(base) = std::env::var(ENV_API_BASE) {
                self.api_base = Some(base);
            }
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DashboardConfig> {
        let defaults = DashboardConfig::default();

        let config = DashboardConfig {
            api_base: self.api_base.unwrap_or(defaults.api_base),
            request_timeout: self.request_timeout.or(defaults.request_timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        };

        config.validate()?;
        Ok(config)
    }
}
