//! reqwest implementation of the dashboard backend

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::DashboardBackend;
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::model::{AnalysisKind, StockSnapshot, TickerQuery};

const STOCK_FALLBACK_ERROR: &str = "Failed to fetch stock data";

/// HTTP client for the dashboard backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a client from a validated configuration
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url()?,
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `segments` to the base path, each percent-encoded as a
    /// single path segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(DashboardError::InvalidTicker((*segment).to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                DashboardError::Config(format!("{} cannot be used as a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Turn a non-2xx response into a `Server` error
    async fn failure(response: Response, fallback: &str) -> DashboardError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let err = DashboardError::from_failure_body(status, &body, fallback);
        warn!(status, error = %err, "Backend request failed");
        err
    }
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    #[instrument(skip_all, fields(ticker = %ticker))]
    async fn fetch_stock(&self, ticker: &TickerQuery) -> Result<StockSnapshot> {
        let url = self.endpoint(&["api", "stock", ticker.as_str()])?;
        debug!(%url, "Fetching stock data");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Self::failure(response, STOCK_FALLBACK_ERROR).await);
        }

        let body = response.bytes().await?;
        let snapshot: StockSnapshot = serde_json::from_slice(&body)?;
        debug!(
            quarters = snapshot.quarterly_data.len(),
            "Stock data received"
        );
        Ok(snapshot)
    }

    #[instrument(skip_all, fields(kind = %kind))]
    async fn request_analysis(
        &self,
        kind: AnalysisKind,
        snapshot: &StockSnapshot,
    ) -> Result<String> {
        let url = self.endpoint(&["api", kind.as_str()])?;
        debug!(%url, "Requesting analysis");

        let response = self.client.post(url).json(snapshot).send().await?;
        if !response.status().is_success() {
            let fallback = format!("Failed to get {}", kind.label().to_lowercase());
            return Err(Self::failure(response, &fallback).await);
        }

        let body: Value = serde_json::from_slice(&response.bytes().await?)?;
        let field = kind.response_field();
        body.get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(DashboardError::MissingField { field })
    }
}
