//! Backend API used by the dashboard

pub mod http;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{AnalysisKind, StockSnapshot, TickerQuery};

pub use http::HttpBackend;

/// The four backend calls the dashboard makes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    /// `GET /api/stock/{TICKER}`
    async fn fetch_stock(&self, ticker: &TickerQuery) -> Result<StockSnapshot>;

    /// `POST /api/{kind}` with the dataset as body; returns the prose text
    async fn request_analysis(&self, kind: AnalysisKind, snapshot: &StockSnapshot)
    -> Result<String>;
}
