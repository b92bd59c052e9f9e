//! Stock dashboard view
//!
//! This crate is everything a host needs to mount the stock dashboard:
//!
//! - A state controller that runs ticker searches and analysis requests
//!   against the backend and keeps the view state
//! - Formatters for prices, compact currency amounts and percentages
//! - Metric cards comparing the latest quarter with the previous one
//! - A chart adapter feeding an optional chart collaborator
//! - A reqwest client for the backend's four endpoints
//! - A plain-text renderer of the whole dashboard
//!
//! # Example
//!
//! ```rust,no_run
//! use dashboard_view::{AnalysisKind, DashboardConfig, DashboardController, DashboardView, HttpBackend};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> dashboard_view::Result<()> {
//!     let config = DashboardConfig::builder().with_env_api_base().build()?;
//!     let controller = DashboardController::new(Arc::new(HttpBackend::new(&config)?));
//!
//!     controller.submit_ticker_search("aapl").await;
//!     controller.request_analysis(AnalysisKind::Risk).await;
//!
//!     println!("{}", DashboardView::new().render(&controller.state()));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chart;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod metric_card;
pub mod model;
pub mod view;

// Re-export main types for convenience
pub use api::{DashboardBackend, HttpBackend};
pub use chart::{ChartPoint, ChartRenderer, TextBarChart, chart_points};
pub use commands::Command;
pub use config::DashboardConfig;
pub use controller::{DashboardController, RequestOutcome, ViewState};
pub use error::{DashboardError, Result};
pub use format::{format_currency, format_percent, format_price};
pub use metric_card::{Change, MetricCard, Tone};
pub use model::{
    AnalysisKind, CompanyInfo, Employees, Metric, QuarterlyMetrics, QuarterlyRecord,
    StockSnapshot, TickerQuery,
};
pub use view::DashboardView;
