//! Dashboard data model
//!
//! These types mirror the JSON the backend returns for a ticker lookup.
//! Fields the dashboard does not use are kept in `extra` maps so the same
//! dataset can be posted back to the analysis endpoints unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// A ticker symbol ready to be sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TickerQuery(String);

impl TickerQuery {
    /// Trim and upper-case raw input. `None` when nothing is left.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_uppercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TickerQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Headcount as reported by the backend, which sends "N/A" when unknown
/// and may send whole counts as floats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Employees {
    Count(u64),
    Number(f64),
    Text(String),
}

impl fmt::Display for Employees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => f.write_str(&crate::format::group_thousands(&count.to_string())),
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 => {
                f.write_str(&crate::format::group_thousands(&format!("{n:.0}")))
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// `null` reads as an empty string
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Company level information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employees: Option<Employees>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<f64>,
    /// Day change, already in percent units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Metrics tracked per quarter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Revenue,
    NetIncome,
    ProfitMargin,
    Assets,
    Liabilities,
    Eps,
}

impl Metric {
    /// JSON key in the `metrics` object
    pub fn key(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::NetIncome => "NetIncome",
            Self::ProfitMargin => "ProfitMargin",
            Self::Assets => "Assets",
            Self::Liabilities => "Liabilities",
            Self::Eps => "EPS",
        }
    }

    /// Display title
    pub fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::NetIncome => "Net Income",
            Self::ProfitMargin => "Profit Margin",
            Self::Assets => "Total Assets",
            Self::Liabilities => "Total Liabilities",
            Self::Eps => "EPS",
        }
    }
}

/// One quarter's metric values; every metric may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyMetrics {
    #[serde(rename = "Revenue", default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(rename = "NetIncome", default, skip_serializing_if = "Option::is_none")]
    pub net_income: Option<f64>,
    /// Already in percent units
    #[serde(rename = "ProfitMargin", default, skip_serializing_if = "Option::is_none")]
    pub profit_margin: Option<f64>,
    #[serde(rename = "Assets", default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<f64>,
    #[serde(rename = "Liabilities", default, skip_serializing_if = "Option::is_none")]
    pub liabilities: Option<f64>,
    #[serde(rename = "EPS", default, skip_serializing_if = "Option::is_none")]
    pub eps: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuarterlyMetrics {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Revenue => self.revenue,
            Metric::NetIncome => self.net_income,
            Metric::ProfitMargin => self.profit_margin,
            Metric::Assets => self.assets,
            Metric::Liabilities => self.liabilities,
            Metric::Eps => self.eps,
        }
    }
}

/// One fiscal quarter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyRecord {
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub metrics: QuarterlyMetrics,
}

/// Everything a ticker lookup returns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub company_info: CompanyInfo,
    /// Most recent quarter first
    #[serde(default)]
    pub quarterly_data: Vec<QuarterlyRecord>,
}

impl StockSnapshot {
    /// Quarter at index 0
    pub fn latest(&self) -> Option<&QuarterlyRecord> {
        self.quarterly_data.first()
    }

    /// Quarter at index 1
    pub fn previous(&self) -> Option<&QuarterlyRecord> {
        self.quarterly_data.get(1)
    }
}

/// Kind of backend-generated commentary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Analyze,
    Predict,
    Risk,
}

impl AnalysisKind {
    pub const ALL: [Self; 3] = [Self::Analyze, Self::Predict, Self::Risk];

    /// Endpoint path segment
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::Predict => "predict",
            Self::Risk => "risk",
        }
    }

    /// Field of the success body holding the text
    pub fn response_field(self) -> &'static str {
        match self {
            Self::Analyze => "analysis",
            Self::Predict => "prediction",
            Self::Risk => "risk_assessment",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Analyze => "Financial Analysis",
            Self::Predict => "Next Quarter Prediction",
            Self::Risk => "Risk Assessment",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analyze" | "analysis" => Ok(Self::Analyze),
            "predict" | "prediction" => Ok(Self::Predict),
            "risk" => Ok(Self::Risk),
            other => Err(DashboardError::Command(format!(
                "unknown analysis kind '{other}' (expected analyze, predict or risk)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend_payload() -> Value {
        json!({
            "company_info": {
                "name": "Apple Inc.",
                "ticker": "AAPL",
                "sector": "Technology",
                "industry": "Consumer Electronics",
                "description": "Designs phones.",
                "marketCap": 3_400_000_000_000_i64,
                "employees": 161_000,
                "currentPrice": 227.52,
                "previousClose": 225.0,
                "priceChange": 1.12,
                "eps": 6.57,
                "lastUpdated": "2024-11-01 10:00:00",
                "exchange": "NMS"
            },
            "quarterly_data": [
                {
                    "date": "2024-09-30",
                    "metrics": {
                        "Revenue": 94_930_000_000_i64,
                        "NetIncome": 14_736_000_000_i64,
                        "Assets": 364_980_000_000_i64,
                        "Liabilities": 308_030_000_000_i64,
                        "EPS": 0.97,
                        "ProfitMargin": 15.52
                    }
                },
                {
                    "date": "2024-06-30",
                    "metrics": {
                        "Revenue": 85_777_000_000_i64,
                        "NetIncome": null,
                        "Assets": 331_612_000_000_i64,
                        "Liabilities": 264_904_000_000_i64
                    }
                }
            ]
        })
    }

    #[test]
    fn test_ticker_query_normalizes() {
        assert_eq!(TickerQuery::parse("  aapl ").unwrap().as_str(), "AAPL");
        assert!(TickerQuery::parse("").is_none());
        assert!(TickerQuery::parse("   ").is_none());
    }

    #[test]
    fn test_deserialize_backend_payload() {
        let snapshot: StockSnapshot = serde_json::from_value(backend_payload()).unwrap();

        assert_eq!(snapshot.company_info.ticker, "AAPL");
        assert_eq!(snapshot.company_info.employees, Some(Employees::Count(161_000)));
        assert_eq!(snapshot.company_info.price_change, Some(1.12));
        assert_eq!(snapshot.quarterly_data.len(), 2);

        let latest = snapshot.latest().unwrap();
        assert_eq!(latest.date, "2024-09-30");
        assert_eq!(latest.metrics.get(Metric::ProfitMargin), Some(15.52));

        let previous = snapshot.previous().unwrap();
        assert_eq!(previous.metrics.net_income, None);
        assert_eq!(previous.metrics.profit_margin, None);
    }

    #[test]
    fn test_employees_as_text() {
        let info: CompanyInfo =
            serde_json::from_value(json!({"name": "X", "ticker": "X", "employees": "N/A"}))
                .unwrap();
        assert_eq!(info.employees, Some(Employees::Text("N/A".to_string())));
        assert_eq!(Employees::Count(1_234_567).to_string(), "1,234,567");
    }

    #[test]
    fn test_employees_as_float() {
        let info: CompanyInfo =
            serde_json::from_value(json!({"name": "X", "ticker": "X", "employees": 1.5e5}))
                .unwrap();
        assert_eq!(info.employees, Some(Employees::Number(150_000.0)));
        assert_eq!(info.employees.unwrap().to_string(), "150,000");
        assert_eq!(Employees::Number(12.5).to_string(), "12.5");
    }

    #[test]
    fn test_null_name_and_ticker() {
        let snapshot: StockSnapshot = serde_json::from_value(json!({
            "company_info": {"name": null, "ticker": "ZZ"},
            "quarterly_data": []
        }))
        .unwrap();
        assert_eq!(snapshot.company_info.name, "");
        assert_eq!(snapshot.company_info.ticker, "ZZ");

        let info: CompanyInfo = serde_json::from_value(json!({"ticker": null})).unwrap();
        assert!(info.name.is_empty() && info.ticker.is_empty());
    }

    #[test]
    fn test_unknown_fields_survive_reserialization() {
        let snapshot: StockSnapshot = serde_json::from_value(backend_payload()).unwrap();
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["company_info"]["exchange"], "NMS");
        assert_eq!(value["company_info"]["marketCap"], json!(3.4e12));
        assert_eq!(value["quarterly_data"][0]["metrics"]["EPS"], json!(0.97));
        assert!(value["quarterly_data"][1]["metrics"].get("NetIncome").is_none());
    }

    #[test]
    fn test_short_history() {
        let snapshot = StockSnapshot {
            quarterly_data: vec![QuarterlyRecord::default()],
            ..Default::default()
        };
        assert!(snapshot.latest().is_some());
        assert!(snapshot.previous().is_none());
        assert!(StockSnapshot::default().latest().is_none());
    }

    #[test]
    fn test_analysis_kind_wiring() {
        assert_eq!(AnalysisKind::Analyze.response_field(), "analysis");
        assert_eq!(AnalysisKind::Predict.response_field(), "prediction");
        assert_eq!(AnalysisKind::Risk.response_field(), "risk_assessment");
        assert_eq!("RISK".parse::<AnalysisKind>().unwrap(), AnalysisKind::Risk);
        assert!("forecast".parse::<AnalysisKind>().is_err());
        assert_eq!(serde_json::to_value(AnalysisKind::Predict).unwrap(), json!("predict"));
    }
}
