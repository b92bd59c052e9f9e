//! Chart adapter and the optional chart collaborator

use serde::Serialize;

use crate::format::{NOT_AVAILABLE, format_currency, format_percent};
use crate::model::QuarterlyRecord;

/// One chart sample
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: String,
    pub revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub profit_margin: Option<f64>,
}

/// Reshape quarterly records into chart points.
///
/// Order and count follow the input (latest first); absent values pass
/// through untouched.
pub fn chart_points(records: &[QuarterlyRecord]) -> Vec<ChartPoint> {
    records
        .iter()
        .map(|record| ChartPoint {
            date: record.date.clone(),
            revenue: record.metrics.revenue,
            net_income: record.metrics.net_income,
            profit_margin: record.metrics.profit_margin,
        })
        .collect()
}

/// Charting collaborator supplied by the host, if it has one
pub trait ChartRenderer: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Render points into a text block
    fn render(&self, points: &[ChartPoint]) -> String;
}

/// Horizontal bar chart of revenue and net income drawn with block glyphs
#[derive(Debug, Clone)]
pub struct TextBarChart {
    width: usize,
}

impl TextBarChart {
    pub fn new(width: usize) -> Self {
        Self { width: width.max(1) }
    }

    fn bar(&self, value: Option<f64>, scale: f64) -> String {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return NOT_AVAILABLE.to_string();
        };
        let len = if scale > 0.0 {
            ((value.abs() / scale) * self.width as f64).round() as usize
        } else {
            0
        };
        let glyph = if value < 0.0 { "▒" } else { "█" };
        format!("{} {}", glyph.repeat(len.max(1)), format_currency(Some(value)))
    }
}

impl Default for TextBarChart {
    fn default() -> Self {
        Self::new(40)
    }
}

impl ChartRenderer for TextBarChart {
    fn name(&self) -> &str {
        "text-bar"
    }

    fn render(&self, points: &[ChartPoint]) -> String {
        if points.is_empty() {
            return "No quarterly data to chart".to_string();
        }

        let scale = points
            .iter()
            .flat_map(|p| [p.revenue, p.net_income])
            .flatten()
            .filter(|v| v.is_finite())
            .map(f64::abs)
            .fold(0.0, f64::max);

        let date_width = points.iter().map(|p| p.date.len()).max().unwrap_or(0);

        let mut output = String::from("Revenue (R) / Net Income (N) by quarter\n");
        for point in points {
            output.push_str(&format!(
                "{:<date_width$}  R {}\n",
                point.date,
                self.bar(point.revenue, scale)
            ));
            output.push_str(&format!(
                "{:<date_width$}  N {}   margin {}\n",
                "",
                self.bar(point.net_income, scale),
                format_percent(point.profit_margin)
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuarterlyMetrics;

    fn record(date: &str, revenue: Option<f64>, net_income: Option<f64>) -> QuarterlyRecord {
        QuarterlyRecord {
            date: date.to_string(),
            metrics: QuarterlyMetrics {
                revenue,
                net_income,
                profit_margin: revenue.zip(net_income).map(|(r, n)| n / r * 100.0),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_chart_points_preserve_order_and_count() {
        let records = vec![
            record("2024-09-30", Some(100.0), Some(10.0)),
            record("2024-06-30", Some(90.0), None),
            record("2024-03-31", None, Some(5.0)),
        ];

        let points = chart_points(&records);

        assert_eq!(points.len(), records.len());
        let dates: Vec<_> = points.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, ["2024-09-30", "2024-06-30", "2024-03-31"]);
        assert_eq!(points[1].net_income, None);
        assert_eq!(points[2].revenue, None);
        assert_eq!(points[0].profit_margin, Some(10.0));
    }

    #[test]
    fn test_chart_points_empty() {
        assert!(chart_points(&[]).is_empty());
    }

    #[test]
    fn test_chart_point_serializes_camel_case() {
        let points = chart_points(&[record("2024-09-30", Some(1.0), Some(2.0))]);
        let json = serde_json::to_value(&points[0]).unwrap();
        assert_eq!(json["netIncome"], 2.0);
        assert!(json.get("profitMargin").is_some());
    }

    #[test]
    fn test_text_bar_chart_scales_bars() {
        let chart = TextBarChart::new(10);
        let points = chart_points(&[
            record("2024-09-30", Some(1_000_000.0), Some(-500_000.0)),
            record("2024-06-30", None, Some(250_000.0)),
        ]);

        let output = chart.render(&points);

        assert!(output.contains(&format!("R {} $1M", "█".repeat(10))));
        assert!(output.contains(&format!("N {} -$500K", "▒".repeat(5))));
        assert!(output.contains("R N/A"));
        assert_eq!(chart.name(), "text-bar");
    }

    #[test]
    fn test_text_bar_chart_empty() {
        assert_eq!(TextBarChart::default().render(&[]), "No quarterly data to chart");
    }
}
