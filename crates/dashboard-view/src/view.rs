//! Text rendering of the dashboard

use std::sync::Arc;

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;

use crate::chart::{ChartRenderer, chart_points};
use crate::controller::ViewState;
use crate::format::{NOT_AVAILABLE, format_currency, format_date, format_percent, format_price};
use crate::metric_card::MetricCard;
use crate::model::{AnalysisKind, CompanyInfo, Metric, StockSnapshot};

/// Renders [`ViewState`] snapshots as text.
///
/// The chart section only appears when the host supplied a
/// [`ChartRenderer`]; everything else renders the same either way.
#[derive(Clone, Default)]
pub struct DashboardView {
    chart: Option<Arc<dyn ChartRenderer>>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a chart collaborator
    pub fn with_chart(mut self, chart: Arc<dyn ChartRenderer>) -> Self {
        self.chart = Some(chart);
        self
    }

    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    /// Whole dashboard
    pub fn render(&self, state: &ViewState) -> String {
        let mut sections = vec![render_search(state)];

        if let Some(error) = &state.error {
            sections.push(format!("Error: {error}"));
        }

        if let Some(snapshot) = &state.data {
            sections.push(render_company(&snapshot.company_info));
            sections.push(render_metric_cards(snapshot));
            if !snapshot.quarterly_data.is_empty() {
                sections.push(render_quarterly_table(snapshot));
            }
            if let Some(chart) = &self.chart {
                tracing::trace!(renderer = chart.name(), "Rendering chart");
                sections.push(chart.render(&chart_points(&snapshot.quarterly_data)));
            }
            sections.push(render_analysis_controls(state));
            if let Some(analysis) = render_analysis(state) {
                sections.push(analysis);
            }
        }

        sections.join("\n\n")
    }
}

impl std::fmt::Debug for DashboardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardView")
            .field("chart", &self.chart.as_ref().map(|c| c.name().to_string()))
            .finish()
    }
}

fn render_search(state: &ViewState) -> String {
    let ticker = if state.ticker.is_empty() {
        "-"
    } else {
        state.ticker.as_str()
    };
    if state.loading {
        format!("Ticker: {ticker}  [Loading...]")
    } else {
        format!("Ticker: {ticker}")
    }
}

fn render_company(info: &CompanyInfo) -> String {
    let name = if info.name.is_empty() { &info.ticker } else { &info.name };
    let mut lines = vec![format!("{name} ({})", info.ticker)];
    lines.push(format!(
        "{} / {}",
        info.sector.as_deref().unwrap_or(NOT_AVAILABLE),
        info.industry.as_deref().unwrap_or(NOT_AVAILABLE)
    ));
    if let Some(description) = info.description.as_deref().filter(|d| *d != NOT_AVAILABLE) {
        lines.push(description.to_string());
    }

    let price = match info.price_change {
        Some(change) if change.is_finite() => {
            let indicator = if change >= 0.0 { "▲" } else { "▼" };
            format!(
                "{}  {indicator} {}",
                format_price(info.current_price),
                format_percent(Some(change))
            )
        }
        _ => format_price(info.current_price),
    };
    lines.push(format!("Price:        {price}"));
    lines.push(format!("Market Cap:   {}", format_currency(info.market_cap)));
    lines.push(format!("EPS:          {}", format_price(info.eps)));
    lines.push(format!(
        "Employees:    {}",
        info.employees
            .as_ref()
            .map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
    ));
    if let Some(updated) = &info.last_updated {
        lines.push(format!("Last updated: {updated}"));
    }
    lines.join("\n")
}

/// Latest-vs-previous cards shown under the company header
pub fn metric_cards(snapshot: &StockSnapshot) -> Vec<MetricCard> {
    let latest = snapshot.latest();
    let previous = snapshot.previous();

    [
        Metric::Revenue,
        Metric::NetIncome,
        Metric::ProfitMargin,
        Metric::Assets,
    ]
    .into_iter()
    .map(|metric| {
        let builder = MetricCard::builder(
            metric.label(),
            latest.and_then(|q| q.metrics.get(metric)),
        )
        .previous(previous.and_then(|q| q.metrics.get(metric)))
        .date(latest.map(|q| q.date.as_str()));

        if metric == Metric::ProfitMargin {
            builder.formatter(format_percent).build()
        } else {
            builder.build()
        }
    })
    .collect()
}

fn render_metric_cards(snapshot: &StockSnapshot) -> String {
    metric_cards(snapshot)
        .iter()
        .map(|card| {
            card.lines()
                .iter()
                .enumerate()
                .map(|(i, line)| if i == 0 { format!("* {line}") } else { format!("  {line}") })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_quarterly_table(snapshot: &StockSnapshot) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Quarter",
        "Revenue",
        "Net Income",
        "Profit Margin",
        "Assets",
        "Liabilities",
    ]);

    for record in &snapshot.quarterly_data {
        let metrics = &record.metrics;
        table.add_row(vec![
            format_date(&record.date),
            format_currency(metrics.revenue),
            format_currency(metrics.net_income),
            format_percent(metrics.profit_margin),
            format_currency(metrics.assets),
            format_currency(metrics.liabilities),
        ]);
    }

    table.to_string()
}

fn render_analysis_controls(state: &ViewState) -> String {
    let buttons: Vec<String> = AnalysisKind::ALL
        .iter()
        .map(|kind| {
            if state.selected_analysis == Some(*kind) {
                format!("[{}]", kind.label())
            } else {
                kind.label().to_string()
            }
        })
        .collect();

    let mut line = format!("Analysis: {}", buttons.join(" | "));
    if state.analysis_loading {
        line.push_str("  Analyzing...");
    }
    line
}

fn render_analysis(state: &ViewState) -> Option<String> {
    let text = state.analysis.as_deref()?;
    let title = state.selected_analysis.map_or("Analysis", AnalysisKind::label);
    Some(format!("{title}\n{}\n{text}", "-".repeat(title.chars().count())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartPoint, TextBarChart};
    use crate::model::{Employees, QuarterlyMetrics, QuarterlyRecord};

    fn snapshot() -> StockSnapshot {
        StockSnapshot {
            company_info: CompanyInfo {
                name: "Apple Inc.".to_string(),
                ticker: "AAPL".to_string(),
                sector: Some("Technology".to_string()),
                industry: Some("Consumer Electronics".to_string()),
                market_cap: Some(3.4e12),
                eps: Some(6.57),
                employees: Some(Employees::Count(161_000)),
                current_price: Some(227.52),
                price_change: Some(-1.234),
                last_updated: Some("2024-11-01 10:00:00".to_string()),
                ..Default::default()
            },
            quarterly_data: vec![
                QuarterlyRecord {
                    date: "2024-09-30".to_string(),
                    metrics: QuarterlyMetrics {
                        revenue: Some(120.0e9),
                        net_income: Some(15.0e9),
                        profit_margin: Some(12.5),
                        assets: Some(360.0e9),
                        ..Default::default()
                    },
                },
                QuarterlyRecord {
                    date: "2024-06-30".to_string(),
                    metrics: QuarterlyMetrics {
                        revenue: Some(100.0e9),
                        net_income: Some(0.0),
                        profit_margin: Some(0.0),
                        assets: None,
                        ..Default::default()
                    },
                },
            ],
        }
    }

    fn loaded_state() -> ViewState {
        ViewState {
            ticker: "aapl".to_string(),
            data: Some(snapshot()),
            ..Default::default()
        }
    }

    struct CountingChart;

    impl ChartRenderer for CountingChart {
        fn name(&self) -> &str {
            "counting"
        }

        fn render(&self, points: &[ChartPoint]) -> String {
            format!("CHART {} points", points.len())
        }
    }

    #[test]
    fn test_metric_cards_compare_latest_with_previous() {
        let cards = metric_cards(&snapshot());
        let titles: Vec<_> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Revenue", "Net Income", "Profit Margin", "Total Assets"]);

        assert_eq!(cards[0].value, "$120B");
        assert_eq!(cards[0].change.map(|c| c.to_string()).as_deref(), Some("▲ 20.0%"));
        assert_eq!(cards[0].date.as_deref(), Some("9/30/2024"));
        // previous of zero and absent previous both omit the change
        assert!(cards[1].change.is_none());
        assert_eq!(cards[2].value, "12.50%");
        assert!(cards[2].change.is_none());
        assert!(cards[3].change.is_none());
    }

    #[test]
    fn test_metric_cards_with_single_quarter() {
        let mut snapshot = snapshot();
        snapshot.quarterly_data.truncate(1);
        assert!(metric_cards(&snapshot).iter().all(|c| c.change.is_none()));

        snapshot.quarterly_data.clear();
        let cards = metric_cards(&snapshot);
        assert!(cards.iter().all(|c| c.value == "N/A" && c.date.is_none()));
    }

    #[test]
    fn test_render_loaded_dashboard() {
        let output = DashboardView::new().render(&loaded_state());

        assert!(output.contains("Apple Inc. (AAPL)"));
        assert!(output.contains("Technology / Consumer Electronics"));
        assert!(output.contains("$227.52  ▼ -1.23%"));
        assert!(output.contains("Market Cap:   $3.4T"));
        assert!(output.contains("Employees:    161,000"));
        assert!(output.contains("* Revenue"));
        assert!(output.contains("6/30/2024"));
        assert!(output.contains("Analysis: Financial Analysis | Next Quarter Prediction"));
        assert!(!output.contains("Error:"));
    }

    #[test]
    fn test_header_falls_back_to_ticker() {
        let mut state = loaded_state();
        if let Some(data) = state.data.as_mut() {
            data.company_info.name.clear();
        }

        let output = DashboardView::new().render(&state);
        assert!(output.contains("AAPL (AAPL)"));
    }

    #[test]
    fn test_chart_section_is_optional() {
        let state = loaded_state();

        let without = DashboardView::new().render(&state);
        assert!(!without.contains("CHART"));

        let view = DashboardView::new().with_chart(Arc::new(CountingChart));
        assert!(view.has_chart());
        let with = view.render(&state);
        assert!(with.contains("CHART 2 points"));

        assert_eq!(with.replace("CHART 2 points\n\n", ""), without);
    }

    #[test]
    fn test_render_with_text_chart() {
        let view = DashboardView::new().with_chart(Arc::new(TextBarChart::new(8)));
        let output = view.render(&loaded_state());
        assert!(output.contains("Revenue (R) / Net Income (N) by quarter"));
    }

    #[test]
    fn test_render_loading_and_error() {
        let state = ViewState {
            ticker: "zzzz".to_string(),
            loading: true,
            error: Some("Not found".to_string()),
            ..Default::default()
        };

        let output = DashboardView::new().render(&state);

        assert!(output.contains("Ticker: zzzz  [Loading...]"));
        assert!(output.contains("Error: Not found"));
        assert!(!output.contains("Analysis:"));
    }

    #[test]
    fn test_render_analysis() {
        let mut state = loaded_state();
        state.selected_analysis = Some(AnalysisKind::Risk);
        state.analysis = Some("Liquidity risk: Low".to_string());

        let output = DashboardView::new().render(&state);

        assert!(output.contains("[Risk Assessment]"));
        assert!(output.ends_with("Risk Assessment\n---------------\nLiquidity risk: Low"));

        state.analysis = None;
        state.analysis_loading = true;
        let output = DashboardView::new().render(&state);
        assert!(output.contains("Analyzing..."));
    }
}
