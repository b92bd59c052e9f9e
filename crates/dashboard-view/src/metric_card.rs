//! Metric card rendering

use std::fmt;

use crate::format::{ValueFormatter, format_currency, format_date};

/// Percent change between two values.
///
/// `None` unless both are present and the result is finite, so a zero
/// previous value never leaks NaN or infinity into the display.
pub fn percent_change(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let (current, previous) = (current?, previous?);
    let change = (current - previous) / previous * 100.0;
    change.is_finite().then_some(change)
}

/// Styling tone of a change indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
}

impl Tone {
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Positive => "▲",
            Self::Negative => "▼",
        }
    }
}

/// Change against the previous period, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Change {
    pub percent: f64,
}

impl Change {
    /// Zero counts as positive
    pub fn tone(&self) -> Tone {
        if self.percent >= 0.0 {
            Tone::Positive
        } else {
            Tone::Negative
        }
    }

    /// Magnitude with one decimal, sign carried by the indicator
    pub fn magnitude(&self) -> String {
        format!("{:.1}%", self.percent.abs())
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tone().indicator(), self.magnitude())
    }
}

/// A rendered metric card
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    pub change: Option<Change>,
    /// Calendar date the value refers to
    pub date: Option<String>,
}

impl MetricCard {
    /// Start building a card for `value`
    pub fn builder(title: impl Into<String>, value: Option<f64>) -> MetricCardBuilder {
        MetricCardBuilder {
            title: title.into(),
            value,
            previous: None,
            date: None,
            formatter: format_currency,
        }
    }

    /// Card body as individual lines
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone()];
        match &self.change {
            Some(change) => lines.push(format!("{}  {change}", self.value)),
            None => lines.push(self.value.clone()),
        }
        if let Some(date) = &self.date {
            lines.push(format!("as of {date}"));
        }
        lines
    }
}

impl fmt::Display for MetricCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Builder for MetricCard
#[derive(Debug, Clone)]
pub struct MetricCardBuilder {
    title: String,
    value: Option<f64>,
    previous: Option<f64>,
    date: Option<String>,
    formatter: ValueFormatter,
}

impl MetricCardBuilder {
    /// Previous period value used for the change indicator
    pub fn previous(mut self, previous: Option<f64>) -> Self {
        self.previous = previous;
        self
    }

    pub fn date(mut self, date: Option<&str>) -> Self {
        self.date = date.map(str::to_string);
        self
    }

    /// Value formatter (compact currency by default)
    pub fn formatter(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn build(self) -> MetricCard {
        MetricCard {
            title: self.title,
            value: (self.formatter)(self.value),
            change: percent_change(self.value, self.previous).map(|percent| Change { percent }),
            date: self.date.as_deref().map(format_date),
        }
    }
}
