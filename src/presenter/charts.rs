//! Chart specifications
//!
//! A [`ChartSpec`] is a renderer-independent description of one chart: category
//! labels, one or more value series, and the axes they are plotted against.
//! The TUI widgets turn specs into ratatui charts; report commands serialize them.

use serde::Serialize;

use super::format::{format_compact, format_short_date, truncate_label};
use crate::types::{DailyBucket, ModelUsageEntry};

/// Chart layout family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Single line over time
    Line,
    /// Bars on the left axis with a line overlaid on the right axis
    BarLine,
    /// One horizontal bar per category
    HorizontalBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesStyle {
    Line,
    Bar,
}

/// Value axis description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    pub min: f64,
    /// Fixed upper bound; `None` scales to the data
    pub max: Option<f64>,
    /// Prepended to tick labels (e.g. a currency symbol)
    pub tick_prefix: Option<String>,
    /// Appended to tick labels (e.g. "%")
    pub tick_suffix: Option<String>,
    /// Draw gridlines for this axis
    pub gridlines: bool,
}

impl AxisSpec {
    /// Zero-based axis that scales to the data
    pub fn zero_based() -> Self {
        Self {
            min: 0.0,
            max: None,
            tick_prefix: None,
            tick_suffix: None,
            gridlines: true,
        }
    }

    /// Upper bound for the given values; never equal to `min`
    pub fn upper_bound(&self, values: &[f64]) -> f64 {
        if let Some(max) = self.max {
            return max;
        }
        let data_max = values.iter().copied().fold(self.min, f64::max);
        if data_max > self.min {
            data_max
        } else {
            self.min + 1.0
        }
    }

    pub fn format_tick(&self, value: f64) -> String {
        format!(
            "{}{}{}",
            self.tick_prefix.as_deref().unwrap_or(""),
            format_compact(value),
            self.tick_suffix.as_deref().unwrap_or("")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSpec {
    pub name: String,
    pub values: Vec<f64>,
    pub axis: AxisSide,
    pub style: SeriesStyle,
}

/// Renderer-independent chart description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    /// Category labels, aligned 1:1 with every series' values
    pub labels: Vec<String>,
    pub series: Vec<SeriesSpec>,
    pub left_axis: AxisSpec,
    pub right_axis: Option<AxisSpec>,
    pub show_legend: bool,
}

impl ChartSpec {
    /// Values of the first series plotted against `side`
    pub fn series_on(&self, side: AxisSide) -> Option<&SeriesSpec> {
        self.series.iter().find(|s| s.axis == side)
    }
}

/// Metric plotted by a single-series time chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSeriesMetric {
    Cost,
    Tokens,
}

impl TimeSeriesMetric {
    pub fn title(self) -> &'static str {
        match self {
            Self::Cost => "Cost Over Time",
            Self::Tokens => "Tokens Over Time",
        }
    }

    pub fn series_name(self) -> &'static str {
        match self {
            Self::Cost => "Cost",
            Self::Tokens => "Tokens",
        }
    }

    fn value(self, bucket: &DailyBucket) -> f64 {
        match self {
            Self::Cost => bucket.cost,
            Self::Tokens => bucket.tokens as f64,
        }
    }
}

fn date_labels(buckets: &[DailyBucket]) -> Vec<String> {
    buckets.iter().map(|b| format_short_date(b.date)).collect()
}

/// Line chart of one metric per day. `unit_prefix` decorates the tick labels.
pub fn build_time_series_chart_spec(
    buckets: &[DailyBucket],
    metric: TimeSeriesMetric,
    unit_prefix: Option<&str>,
) -> ChartSpec {
    ChartSpec {
        title: metric.title().to_string(),
        kind: ChartKind::Line,
        labels: date_labels(buckets),
        series: vec![SeriesSpec {
            name: metric.series_name().to_string(),
            values: buckets.iter().map(|b| metric.value(b)).collect(),
            axis: AxisSide::Left,
            style: SeriesStyle::Line,
        }],
        left_axis: AxisSpec {
            tick_prefix: unit_prefix.map(String::from),
            ..AxisSpec::zero_based()
        },
        right_axis: None,
        show_legend: false,
    }
}

/// Daily executions as bars (left axis) with the success rate line (right axis, 0-100)
pub fn build_dual_axis_chart_spec(buckets: &[DailyBucket]) -> ChartSpec {
    ChartSpec {
        title: "Executions & Success Rate".to_string(),
        kind: ChartKind::BarLine,
        labels: date_labels(buckets),
        series: vec![
            SeriesSpec {
                name: "Executions".to_string(),
                values: buckets.iter().map(|b| b.executions as f64).collect(),
                axis: AxisSide::Left,
                style: SeriesStyle::Bar,
            },
            SeriesSpec {
                name: "Success Rate".to_string(),
                values: buckets.iter().map(|b| b.success_rate).collect(),
                axis: AxisSide::Right,
                style: SeriesStyle::Line,
            },
        ],
        left_axis: AxisSpec::zero_based(),
        right_axis: Some(AxisSpec {
            min: 0.0,
            max: Some(100.0),
            tick_prefix: None,
            tick_suffix: Some("%".to_string()),
            gridlines: false,
        }),
        show_legend: true,
    }
}

/// Horizontal bar per model, labels cut to `label_max_len` characters
pub fn build_model_usage_chart_spec(entries: &[ModelUsageEntry], label_max_len: usize) -> ChartSpec {
    ChartSpec {
        title: "Top Model Usage".to_string(),
        kind: ChartKind::HorizontalBar,
        labels: entries
            .iter()
            .map(|e| truncate_label(&e.model, label_max_len))
            .collect(),
        series: vec![SeriesSpec {
            name: "Executions".to_string(),
            values: entries.iter().map(|e| e.executions as f64).collect(),
            axis: AxisSide::Left,
            style: SeriesStyle::Bar,
        }],
        left_axis: AxisSpec::zero_based(),
        right_axis: None,
        show_legend: false,
    }
}
