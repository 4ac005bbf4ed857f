//! Presentation layer: turns aggregated data into cards and chart specs
//!
//! [`ChartPresenter`] is the only owner of chart instances. Each chart lives in
//! a [`ChartSlot`]; binding a new spec to an occupied slot disposes the old
//! instance first, so a slot never has two live charts.

pub mod cards;
pub mod charts;
pub mod format;

use std::collections::HashMap;

use serde::Serialize;

pub use cards::{build_resource_cards, build_summary_cards, CardTone, SummaryCard, PRIMARY_CARD_COUNT};
pub use charts::{
    build_dual_axis_chart_spec, build_model_usage_chart_spec, build_time_series_chart_spec,
    AxisSide, AxisSpec, ChartKind, ChartSpec, SeriesSpec, SeriesStyle, TimeSeriesMetric,
};

use crate::types::{DailyBucket, ModelUsageEntry, ResourceCounts, Result, SummaryStats};

/// Named chart position on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlot {
    CostOverTime,
    TokensOverTime,
    Executions,
    ModelUsage,
}

impl ChartSlot {
    pub fn all() -> &'static [ChartSlot] {
        &[
            ChartSlot::CostOverTime,
            ChartSlot::TokensOverTime,
            ChartSlot::Executions,
            ChartSlot::ModelUsage,
        ]
    }
}

/// A chart bound to a slot. Must be released with [`ChartInstance::dispose`].
#[derive(Debug)]
pub struct ChartInstance {
    id: u64,
    slot: ChartSlot,
    spec: ChartSpec,
}

impl ChartInstance {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn slot(&self) -> ChartSlot {
        self.slot
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    /// Release the instance
    pub fn dispose(self) {
        tracing::debug!(slot = ?self.slot, id = self.id, "chart disposed");
    }
}

/// Everything the dashboard shows for one refresh
#[derive(Debug, Clone, Serialize)]
pub struct DashboardModel {
    pub summary_cards: Vec<SummaryCard>,
    pub resource_cards: Vec<SummaryCard>,
    pub stats: SummaryStats,
    pub counts: ResourceCounts,
    pub daily: Vec<DailyBucket>,
    pub model_usage: Vec<ModelUsageEntry>,
    /// False when charts were skipped; cards are still valid
    pub charts_rendered: bool,
}

/// Owns chart instances for the lifetime of the dashboard view
#[derive(Debug)]
pub struct ChartPresenter {
    currency_symbol: String,
    label_max_len: usize,
    charts_available: bool,
    instances: HashMap<ChartSlot, ChartInstance>,
    next_id: u64,
    disposed: u64,
}

impl ChartPresenter {
    pub fn new(currency_symbol: impl Into<String>, label_max_len: usize, charts_available: bool) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            label_max_len,
            charts_available,
            instances: HashMap::new(),
            next_id: 1,
            disposed: 0,
        }
    }

    /// Bind `spec` to `slot`, disposing whatever was bound there before
    pub fn bind(&mut self, slot: ChartSlot, spec: ChartSpec) -> &ChartInstance {
        if let Some(previous) = self.instances.remove(&slot) {
            previous.dispose();
            self.disposed += 1;
        }

        let id = self.next_id;
        self.next_id += 1;
        tracing::debug!(?slot, id, "chart bound");

        self.instances
            .entry(slot)
            .or_insert(ChartInstance { id, slot, spec })
    }

    pub fn instance(&self, slot: ChartSlot) -> Option<&ChartInstance> {
        self.instances.get(&slot)
    }

    /// Number of live chart instances
    pub fn active_count(&self) -> usize {
        self.instances.len()
    }

    /// Number of instances released so far
    pub fn disposed_count(&self) -> u64 {
        self.disposed
    }

    /// Dispose every live instance (view torn down or left)
    pub fn clear(&mut self) {
        for (_, instance) in self.instances.drain() {
            instance.dispose();
            self.disposed += 1;
        }
    }

    /// Build cards and bind all four charts for one refresh.
    ///
    /// Fails if `stats` has a shape the cards cannot represent. When charts are
    /// unavailable the model carries cards only.
    pub fn present(
        &mut self,
        stats: &SummaryStats,
        counts: &ResourceCounts,
        daily: Vec<DailyBucket>,
        model_usage: Vec<ModelUsageEntry>,
    ) -> Result<DashboardModel> {
        stats.validate()?;

        let summary_cards = build_summary_cards(stats, &self.currency_symbol);
        let resource_cards = build_resource_cards(counts);

        let charts_rendered = if self.charts_available {
            let cost = build_time_series_chart_spec(
                &daily,
                TimeSeriesMetric::Cost,
                Some(self.currency_symbol.as_str()),
            );
            let tokens = build_time_series_chart_spec(&daily, TimeSeriesMetric::Tokens, None);
            let executions = build_dual_axis_chart_spec(&daily);
            let usage = build_model_usage_chart_spec(&model_usage, self.label_max_len);

            self.bind(ChartSlot::CostOverTime, cost);
            self.bind(ChartSlot::TokensOverTime, tokens);
            self.bind(ChartSlot::Executions, executions);
            self.bind(ChartSlot::ModelUsage, usage);
            true
        } else {
            tracing::info!("charts unavailable, rendering summary cards only");
            false
        };

        Ok(DashboardModel {
            summary_cards,
            resource_cards,
            stats: stats.clone(),
            counts: *counts,
            daily,
            model_usage,
            charts_rendered,
        })
    }
}
