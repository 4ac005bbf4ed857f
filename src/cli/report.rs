//! One-shot report commands: render the dashboard once, print it, exit

use std::io::{self, Write};
use std::sync::Arc;

use serde::Serialize;

use crate::config::AppConfig;
use crate::presenter::format::{format_currency, format_number, format_percent};
use crate::presenter::{ChartPresenter, ChartSlot, ChartSpec, DashboardModel, SummaryCard};
use crate::services::{DashboardScreen, DashboardView, HttpApiClient};
use crate::types::{DailyBucket, ModelUsageEntry, ResourceCounts, SummaryStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Stats,
    Daily,
    Models,
}

impl ReportKind {
    fn slots(self) -> &'static [ChartSlot] {
        match self {
            Self::Stats => &[],
            Self::Daily => &[
                ChartSlot::CostOverTime,
                ChartSlot::TokensOverTime,
                ChartSlot::Executions,
            ],
            Self::Models => &[ChartSlot::ModelUsage],
        }
    }
}

#[derive(Serialize)]
struct StatsReport<'a> {
    stats: &'a SummaryStats,
    resources: &'a ResourceCounts,
    cards: &'a [SummaryCard],
}

#[derive(Serialize)]
struct DailyReport<'a> {
    daily: &'a [DailyBucket],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    charts: Vec<&'a ChartSpec>,
}

#[derive(Serialize)]
struct ModelsReport<'a> {
    models: &'a [ModelUsageEntry],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    charts: Vec<&'a ChartSpec>,
}

/// Render once and print to stdout. A failed render is an error (non-zero exit).
pub fn run(config: &AppConfig, kind: ReportKind, json: bool) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let api = Arc::new(HttpApiClient::new(&config.api)?);
    let mut view = DashboardView::new(api, &config.dashboard);

    let model = match runtime.block_on(view.render()) {
        DashboardScreen::Ready(model) => model,
        DashboardScreen::Failed(message) => anyhow::bail!("dashboard unavailable: {}", message),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(
        &mut out,
        kind,
        json,
        &model,
        view.presenter(),
        &config.dashboard.currency_symbol,
    )?;

    view.leave();
    Ok(())
}

fn charts_for<'a>(kind: ReportKind, presenter: &'a ChartPresenter) -> Vec<&'a ChartSpec> {
    kind.slots()
        .iter()
        .filter_map(|slot| presenter.instance(*slot))
        .map(|instance| instance.spec())
        .collect()
}

pub fn write_report<W: Write>(
    out: &mut W,
    kind: ReportKind,
    json: bool,
    model: &DashboardModel,
    presenter: &ChartPresenter,
    currency_symbol: &str,
) -> anyhow::Result<()> {
    if json {
        let charts = charts_for(kind, presenter);
        let body = match kind {
            ReportKind::Stats => serde_json::to_string_pretty(&StatsReport {
                stats: &model.stats,
                resources: &model.counts,
                cards: &model.summary_cards,
            })?,
            ReportKind::Daily => serde_json::to_string_pretty(&DailyReport {
                daily: &model.daily,
                charts,
            })?,
            ReportKind::Models => serde_json::to_string_pretty(&ModelsReport {
                models: &model.model_usage,
                charts,
            })?,
        };
        writeln!(out, "{}", body)?;
        return Ok(());
    }

    match kind {
        ReportKind::Stats => write_stats(out, model),
        ReportKind::Daily => write_daily(out, model, currency_symbol),
        ReportKind::Models => write_models(out, model, currency_symbol),
    }
}

fn write_cards<W: Write>(out: &mut W, title: &str, cards: &[SummaryCard]) -> io::Result<()> {
    writeln!(out, "{}", title)?;
    for card in cards {
        writeln!(out, "  {:<22}{:>16}", card.label, card.value)?;
    }
    Ok(())
}

fn write_stats<W: Write>(out: &mut W, model: &DashboardModel) -> anyhow::Result<()> {
    write_cards(out, "Executions", &model.summary_cards)?;
    writeln!(out)?;
    write_cards(out, "Resources", &model.resource_cards)?;
    Ok(())
}

fn write_daily<W: Write>(
    out: &mut W,
    model: &DashboardModel,
    currency_symbol: &str,
) -> anyhow::Result<()> {
    writeln!(
        out,
        "{:<12}{:>12}{:>10}{:>14}{:>14}",
        "Date", "Executions", "Success", "Cost", "Tokens"
    )?;
    for bucket in &model.daily {
        writeln!(
            out,
            "{:<12}{:>12}{:>10}{:>14}{:>14}",
            bucket.date.format("%Y-%m-%d").to_string(),
            format_number(bucket.executions),
            format_percent(bucket.success_rate),
            format_currency(bucket.cost, currency_symbol),
            format_number(bucket.tokens),
        )?;
    }
    Ok(())
}

fn write_models<W: Write>(
    out: &mut W,
    model: &DashboardModel,
    currency_symbol: &str,
) -> anyhow::Result<()> {
    if model.model_usage.is_empty() {
        writeln!(out, "No model executions found")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<40}{:>12}{:>14}{:>14}",
        "Model", "Executions", "Tokens", "Cost"
    )?;
    for entry in &model.model_usage {
        writeln!(
            out,
            "{:<40}{:>12}{:>14}{:>14}",
            entry.model,
            format_number(entry.executions),
            format_number(entry.tokens),
            format_currency(entry.cost, currency_symbol),
        )?;
    }
    Ok(())
}
