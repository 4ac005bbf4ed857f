//! Chart views: Trends, Activity and Models tabs
//!
//! Specs come from the presenter's live chart instances. When charts were not
//! rendered the page keeps its tables and shows a notice in the chart area.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::chart::ChartView;
use super::layout::render_chrome;
use super::tabs::Tab;
use crate::presenter::format::{format_currency, format_number, format_percent, format_short_date};
use crate::presenter::{ChartPresenter, ChartSlot, ChartSpec, DashboardModel};
use crate::tui::theme::Theme;

/// Side-by-side charts need at least this much width
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 120;

/// Tables never take more than this share of the body height
const TABLE_MAX_SHARE: u16 = 3;

const BAR_WIDTH: usize = 16;

/// Slots shown on a tab, top to bottom (or left to right when wide)
pub fn slots_for(tab: Tab) -> &'static [ChartSlot] {
    match tab {
        Tab::Overview => &[],
        Tab::Trends => &[ChartSlot::CostOverTime, ChartSlot::TokensOverTime],
        Tab::Activity => &[ChartSlot::Executions],
        Tab::Models => &[ChartSlot::ModelUsage],
    }
}

/// Example: 50.0% with width 10 -> "█████░░░░░"
pub fn format_percentage_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

pub struct ChartsPage<'a> {
    tab: Tab,
    model: &'a DashboardModel,
    charts: Vec<&'a ChartSpec>,
    currency_symbol: &'a str,
    theme: Theme,
}

impl<'a> ChartsPage<'a> {
    pub fn new(
        tab: Tab,
        model: &'a DashboardModel,
        presenter: Option<&'a ChartPresenter>,
        currency_symbol: &'a str,
        theme: Theme,
    ) -> Self {
        let charts = match presenter {
            Some(presenter) if model.charts_rendered => slots_for(tab)
                .iter()
                .filter_map(|slot| presenter.instance(*slot))
                .map(|instance| instance.spec())
                .collect(),
            _ => Vec::new(),
        };
        Self {
            tab,
            model,
            charts,
            currency_symbol,
            theme,
        }
    }

    fn header_style(&self) -> Style {
        Style::default()
            .fg(self.theme.text())
            .add_modifier(Modifier::BOLD)
    }

    fn table(&self) -> Vec<Line<'a>> {
        match self.tab {
            Tab::Activity => self.daily_table(),
            Tab::Models => self.model_table(),
            Tab::Overview | Tab::Trends => Vec::new(),
        }
    }

    /// Most recent day first
    fn daily_table(&self) -> Vec<Line<'a>> {
        let header = self.header_style();
        let mut lines = vec![Line::from(Span::styled(
            format!(
                "{:<10}{:>12}{:>10}{:>14}{:>14}",
                "Date", "Executions", "Success", "Cost", "Tokens"
            ),
            header,
        ))];
        lines.extend(self.model.daily.iter().rev().map(|bucket| {
            let rate_color = if bucket.executions > 0 && bucket.success_rate < 50.0 {
                self.theme.error()
            } else {
                self.theme.success()
            };
            Line::from(vec![
                Span::styled(
                    format!("{:<10}", format_short_date(bucket.date)),
                    Style::default().fg(self.theme.muted()),
                ),
                Span::styled(
                    format!("{:>12}", format_number(bucket.executions)),
                    Style::default().fg(self.theme.bar()),
                ),
                Span::styled(
                    format!("{:>10}", format_percent(bucket.success_rate)),
                    Style::default().fg(rate_color),
                ),
                Span::styled(
                    format!("{:>14}", format_currency(bucket.cost, self.currency_symbol)),
                    Style::default().fg(self.theme.cost()),
                ),
                Span::styled(
                    format!("{:>14}", format_number(bucket.tokens)),
                    Style::default().fg(self.theme.tokens()),
                ),
            ])
        }));
        lines
    }

    fn model_table(&self) -> Vec<Line<'a>> {
        let header = self.header_style();
        let mut lines = vec![Line::from(Span::styled(
            format!(
                "{:<30}{:>12}{:>14}{:>14}  {:<width$}",
                "Model",
                "Executions",
                "Tokens",
                "Cost",
                "Share",
                width = BAR_WIDTH
            ),
            header,
        ))];

        let total: u64 = self.model.model_usage.iter().map(|m| m.executions).sum();
        lines.extend(self.model.model_usage.iter().map(|entry| {
            let share = if total == 0 {
                0.0
            } else {
                entry.executions as f64 / total as f64 * 100.0
            };
            let name: String = entry.model.chars().take(28).collect();
            Line::from(vec![
                Span::styled(
                    format!("{:<30}", name),
                    Style::default().fg(self.theme.text()),
                ),
                Span::styled(
                    format!("{:>12}", format_number(entry.executions)),
                    Style::default().fg(self.theme.bar()),
                ),
                Span::styled(
                    format!("{:>14}", format_number(entry.tokens)),
                    Style::default().fg(self.theme.tokens()),
                ),
                Span::styled(
                    format!("{:>14}", format_currency(entry.cost, self.currency_symbol)),
                    Style::default().fg(self.theme.cost()),
                ),
                Span::raw("  "),
                Span::styled(
                    format_percentage_bar(share, BAR_WIDTH),
                    Style::default().fg(self.theme.accent()),
                ),
            ])
        }));
        if self.model.model_usage.is_empty() {
            lines.push(Line::styled(
                "No model executions in range",
                Style::default().fg(self.theme.muted()),
            ));
        }
        lines
    }

    fn render_charts(&self, area: Rect, buf: &mut Buffer) {
        if self.charts.is_empty() {
            let notice = if self.model.charts_rendered {
                "No chart data"
            } else {
                "Charts are disabled; summary cards are on the Overview tab"
            };
            let mid = Rect {
                y: area.y + area.height / 2,
                height: area.height.min(1),
                ..area
            };
            Paragraph::new(Line::styled(notice, Style::default().fg(self.theme.muted())))
                .alignment(Alignment::Center)
                .render(mid, buf);
            return;
        }

        let count = self.charts.len() as u32;
        let constraints = (0..count).map(|_| Constraint::Ratio(1, count));
        let layout = if area.width >= SIDE_BY_SIDE_MIN_WIDTH {
            Layout::horizontal(constraints)
        } else {
            Layout::vertical(constraints)
        };

        for (spec, slot_area) in self.charts.iter().zip(layout.split(area).iter()) {
            ChartView::new(spec, self.theme).render(*slot_area, buf);
        }
    }
}

impl Widget for ChartsPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let body = render_chrome(area, buf, self.tab, self.theme);

        let table = self.table();
        let table_height = (table.len() as u16).min(body.height / TABLE_MAX_SHARE);
        let [charts, _, table_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(u16::from(table_height > 0)),
            Constraint::Length(table_height),
        ])
        .areas(body);

        self.render_charts(charts, buf);

        if table_height > 0 {
            let width = table
                .iter()
                .map(|l| l.width() as u16)
                .max()
                .unwrap_or(0)
                .min(table_area.width);
            let centered = Rect {
                x: table_area.x + (table_area.width - width) / 2,
                width,
                ..table_area
            };
            Paragraph::new(table).render(centered, buf);
        }
    }
}
