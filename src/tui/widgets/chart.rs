//! Renders a presenter [`ChartSpec`] with ratatui's chart widgets

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Line,
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, LegendPosition,
        Paragraph, Widget,
    },
};

use crate::presenter::{AxisSide, AxisSpec, ChartKind, ChartSpec, SeriesSpec, SeriesStyle};
use crate::tui::theme::Theme;

/// Below this size a chart is unreadable and is replaced by a hint
pub const MIN_CHART_WIDTH: u16 = 30;
pub const MIN_CHART_HEIGHT: u16 = 8;

/// Width reserved for right-axis tick labels on dual-axis charts
const RIGHT_AXIS_WIDTH: u16 = 5;

pub struct ChartView<'a> {
    spec: &'a ChartSpec,
    theme: Theme,
}

impl<'a> ChartView<'a> {
    pub fn new(spec: &'a ChartSpec, theme: Theme) -> Self {
        Self { spec, theme }
    }

    pub fn fits(area: Rect) -> bool {
        area.width >= MIN_CHART_WIDTH && area.height >= MIN_CHART_HEIGHT
    }

    fn block(&self) -> Block<'a> {
        Block::default()
            .title(format!(" {} ", self.spec.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted()))
            .title_style(
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            )
    }

    fn series_color(&self, series: &SeriesSpec) -> Color {
        match (self.spec.kind, series.axis, series.style) {
            (ChartKind::Line, ..) if series.name == "Cost" => self.theme.cost(),
            (ChartKind::Line, ..) => self.theme.tokens(),
            (_, AxisSide::Right, _) => self.theme.success(),
            (_, _, SeriesStyle::Bar) => self.theme.bar(),
            _ => self.theme.accent(),
        }
    }

    fn render_hint(&self, area: Rect, buf: &mut Buffer, hint: &str) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }
        let mid = Rect {
            y: inner.y + inner.height / 2,
            height: 1,
            ..inner
        };
        Paragraph::new(Line::styled(
            hint.to_string(),
            Style::default().fg(self.theme.muted()),
        ))
        .alignment(Alignment::Center)
        .render(mid, buf);
    }

    /// Category labels for the x axis: first, middle, last
    fn x_labels(&self) -> Vec<Line<'static>> {
        let labels = &self.spec.labels;
        let muted = Style::default().fg(self.theme.muted());
        match labels.len() {
            0 => Vec::new(),
            1 | 2 => labels.iter().map(|l| Line::styled(l.clone(), muted)).collect(),
            n => [0, n / 2, n - 1]
                .iter()
                .map(|&i| Line::styled(labels[i].clone(), muted))
                .collect(),
        }
    }

    fn y_axis(&self, axis: &AxisSpec, upper: f64) -> Axis<'static> {
        let muted = Style::default().fg(self.theme.muted());
        let mid = axis.min + (upper - axis.min) / 2.0;
        Axis::default()
            .style(muted)
            .bounds([axis.min, upper])
            .labels(
                [axis.min, mid, upper]
                    .iter()
                    .map(|v| Line::styled(axis.format_tick(*v), muted))
                    .collect::<Vec<_>>(),
            )
    }

    fn x_axis(&self) -> Axis<'static> {
        let last = self.spec.labels.len().saturating_sub(1).max(1) as f64;
        Axis::default()
            .style(Style::default().fg(self.theme.muted()))
            .bounds([0.0, last])
            .labels(self.x_labels())
    }

    fn legend(&self) -> Option<LegendPosition> {
        self.spec.show_legend.then_some(LegendPosition::TopLeft)
    }

    fn render_line(&self, area: Rect, buf: &mut Buffer) {
        let Some(series) = self.spec.series_on(AxisSide::Left) else {
            return self.render_hint(area, buf, "No data");
        };
        let points = to_points(&series.values, 1.0);
        let upper = self.spec.left_axis.upper_bound(&series.values);

        let dataset = Dataset::default()
            .name(series.name.clone())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(self.series_color(series)))
            .data(&points);

        Chart::new(vec![dataset])
            .block(self.block())
            .x_axis(self.x_axis())
            .y_axis(self.y_axis(&self.spec.left_axis, upper))
            .legend_position(self.legend())
            .render(area, buf);
    }

    /// Bars on the left scale; the right-axis line is rescaled onto the same
    /// bounds and its ticks are drawn in a strip on the right edge.
    fn render_bar_line(&self, area: Rect, buf: &mut Buffer) {
        let (Some(bars), Some(right_axis)) =
            (self.spec.series_on(AxisSide::Left), self.spec.right_axis.as_ref())
        else {
            return self.render_line(area, buf);
        };

        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        let [plot, ticks] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(RIGHT_AXIS_WIDTH)])
                .areas(inner);

        let line = self.spec.series_on(AxisSide::Right);
        let left_upper = self.spec.left_axis.upper_bound(&bars.values);
        let right_upper = line
            .map(|l| right_axis.upper_bound(&l.values))
            .unwrap_or(100.0);
        let scale = (left_upper - self.spec.left_axis.min) / (right_upper - right_axis.min);

        let bar_points = to_points(&bars.values, 1.0);
        let line_points = line
            .map(|l| to_points(&l.values, scale))
            .unwrap_or_default();

        let mut datasets = vec![Dataset::default()
            .name(bars.name.clone())
            .marker(symbols::Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(self.series_color(bars)))
            .data(&bar_points)];
        if let Some(line) = line {
            datasets.push(
                Dataset::default()
                    .name(line.name.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(self.series_color(line)))
                    .data(&line_points),
            );
        }

        Chart::new(datasets)
            .x_axis(self.x_axis())
            .y_axis(self.y_axis(&self.spec.left_axis, left_upper))
            .legend_position(self.legend())
            .render(plot, buf);

        self.render_right_ticks(ticks, buf, right_axis, right_upper);
    }

    fn render_right_ticks(&self, area: Rect, buf: &mut Buffer, axis: &AxisSpec, upper: f64) {
        // bottom row belongs to the x-axis labels
        if area.height < 3 {
            return;
        }
        let style = Style::default().fg(self.theme.success());
        let bottom = area.y + area.height - 2;
        let mid = area.y + (bottom - area.y) / 2;
        let mid_value = axis.min + (upper - axis.min) / 2.0;
        for (y, value) in [(area.y, upper), (mid, mid_value), (bottom, axis.min)] {
            buf.set_string(area.x + 1, y, axis.format_tick(value), style);
        }
    }

    fn render_horizontal_bars(&self, area: Rect, buf: &mut Buffer) {
        let Some(series) = self.spec.series_on(AxisSide::Left) else {
            return self.render_hint(area, buf, "No data");
        };
        if series.values.is_empty() {
            return self.render_hint(area, buf, "No model executions in range");
        }

        let bars: Vec<Bar> = self
            .spec
            .labels
            .iter()
            .zip(&series.values)
            .map(|(label, &value)| {
                Bar::default()
                    .value(value.max(0.0).round() as u64)
                    .label(Line::from(label.clone()))
            })
            .collect();

        BarChart::default()
            .block(self.block())
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .bar_style(Style::default().fg(self.series_color(series)))
            .value_style(
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            )
            .label_style(Style::default().fg(self.theme.text()))
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}

impl Widget for ChartView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !Self::fits(area) {
            if area.height > 0 {
                buf.set_string(
                    area.x,
                    area.y,
                    "(enlarge terminal to show chart)",
                    Style::default().fg(self.theme.muted()),
                );
            }
            return;
        }

        match self.spec.kind {
            ChartKind::Line => self.render_line(area, buf),
            ChartKind::BarLine => self.render_bar_line(area, buf),
            ChartKind::HorizontalBar => self.render_horizontal_bars(area, buf),
        }
    }
}

/// Index-based x coordinates, y scaled by `scale`
fn to_points(values: &[f64], scale: f64) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, v * scale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{
        build_dual_axis_chart_spec, build_model_usage_chart_spec, build_time_series_chart_spec,
        TimeSeriesMetric,
    };
    use crate::types::{DailyBucket, ModelUsageEntry};
    use chrono::NaiveDate;

    fn buckets() -> Vec<DailyBucket> {
        (1..=5)
            .map(|d| {
                let mut b = DailyBucket::empty(NaiveDate::from_ymd_opt(2024, 3, d).unwrap());
                b.cost = d as f64;
                b.tokens = 100 * d as u64;
                b.executions = d as u64;
                b.successes = d as u64;
                b.finish();
                b
            })
            .collect()
    }

    fn render(spec: &ChartSpec, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        ChartView::new(spec, Theme::Dark).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_to_points_scales_y() {
        assert_eq!(to_points(&[1.0, 2.0], 0.5), vec![(0.0, 0.5), (1.0, 1.0)]);
        assert!(to_points(&[], 1.0).is_empty());
    }

    #[test]
    fn test_fits_minimum_size() {
        assert!(ChartView::fits(Rect::new(0, 0, MIN_CHART_WIDTH, MIN_CHART_HEIGHT)));
        assert!(!ChartView::fits(Rect::new(0, 0, MIN_CHART_WIDTH - 1, 20)));
        assert!(!ChartView::fits(Rect::new(0, 0, 80, MIN_CHART_HEIGHT - 1)));
    }

    #[test]
    fn test_line_chart_renders_title_and_labels() {
        let spec = build_time_series_chart_spec(&buckets(), TimeSeriesMetric::Cost, Some("$"));
        let text = render(&spec, 60, 14);

        assert!(text.contains("Cost Over Time"));
        assert!(text.contains("3/1"));
        assert!(text.contains("3/5"));
        assert!(text.contains("$5"));
    }

    #[test]
    fn test_bar_line_chart_draws_right_axis() {
        let spec = build_dual_axis_chart_spec(&buckets());
        let text = render(&spec, 70, 16);

        assert!(text.contains("Executions & Success Rate"));
        assert!(text.contains("100%"));
        assert!(text.contains("0%"));
    }

    #[test]
    fn test_horizontal_bars_show_labels() {
        let entries = vec![
            ModelUsageEntry {
                model: "gpt-4".into(),
                executions: 12,
                tokens: 0,
                cost: 0.0,
            },
            ModelUsageEntry {
                model: "gpt-3.5".into(),
                executions: 3,
                tokens: 0,
                cost: 0.0,
            },
        ];
        let spec = build_model_usage_chart_spec(&entries, 20);
        let text = render(&spec, 60, 10);

        assert!(text.contains("Top Model Usage"));
        assert!(text.contains("gpt-4"));
        assert!(text.contains("gpt-3.5"));
    }

    #[test]
    fn test_horizontal_bars_empty_hint() {
        let spec = build_model_usage_chart_spec(&[], 20);
        let text = render(&spec, 60, 10);
        assert!(text.contains("No model executions in range"));
    }

    #[test]
    fn test_too_small_area_shows_hint() {
        let spec = build_dual_axis_chart_spec(&buckets());
        let text = render(&spec, 40, 4);
        assert!(text.contains("enlarge terminal"));
        assert!(!text.contains("Executions & Success Rate"));
    }
}
