//! Tab bar widget for view navigation

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Available tabs in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Trends,
    Activity,
    Models,
}

impl Tab {
    /// Get the display label for this tab
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Trends => "Trends",
            Self::Activity => "Activity",
            Self::Models => "Models",
        }
    }

    /// Get all tabs in order
    pub fn all() -> &'static [Tab] {
        &[Tab::Overview, Tab::Trends, Tab::Activity, Tab::Models]
    }

    /// Get the next tab (wrapping)
    pub fn next(self) -> Self {
        match self {
            Self::Overview => Self::Trends,
            Self::Trends => Self::Activity,
            Self::Activity => Self::Models,
            Self::Models => Self::Overview,
        }
    }

    /// Get the previous tab (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Self::Overview => Self::Models,
            Self::Trends => Self::Overview,
            Self::Activity => Self::Trends,
            Self::Models => Self::Activity,
        }
    }

    /// Get tab from number key (1-4)
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Overview),
            2 => Some(Self::Trends),
            3 => Some(Self::Activity),
            4 => Some(Self::Models),
            _ => None,
        }
    }
}

/// Tab bar: `1 Overview  [2 Trends]  3 Activity  4 Models`, centered
pub struct TabBar {
    selected: Tab,
    theme: Theme,
}

impl TabBar {
    pub fn new(selected: Tab, theme: Theme) -> Self {
        Self { selected, theme }
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::with_capacity(Tab::all().len() * 2);
        for (i, tab) in Tab::all().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let key = i + 1;
            if *tab == self.selected {
                spans.push(Span::styled(
                    format!("[{} {}]", key, tab.label()),
                    Style::default()
                        .fg(self.theme.accent())
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(
                    format!("{} {}", key, tab.label()),
                    Style::default().fg(self.theme.muted()),
                ));
            }
        }
        spans
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        Paragraph::new(Line::from(self.spans()))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
