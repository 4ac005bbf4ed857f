//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::spinner::APP_NAME;
use crate::tui::theme::Theme;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const POPUP_WIDTH: u16 = 44;
const POPUP_HEIGHT: u16 = 15;

const KEY_COLUMN: usize = 18;

/// (section header, [(key, description)])
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("Tab / Shift+Tab", "Switch view"),
            ("1-4", "Jump to view"),
        ],
    ),
    (
        "General",
        &[
            ("r", "Refresh data"),
            ("q / Esc / Ctrl+C", "Quit"),
            ("?", "Toggle help"),
        ],
    ),
];

pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }

    fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let header = Style::default()
            .fg(self.theme.warning())
            .add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(self.theme.muted());

        let mut lines = vec![Line::default()];
        for (title, bindings) in SECTIONS {
            lines.push(Line::from(Span::styled(*title, header)));
            lines.push(Line::from(Span::styled("─".repeat(width as usize), muted)));
            lines.extend(bindings.iter().map(|(key, desc)| self.keybinding(key, desc)));
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled("Press ? to close", muted)).alignment(Alignment::Center));
        lines
    }

    fn keybinding(&self, key: &str, desc: &str) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("  {:<width$}", key, width = KEY_COLUMN),
                Style::default().fg(self.theme.accent()),
            ),
            Span::styled(desc.to_string(), Style::default().fg(self.theme.text())),
        ])
    }
}

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Overlay: wipe whatever the view drew underneath
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" {} v{} ", APP_NAME, VERSION))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines(inner.width)).render(inner, buf);
    }
}
