//! Shared page chrome: tab bar on top, keybinding hints at the bottom

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::tabs::{Tab, TabBar};
use crate::tui::theme::Theme;

/// Content never stretches wider than this on very wide terminals
pub const MAX_CONTENT_WIDTH: u16 = 170;

const KEY_HINTS: &[(&str, &str)] = &[
    ("q", "Quit"),
    ("Tab", "Switch view"),
    ("r", "Refresh"),
    ("?", "Help"),
];

/// Narrow `area` to [`MAX_CONTENT_WIDTH`] and center it horizontally
pub fn centered_content(area: Rect) -> Rect {
    let width = area.width.min(MAX_CONTENT_WIDTH);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

/// Draw tabs, separators and key hints; returns the body area between them
pub fn render_chrome(area: Rect, buf: &mut Buffer, tab: Tab, theme: Theme) -> Rect {
    let area = centered_content(area);
    let [_, tabs, top_sep, body, bottom_sep, keys] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    TabBar::new(tab, theme).render(tabs, buf);
    render_separator(top_sep, buf, theme);
    render_separator(bottom_sep, buf, theme);
    render_key_hints(keys, buf, theme);

    body
}

pub fn render_separator(area: Rect, buf: &mut Buffer, theme: Theme) {
    if area.height == 0 {
        return;
    }
    let line = "─".repeat(area.width as usize);
    buf.set_string(area.x, area.y, &line, Style::default().fg(theme.muted()));
}

/// Bold centered section title
pub fn render_title(area: Rect, buf: &mut Buffer, title: &str, theme: Theme) {
    Paragraph::new(Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(theme.text())
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .render(area, buf);
}

fn render_key_hints(area: Rect, buf: &mut Buffer, theme: Theme) {
    let mut spans = Vec::with_capacity(KEY_HINTS.len() * 3);
    for (i, (key, desc)) in KEY_HINTS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(theme.accent())));
        spans.push(Span::styled(
            format!(": {}", desc),
            Style::default().fg(theme.muted()),
        ));
    }
    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_centered_content_caps_width() {
        let area = Rect::new(0, 0, 200, 40);
        let content = centered_content(area);
        assert_eq!(content.width, MAX_CONTENT_WIDTH);
        assert_eq!(content.x, 15);
    }

    #[test]
    fn test_centered_content_narrow_terminal() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_content(area), area);
    }

    #[test]
    fn test_render_chrome_body_area() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let body = render_chrome(area, &mut buf, Tab::Overview, Theme::Dark);

        assert_eq!(body.y, 3);
        assert_eq!(body.height, 19);
        assert!(row_text(&buf, 1).contains("[1 Overview]"));
        assert!(row_text(&buf, 23).contains("Refresh"));
    }
}
