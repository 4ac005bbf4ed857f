//! Single error panel shown instead of a partial dashboard

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::tui::theme::Theme;

const PANEL_WIDTH: u16 = 64;
const PANEL_HEIGHT: u16 = 9;

pub struct ErrorPanel<'a> {
    message: &'a str,
    theme: Theme,
}

impl<'a> ErrorPanel<'a> {
    pub fn new(message: &'a str, theme: Theme) -> Self {
        Self { message, theme }
    }

    pub fn centered_area(area: Rect) -> Rect {
        let width = PANEL_WIDTH.min(area.width);
        let height = PANEL_HEIGHT.min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }
}

impl Widget for ErrorPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = Self::centered_area(area);
        Clear.render(area, buf);

        let block = Block::default()
            .title(" Dashboard unavailable ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.error()));

        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                self.message,
                Style::default()
                    .fg(self.theme.error())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("r", Style::default().fg(self.theme.accent())),
                Span::styled(": Retry  ", Style::default().fg(self.theme.muted())),
                Span::styled("q", Style::default().fg(self.theme.accent())),
                Span::styled(": Quit", Style::default().fg(self.theme.muted())),
            ]),
        ];

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_panel_centered() {
        let panel = ErrorPanel::centered_area(Rect::new(0, 0, 100, 30));
        assert_eq!(panel, Rect::new(18, 10, PANEL_WIDTH, PANEL_HEIGHT));
    }

    #[test]
    fn test_error_panel_clamps_to_small_terminal() {
        let panel = ErrorPanel::centered_area(Rect::new(0, 0, 40, 5));
        assert_eq!(panel, Rect::new(0, 0, 40, 5));
    }

    #[test]
    fn test_error_panel_shows_message_and_retry() {
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        ErrorPanel::new("invalid statistics: success rate", Theme::Dark).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Dashboard unavailable"));
        assert!(text.contains("invalid statistics"));
        assert!(text.contains("Retry"));
    }
}
