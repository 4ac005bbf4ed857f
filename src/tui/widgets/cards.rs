//! Summary card grid

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::presenter::SummaryCard;
use crate::tui::theme::Theme;

pub const CARD_WIDTH: u16 = 28;
pub const CARD_HEIGHT: u16 = 5;

const CARD_GAP: u16 = 2;
const MAX_COLS: usize = 4;

/// Cards that fit on one row of `width` columns (at least one)
pub fn cards_per_row(width: u16) -> usize {
    let usable_width = width.saturating_sub(4);
    let cards = (usable_width / (CARD_WIDTH + CARD_GAP)) as usize;
    cards.clamp(1, MAX_COLS)
}

/// Height needed to show `count` cards at `width`
pub fn grid_height(count: usize, width: u16) -> u16 {
    let rows = count.div_ceil(cards_per_row(width));
    (rows as u16) * (CARD_HEIGHT + 1)
}

pub struct CardGrid<'a> {
    cards: &'a [SummaryCard],
    theme: Theme,
}

impl<'a> CardGrid<'a> {
    pub fn new(cards: &'a [SummaryCard], theme: Theme) -> Self {
        Self { cards, theme }
    }

    fn render_card(&self, area: Rect, buf: &mut Buffer, card: &SummaryCard) {
        let color = self.theme.tone(card.tone);
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .render(area, buf);

        if area.height > 2 {
            let title_x = area.x + (area.width.saturating_sub(card.label.chars().count() as u16)) / 2;
            buf.set_string(title_x, area.y + 1, &card.label, Style::default().fg(color));
        }

        if area.height > 3 {
            let value_x = area.x + (area.width.saturating_sub(card.value.chars().count() as u16)) / 2;
            buf.set_string(
                value_x,
                area.y + 3,
                &card.value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }
    }
}

impl Widget for CardGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.cards.is_empty() || area.width < CARD_WIDTH || area.height < CARD_HEIGHT {
            return;
        }

        let cols = cards_per_row(area.width).min(self.cards.len());
        let total_width = (cols as u16) * CARD_WIDTH + (cols.saturating_sub(1) as u16) * CARD_GAP;
        let start_x = area.x + (area.width.saturating_sub(total_width)) / 2;

        for (i, card) in self.cards.iter().enumerate() {
            let row = (i / cols) as u16;
            let col = (i % cols) as u16;

            let card_y = area.y + row * (CARD_HEIGHT + 1);
            if card_y + CARD_HEIGHT > area.y + area.height {
                break;
            }

            let card_area = Rect {
                x: start_x + col * (CARD_WIDTH + CARD_GAP),
                y: card_y,
                width: CARD_WIDTH,
                height: CARD_HEIGHT,
            };
            self.render_card(card_area, buf, card);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::CardTone;

    fn card(label: &str, value: &str) -> SummaryCard {
        SummaryCard {
            label: label.into(),
            value: value.into(),
            tone: CardTone::Primary,
        }
    }

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_cards_per_row() {
        assert_eq!(cards_per_row(20), 1);
        assert_eq!(cards_per_row(70), 2);
        assert_eq!(cards_per_row(100), 3);
        assert_eq!(cards_per_row(200), 4);
    }

    #[test]
    fn test_grid_height() {
        // 4 columns at 200 wide: 8 cards = 2 rows
        assert_eq!(grid_height(8, 200), 2 * (CARD_HEIGHT + 1));
        assert_eq!(grid_height(4, 200), CARD_HEIGHT + 1);
        // 2 columns at 70 wide
        assert_eq!(grid_height(5, 70), 3 * (CARD_HEIGHT + 1));
    }

    #[test]
    fn test_card_grid_renders_label_and_value() {
        let cards = vec![card("Total Executions", "1,234"), card("Success Rate", "97.3%")];
        let area = Rect::new(0, 0, 80, 6);
        let mut buf = Buffer::empty(area);
        CardGrid::new(&cards, Theme::Dark).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Total Executions"));
        assert!(text.contains("1,234"));
        assert!(text.contains("97.3%"));
    }

    #[test]
    fn test_card_grid_clips_rows_that_do_not_fit() {
        let cards: Vec<SummaryCard> = (0..8).map(|i| card(&format!("Card {}", i), "0")).collect();
        // one row of four at this width and height
        let area = Rect::new(0, 0, 130, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        CardGrid::new(&cards, Theme::Dark).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Card 3"));
        assert!(!text.contains("Card 4"));
    }
}
