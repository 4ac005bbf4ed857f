//! Overview view - execution summary and resource counts as card grids

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
};

use super::cards::{grid_height, CardGrid};
use super::layout::{render_chrome, render_title};
use super::tabs::Tab;
use crate::presenter::{DashboardModel, SummaryCard, PRIMARY_CARD_COUNT};
use crate::tui::theme::Theme;

pub struct OverviewView<'a> {
    model: &'a DashboardModel,
    theme: Theme,
}

impl<'a> OverviewView<'a> {
    pub fn new(model: &'a DashboardModel, theme: Theme) -> Self {
        Self { model, theme }
    }

    /// All summary cards when they fit, otherwise the primary row only
    fn visible_summary_cards(&self, width: u16, height: u16) -> &'a [SummaryCard] {
        let cards = self.model.summary_cards.as_slice();
        let needed = grid_height(cards.len(), width)
            + grid_height(self.model.resource_cards.len(), width)
            + 4;
        if needed <= height {
            cards
        } else {
            &cards[..PRIMARY_CARD_COUNT.min(cards.len())]
        }
    }
}

impl Widget for OverviewView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let body = render_chrome(area, buf, Tab::Overview, self.theme);

        let summary = self.visible_summary_cards(body.width, body.height);
        let resources = self.model.resource_cards.as_slice();

        let [summary_title, _, summary_grid, resource_title, _, resource_grid, _] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(grid_height(summary.len(), body.width)),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(grid_height(resources.len(), body.width)),
                Constraint::Min(0),
            ])
            .areas(body);

        render_title(summary_title, buf, "Executions", self.theme);
        CardGrid::new(summary, self.theme).render(summary_grid, buf);

        render_title(resource_title, buf, "Resources", self.theme);
        CardGrid::new(resources, self.theme).render(resource_grid, buf);
    }
}
