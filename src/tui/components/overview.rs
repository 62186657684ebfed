use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::data::fixtures;
use crate::tui::action::Action;
use crate::tui::component::{Component, Focusable};
use crate::tui::components::breakdown_table::BreakdownTable;
use crate::tui::components::metric_cards::MetricCards;
use crate::tui::components::trend_view::TrendView;
use crate::tui::theme::Theme;

/// Panes of the overview, in NextPane order
const PANE_COUNT: usize = 3;

/// The overview tab: metric cards, the trend section, and the two
/// breakdown tables. NextPane/PrevPane move keyboard focus between the
/// trend section and the tables; everything else routes to the focused
/// child.
pub struct OverviewView {
    cards: MetricCards,
    trend: TrendView,
    geo_table: BreakdownTable,
    segment_table: BreakdownTable,
    pane: usize,
    focused: bool,
    supported_actions: Vec<Action>,
}

impl OverviewView {
    pub fn new() -> Self {
        let mut view = Self {
            cards: MetricCards::new(fixtures::metrics()),
            trend: TrendView::new(),
            geo_table: BreakdownTable::new("Geographic Breakdown", fixtures::breakdown_rows()),
            segment_table: BreakdownTable::new("Segment Breakdown", fixtures::segment_rows()),
            pane: 0,
            focused: false,
            supported_actions: vec![Action::NextPane, Action::PrevPane],
        };
        view.apply_focus();
        view
    }

    pub fn trend(&self) -> &TrendView {
        &self.trend
    }

    pub fn geo_table(&self) -> &BreakdownTable {
        &self.geo_table
    }

    fn apply_focus(&mut self) {
        self.trend.set_focused(self.focused && self.pane == 0);
        self.geo_table.set_focused(self.focused && self.pane == 1);
        self.segment_table.set_focused(self.focused && self.pane == 2);
    }

    fn focused_child(&mut self) -> &mut dyn Component {
        match self.pane {
            1 => &mut self.geo_table,
            2 => &mut self.segment_table,
            _ => &mut self.trend,
        }
    }
}

impl Default for OverviewView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for OverviewView {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        // The metric picker swallows everything while open
        if self.trend.selector_open() {
            return self.trend.handle_action(action);
        }

        match action {
            Action::NextPane => {
                self.pane = (self.pane + 1) % PANE_COUNT;
                self.apply_focus();
                Ok(true)
            }
            Action::PrevPane => {
                self.pane = (self.pane + PANE_COUNT - 1) % PANE_COUNT;
                self.apply_focus();
                Ok(true)
            }
            other => self.focused_child().handle_action(other),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8),
                Constraint::Min(10),
                Constraint::Length(7),
            ])
            .split(area);

        self.cards.render(frame, rows[0], theme);
        self.trend.render(frame, rows[1], theme);

        let tables = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);
        self.geo_table.render(frame, tables[0], theme);
        self.segment_table.render(frame, tables[1], theme);
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        "OverviewView"
    }
}

impl Focusable for OverviewView {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.apply_focus();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sort::{SortDirection, SortField};

    #[test]
    fn test_pane_cycling_moves_focus() {
        let mut view = OverviewView::new();
        view.set_focused(true);
        assert!(view.trend.is_focused());

        view.handle_action(Action::NextPane).unwrap();
        assert!(view.geo_table.is_focused());
        assert!(!view.trend.is_focused());

        view.handle_action(Action::NextPane).unwrap();
        assert!(view.segment_table.is_focused());

        view.handle_action(Action::NextPane).unwrap();
        assert!(view.trend.is_focused());
    }

    #[test]
    fn test_actions_route_to_the_focused_table() {
        let mut view = OverviewView::new();
        view.set_focused(true);
        view.handle_action(Action::NextPane).unwrap(); // geo table
        view.handle_action(Action::Sort).unwrap();
        assert_eq!(view.geo_table().sort().direction, SortDirection::Ascending);
        // The other table keeps its own sort state
        assert_eq!(view.segment_table.sort().direction, SortDirection::Descending);
    }

    #[test]
    fn test_tables_sort_independently() {
        let mut view = OverviewView::new();
        view.set_focused(true);
        view.handle_action(Action::NextPane).unwrap();
        view.handle_action(Action::NextPane).unwrap(); // segment table
        view.handle_action(Action::MoveLeft).unwrap(); // header cursor to Name
        view.handle_action(Action::Sort).unwrap();
        assert_eq!(view.segment_table.sort().field, SortField::Name);
        assert_eq!(view.geo_table().sort().field, SortField::Orders);
    }

    #[test]
    fn test_interval_toggle_reaches_the_trend_pane() {
        use crate::data::trend::TrendInterval;
        let mut view = OverviewView::new();
        view.set_focused(true);
        view.handle_action(Action::ToggleInterval).unwrap();
        assert_eq!(view.trend().interval(), TrendInterval::Quarterly);
    }
}
