use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear},
};
use strum::IntoEnumIterator;

use crate::core::filters::{FilterDimension, FilterState};
use crate::tui::action::Action;
use crate::tui::component::{Component, Focusable};
use crate::tui::components::multi_select::MultiSelect;
use crate::tui::theme::Theme;

const GRID_COLUMNS: usize = 4;

/// The filter overlay: one multi-select per dimension.
///
/// The panel works on its own FilterState copy and replaces it wholesale
/// after every toggle; the app reads it back after each handled action.
/// Filters are captured but deliberately never applied to the mock
/// datasets.
pub struct FilterPanel {
    filters: FilterState,
    selects: Vec<(FilterDimension, MultiSelect)>,
    cursor: usize,
    focused: bool,
    supported_actions: Vec<Action>,
}

impl FilterPanel {
    pub fn new(filters: FilterState) -> Self {
        let selects = FilterDimension::iter()
            .map(|dimension| {
                let select = MultiSelect::multi(
                    dimension.label(),
                    dimension.options(),
                    filters.values(dimension).to_vec(),
                );
                (dimension, select)
            })
            .collect();
        Self {
            filters,
            selects,
            cursor: 0,
            focused: true,
            supported_actions: vec![
                Action::MoveUp,
                Action::MoveDown,
                Action::MoveLeft,
                Action::MoveRight,
                Action::Confirm,
                Action::Cancel,
            ],
        }
    }

    /// The current selection state (already wholesale-replaced)
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    fn open_index(&self) -> Option<usize> {
        self.selects.iter().position(|(_, s)| s.is_open())
    }

    pub fn dropdown_open(&self) -> bool {
        self.open_index().is_some()
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.selects.len() as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }
}

impl Component for FilterPanel {
    /// Returns Ok(true) to stay open, Ok(false) when the panel should close
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        if let Some(index) = self.open_index() {
            let (dimension, select) = &mut self.selects[index];
            let handled = select.handle_action(action)?;
            if handled {
                // Every toggle replaces the whole state, never a field in place
                self.filters = self.filters.with_values(*dimension, select.values().to_vec());
            }
            return Ok(true);
        }

        match action {
            Action::MoveUp => self.move_cursor(-(GRID_COLUMNS as isize)),
            Action::MoveDown => self.move_cursor(GRID_COLUMNS as isize),
            Action::MoveLeft => self.move_cursor(-1),
            Action::MoveRight => self.move_cursor(1),
            Action::Confirm => {
                if let Some((_, select)) = self.selects.get_mut(self.cursor) {
                    select.open();
                }
            }
            Action::Cancel => return Ok(false),
            _ => {}
        }
        Ok(true)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(
                "Filters — {} active (Enter: edit, Esc: close)",
                self.filters.active_dimensions()
            ))
            .border_style(theme.focused_border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let row_count = self.selects.len().div_ceil(GRID_COLUMNS);
        let mut constraints = vec![Constraint::Length(3); row_count];
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for row_index in 0..row_count {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                .split(rows[row_index]);
            for col_index in 0..GRID_COLUMNS {
                let index = row_index * GRID_COLUMNS + col_index;
                let Some((_, select)) = self.selects.get_mut(index) else {
                    continue;
                };
                if select.is_open() {
                    continue; // drawn after the grid, as an overlay
                }
                select.set_focused(index == self.cursor);
                select.render(frame, columns[col_index], theme);
            }
        }

        // The open dropdown floats over the grid
        if let Some(index) = self.open_index() {
            let select = &mut self.selects[index].1;
            let height = select.dropdown_height().min(inner.height);
            let width = inner.width.min(34);
            let popup = Rect {
                x: inner.x + (inner.width.saturating_sub(width)) / 2,
                y: inner.y + (inner.height.saturating_sub(height)) / 2,
                width,
                height,
            };
            select.render(frame, popup, theme);
        }
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        "FilterPanel"
    }
}

impl Focusable for FilterPanel {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
