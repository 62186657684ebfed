use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
};
use tracing::error;

use crate::core::format;
use crate::core::metrics::BreakdownRow;
use crate::core::sort::{SortField, TableSort, sort_rows};
use crate::tui::action::Action;
use crate::tui::chart;
use crate::tui::component::{Component, Focusable};
use crate::tui::theme::Theme;

/// A sortable breakdown table with a sparkline column.
///
/// Left/Right move the header cursor; Sort "clicks" the highlighted column
/// (same column flips direction, a new column resets to descending). The
/// rendered rows are always a freshly sorted projection of the fixture
/// rows.
pub struct BreakdownTable {
    title: String,
    rows: Vec<BreakdownRow>,
    sort: TableSort,
    header_cursor: SortField,
    focused: bool,
    supported_actions: Vec<Action>,
}

impl BreakdownTable {
    pub fn new(title: &str, rows: Vec<BreakdownRow>) -> Self {
        Self {
            title: title.to_string(),
            rows,
            sort: TableSort::default(),
            header_cursor: SortField::Orders,
            focused: false,
            supported_actions: vec![
                Action::MoveLeft,
                Action::MoveRight,
                Action::Sort,
                Action::Export,
            ],
        }
    }

    pub fn sort(&self) -> TableSort {
        self.sort
    }

    pub fn sorted_rows(&self) -> Vec<BreakdownRow> {
        sort_rows(&self.rows, self.sort)
    }

    fn move_cursor(&mut self, delta: isize) {
        let fields = SortField::all();
        let current = fields
            .iter()
            .position(|f| *f == self.header_cursor)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(fields.len() as isize) as usize;
        self.header_cursor = fields[next];
    }

    /// The sorted rows as CSV, for the clipboard export
    pub fn to_csv(&self) -> String {
        let mut out = String::from("name,orders,cvr,gnarr\n");
        for row in self.sorted_rows() {
            out.push_str(&format!(
                "{},{},{:.1},{:.1}\n",
                row.name, row.orders, row.cvr, row.gnarr
            ));
        }
        out
    }

    fn export(&self) {
        if let Err(e) = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(self.to_csv()))
        {
            error!("Failed to copy {} to clipboard: {e}", self.title);
        }
    }
}

impl Component for BreakdownTable {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::MoveLeft => {
                self.move_cursor(-1);
                Ok(true)
            }
            Action::MoveRight => {
                self.move_cursor(1);
                Ok(true)
            }
            Action::Sort => {
                self.sort.activate(self.header_cursor);
                Ok(true)
            }
            Action::Export => {
                self.export();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let header_cells: Vec<Cell> = SortField::all()
            .iter()
            .map(|field| {
                let mut text = field.title().to_string();
                if self.sort.field == *field {
                    text = format!("{text} {}", self.sort.direction.arrow());
                }
                let style = if self.focused && self.header_cursor == *field {
                    theme.selected_style()
                } else {
                    theme.header_style()
                };
                Cell::from(text).style(style)
            })
            .chain([Cell::from("8W Trend").style(theme.header_style())])
            .collect();
        let header = Row::new(header_cells);

        let rows: Vec<Row> = self
            .sorted_rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let style = if i % 2 == 1 {
                    theme.alt_row_style()
                } else {
                    theme.normal_style()
                };
                Row::new(vec![
                    Cell::from(row.name.clone()),
                    Cell::from(format::compact_count(row.orders as f64)),
                    Cell::from(format::pct1(row.cvr)),
                    Cell::from(format::currency_m(row.gnarr)),
                    Cell::from(chart::sparkline_string(&row.trend)),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(14),
                Constraint::Length(8),
                Constraint::Length(7),
                Constraint::Length(11),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(self.title.clone())
                .border_style(if self.focused {
                    theme.focused_border_style()
                } else {
                    theme.border_style()
                }),
        );

        frame.render_widget(table, area);
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        "BreakdownTable"
    }
}

impl Focusable for BreakdownTable {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sort::SortDirection;
    use crate::data::fixtures;

    fn table() -> BreakdownTable {
        BreakdownTable::new("Geographic Breakdown", fixtures::breakdown_rows())
    }

    #[test]
    fn test_default_sort_is_orders_descending() {
        let table = table();
        let names: Vec<String> = table.sorted_rows().iter().map(|r| r.name.clone()).collect();
        assert_eq!(names, ["North America", "Europe", "Asia Pacific"]);
    }

    #[test]
    fn test_sort_on_current_column_flips_direction() {
        let mut table = table();
        table.handle_action(Action::Sort).unwrap();
        assert_eq!(table.sort().direction, SortDirection::Ascending);
        let names: Vec<String> = table.sorted_rows().iter().map(|r| r.name.clone()).collect();
        assert_eq!(names, ["Asia Pacific", "Europe", "North America"]);
    }

    #[test]
    fn test_sort_on_new_column_resets_to_descending() {
        let mut table = table();
        // Move the header cursor from Orders to Name and "click"
        table.handle_action(Action::MoveLeft).unwrap();
        table.handle_action(Action::Sort).unwrap();
        assert_eq!(table.sort().field, SortField::Name);
        assert_eq!(table.sort().direction, SortDirection::Descending);
        let names: Vec<String> = table.sorted_rows().iter().map(|r| r.name.clone()).collect();
        assert_eq!(names, ["North America", "Europe", "Asia Pacific"]);
    }

    #[test]
    fn test_header_cursor_wraps() {
        let mut table = table();
        table.handle_action(Action::MoveRight).unwrap(); // Cvr
        table.handle_action(Action::MoveRight).unwrap(); // Gnarr
        table.handle_action(Action::MoveRight).unwrap(); // wraps to Name
        table.handle_action(Action::Sort).unwrap();
        assert_eq!(table.sort().field, SortField::Name);
    }

    #[test]
    fn test_csv_follows_the_active_sort() {
        let mut table = table();
        table.handle_action(Action::Sort).unwrap(); // orders ascending
        let csv = table.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "name,orders,cvr,gnarr");
        assert!(lines[1].starts_with("Asia Pacific,612005,2.9,161.3"));
        assert_eq!(lines.len(), 4);
    }
}
