use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tracing::error;

use crate::core::pivot::{PivotSelection, PivotZone};
use crate::data::fixtures;
use crate::tui::action::Action;
use crate::tui::component::{Component, Focusable};
use crate::tui::theme::Theme;

/// Focusable panes of the pivot builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PivotPane {
    Available,
    Rows,
    Values,
}

impl PivotPane {
    fn next(self) -> Self {
        match self {
            PivotPane::Available => PivotPane::Rows,
            PivotPane::Rows => PivotPane::Values,
            PivotPane::Values => PivotPane::Available,
        }
    }

    fn prev(self) -> Self {
        match self {
            PivotPane::Available => PivotPane::Values,
            PivotPane::Rows => PivotPane::Available,
            PivotPane::Values => PivotPane::Rows,
        }
    }
}

/// The ad-hoc pivot builder: an available-field catalog and two target
/// zones.
///
/// `r`/`v` send the highlighted available field to the rows or values zone
/// (duplicate sends are no-ops); `x` removes the highlighted field from the
/// focused zone only. The results panel is informational text — no
/// aggregation is computed.
pub struct PivotView {
    available: Vec<String>,
    dimension_count: usize,
    selection: PivotSelection,
    pane: PivotPane,
    cursor: usize,
    focused: bool,
    supported_actions: Vec<Action>,
}

impl PivotView {
    pub fn new() -> Self {
        let mut available: Vec<String> =
            fixtures::PIVOT_DIMENSIONS.iter().map(|f| f.to_string()).collect();
        available.extend(fixtures::PIVOT_METRICS.iter().map(|f| f.to_string()));
        Self {
            available,
            dimension_count: fixtures::PIVOT_DIMENSIONS.len(),
            selection: PivotSelection::new(&["Region"], &["Orders", "CVR%"]),
            pane: PivotPane::Available,
            cursor: 0,
            focused: false,
            supported_actions: vec![
                Action::MoveUp,
                Action::MoveDown,
                Action::NextPane,
                Action::PrevPane,
                Action::AddToRows,
                Action::AddToValues,
                Action::RemoveField,
                Action::Export,
            ],
        }
    }

    pub fn selection(&self) -> &PivotSelection {
        &self.selection
    }

    fn pane_len(&self) -> usize {
        match self.pane {
            PivotPane::Available => self.available.len(),
            PivotPane::Rows => self.selection.rows().len(),
            PivotPane::Values => self.selection.values().len(),
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.pane_len().saturating_sub(1));
    }

    fn highlighted_field(&self) -> Option<String> {
        let list = match self.pane {
            PivotPane::Available => return self.available.get(self.cursor).cloned(),
            PivotPane::Rows => self.selection.rows(),
            PivotPane::Values => self.selection.values(),
        };
        list.get(self.cursor).cloned()
    }

    fn add_highlighted(&mut self, zone: PivotZone) {
        if self.pane != PivotPane::Available {
            return;
        }
        if let Some(field) = self.highlighted_field() {
            self.selection.add(zone, &field);
        }
    }

    fn remove_highlighted(&mut self) {
        let zone = match self.pane {
            PivotPane::Rows => PivotZone::Rows,
            PivotPane::Values => PivotZone::Values,
            PivotPane::Available => return,
        };
        if let Some(field) = self.highlighted_field() {
            self.selection.remove(zone, &field);
            self.clamp_cursor();
        }
    }

    /// Selection summary as CSV, for the clipboard export
    pub fn to_csv(&self) -> String {
        let mut out = String::from("zone,field\n");
        for field in self.selection.rows() {
            out.push_str(&format!("rows,{field}\n"));
        }
        for field in self.selection.values() {
            out.push_str(&format!("values,{field}\n"));
        }
        out
    }

    fn export(&self) {
        if let Err(e) = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(self.to_csv()))
        {
            error!("Failed to copy pivot selection to clipboard: {e}");
        }
    }

    fn render_zone(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        title: &str,
        pane: PivotPane,
        fields: &[String],
    ) {
        let active = self.focused && self.pane == pane;
        let items: Vec<ListItem> = if fields.is_empty() {
            vec![ListItem::new("(empty — drop fields here)").style(theme.muted_style())]
        } else {
            fields
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    let style = if active && i == self.cursor {
                        theme.selected_style()
                    } else {
                        theme.normal_style()
                    };
                    ListItem::new(format!("{field} ×")).style(style)
                })
                .collect()
        };
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(if active {
                    theme.focused_border_style()
                } else {
                    theme.border_style()
                }),
        );
        frame.render_widget(list, area);
    }

    fn render_available(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let active = self.focused && self.pane == PivotPane::Available;
        let mut items: Vec<ListItem> = Vec::new();
        for (i, field) in self.available.iter().enumerate() {
            if i == 0 {
                items.push(ListItem::new("Dimensions").style(theme.header_style()));
            }
            if i == self.dimension_count {
                items.push(ListItem::new("Metrics").style(theme.header_style()));
            }
            let style = if active && i == self.cursor {
                theme.selected_style()
            } else {
                theme.normal_style()
            };
            items.push(ListItem::new(format!("  {field}")).style(style));
        }
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Available Fields (r: to rows, v: to values)")
                .border_style(if active {
                    theme.focused_border_style()
                } else {
                    theme.border_style()
                }),
        );
        frame.render_widget(list, area);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Pivot Results")
            .border_style(theme.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(Span::styled("Dynamic Pivot Table", theme.header_style())),
            Line::from(vec![
                Span::styled("Dimensions: ", theme.muted_style()),
                Span::raw(PivotSelection::describe(self.selection.rows())),
            ]),
            Line::from(vec![
                Span::styled("Metrics:    ", theme.muted_style()),
                Span::raw(PivotSelection::describe(self.selection.values())),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for PivotView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PivotView {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::NextPane => {
                self.pane = self.pane.next();
                self.clamp_cursor();
                Ok(true)
            }
            Action::PrevPane => {
                self.pane = self.pane.prev();
                self.clamp_cursor();
                Ok(true)
            }
            Action::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
                Ok(true)
            }
            Action::MoveDown => {
                if self.cursor + 1 < self.pane_len() {
                    self.cursor += 1;
                }
                Ok(true)
            }
            Action::AddToRows => {
                self.add_highlighted(PivotZone::Rows);
                Ok(true)
            }
            Action::AddToValues => {
                self.add_highlighted(PivotZone::Values);
                Ok(true)
            }
            Action::RemoveField => {
                self.remove_highlighted();
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
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(5)])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(rows[0]);

        self.render_available(frame, columns[0], theme);
        let selection_rows = self.selection.rows().to_vec();
        let selection_values = self.selection.values().to_vec();
        self.render_zone(
            frame,
            columns[1],
            theme,
            "Rows (Dimensions)",
            PivotPane::Rows,
            &selection_rows,
        );
        self.render_zone(
            frame,
            columns[2],
            theme,
            "Values (Metrics)",
            PivotPane::Values,
            &selection_values,
        );

        self.render_results(frame, rows[1], theme);
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        "PivotView"
    }
}

impl Focusable for PivotView {
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

    #[test]
    fn test_initial_selection_matches_defaults() {
        let view = PivotView::new();
        assert_eq!(view.selection().rows(), ["Region"]);
        assert_eq!(view.selection().values(), ["Orders", "CVR%"]);
    }

    #[test]
    fn test_add_from_available_is_deduplicated() {
        let mut view = PivotView::new();
        // Cursor starts on "Region", already in the rows zone
        view.handle_action(Action::AddToRows).unwrap();
        assert_eq!(view.selection().rows(), ["Region"]);

        // Move to "Country" and add it
        view.handle_action(Action::MoveDown).unwrap();
        view.handle_action(Action::AddToRows).unwrap();
        assert_eq!(view.selection().rows(), ["Region", "Country"]);
    }

    #[test]
    fn test_same_field_can_live_in_both_zones() {
        let mut view = PivotView::new();
        // Move down to "Orders" in the metrics group
        for _ in 0..5 {
            view.handle_action(Action::MoveDown).unwrap();
        }
        view.handle_action(Action::AddToRows).unwrap();
        view.handle_action(Action::AddToValues).unwrap();
        assert!(view.selection().rows().contains(&"Orders".to_string()));
        assert!(view.selection().values().contains(&"Orders".to_string()));
    }

    #[test]
    fn test_remove_only_touches_the_focused_zone() {
        let mut view = PivotView::new();
        // Removing while the available pane is focused does nothing
        view.handle_action(Action::RemoveField).unwrap();
        assert_eq!(view.selection().rows(), ["Region"]);

        // Focus the values zone and remove "Orders"
        view.handle_action(Action::NextPane).unwrap(); // rows
        view.handle_action(Action::NextPane).unwrap(); // values
        view.handle_action(Action::RemoveField).unwrap();
        assert_eq!(view.selection().values(), ["CVR%"]);
        assert_eq!(view.selection().rows(), ["Region"]);
    }

    #[test]
    fn test_cursor_clamps_after_removal() {
        let mut view = PivotView::new();
        view.handle_action(Action::NextPane).unwrap(); // rows zone, one entry
        view.handle_action(Action::RemoveField).unwrap();
        assert!(view.selection().rows().is_empty());
        // Cursor stays valid on the now-empty zone
        view.handle_action(Action::MoveDown).unwrap();
        view.handle_action(Action::RemoveField).unwrap();
    }

    #[test]
    fn test_csv_summary() {
        let view = PivotView::new();
        let csv = view.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, ["zone,field", "rows,Region", "values,Orders", "values,CVR%"]);
    }
}
