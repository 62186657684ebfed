use color_eyre::Result;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::tui::action::Action;
use crate::tui::component::{Component, Focusable};
use crate::tui::theme::Theme;

/// Selection behavior of a [`MultiSelect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// One value; picking an option replaces it and closes the control
    Single,
    /// Many values; picking an option toggles its membership
    Multi,
}

/// Toggle `option` in `values`: remove it when present, append it when not.
///
/// Appended options keep insertion order. Applying the same toggle twice
/// returns the list to its original state.
pub fn toggle(values: &mut Vec<String>, option: &str) {
    if let Some(pos) = values.iter().position(|v| v == option) {
        values.remove(pos);
    } else {
        values.push(option.to_string());
    }
}

/// A dropdown over a caller-supplied option catalog.
///
/// The control is a thin shell over the caller's selection: its only real
/// state is the open flag and the cursor. Options are not validated against
/// the current values — an out-of-catalog value arriving from the caller is
/// displayed but can never be produced through the control itself.
pub struct MultiSelect {
    title: String,
    options: Vec<String>,
    values: Vec<String>,
    mode: SelectionMode,
    open: bool,
    cursor: usize,
    focused: bool,
    supported_actions: Vec<Action>,
}

impl MultiSelect {
    pub fn multi(title: &str, options: Vec<String>, values: Vec<String>) -> Self {
        Self::new(title, options, values, SelectionMode::Multi)
    }

    pub fn single(title: &str, options: Vec<String>, value: Option<String>) -> Self {
        Self::new(title, options, value.into_iter().collect(), SelectionMode::Single)
    }

    fn new(title: &str, options: Vec<String>, values: Vec<String>, mode: SelectionMode) -> Self {
        Self {
            title: title.to_string(),
            options,
            values,
            mode,
            open: false,
            cursor: 0,
            focused: false,
            supported_actions: vec![
                Action::MoveUp,
                Action::MoveDown,
                Action::GoToTop,
                Action::GoToBottom,
                Action::Confirm,
                Action::Cancel,
            ],
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Single-mode accessor: the current value, if any
    pub fn selected(&self) -> Option<&str> {
        self.values.first().map(|v| v.as_str())
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.cursor = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Summary shown while the control is closed
    pub fn display_value(&self) -> String {
        match self.mode {
            SelectionMode::Multi => {
                if self.values.is_empty() {
                    "Select...".to_string()
                } else {
                    format!("{} selected", self.values.len())
                }
            }
            SelectionMode::Single => self
                .values
                .first()
                .cloned()
                .unwrap_or_else(|| "Select...".to_string()),
        }
    }

    /// Apply the option under the cursor
    fn pick(&mut self) {
        let Some(option) = self.options.get(self.cursor).cloned() else {
            return;
        };
        match self.mode {
            SelectionMode::Multi => toggle(&mut self.values, &option),
            SelectionMode::Single => {
                self.values = vec![option];
                self.open = false;
            }
        }
    }

    /// Height the dropdown list needs, borders included
    pub fn dropdown_height(&self) -> u16 {
        (self.options.len().min(14) + 2) as u16
    }
}

impl Component for MultiSelect {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        if !self.open {
            return match action {
                Action::Confirm => {
                    self.open();
                    Ok(true)
                }
                _ => Ok(false),
            };
        }
        match action {
            Action::MoveUp => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                Ok(true)
            }
            Action::MoveDown => {
                if self.cursor + 1 < self.options.len() {
                    self.cursor += 1;
                }
                Ok(true)
            }
            Action::GoToTop => {
                self.cursor = 0;
                Ok(true)
            }
            Action::GoToBottom => {
                self.cursor = self.options.len().saturating_sub(1);
                Ok(true)
            }
            Action::Confirm => {
                self.pick();
                Ok(true)
            }
            Action::Cancel => {
                self.close();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if self.open {
            let items: Vec<ListItem> = self
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let selected = self.values.iter().any(|v| v == option);
                    let marker = match (self.mode, selected) {
                        (SelectionMode::Multi, true) => "[x] ",
                        (SelectionMode::Multi, false) => "[ ] ",
                        (SelectionMode::Single, true) => " \u{2022} ",
                        (SelectionMode::Single, false) => "   ",
                    };
                    let style = if i == self.cursor {
                        theme.selected_style()
                    } else if selected {
                        theme.header_style()
                    } else {
                        theme.normal_style()
                    };
                    ListItem::new(Line::from(vec![
                        Span::raw(marker),
                        Span::raw(option.clone()),
                    ]))
                    .style(style)
                })
                .collect();

            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.title.clone())
                    .border_style(theme.focused_border_style()),
            );
            frame.render_widget(Clear, area);
            frame.render_widget(list, area);
        } else {
            let border = if self.focused {
                theme.focused_border_style()
            } else {
                theme.border_style()
            };
            let summary = Paragraph::new(self.display_value())
                .style(theme.normal_style())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(self.title.clone())
                        .border_style(border),
                );
            frame.render_widget(summary, area);
        }
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        "MultiSelect"
    }
}

impl Focusable for MultiSelect {
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

    fn options() -> Vec<String> {
        vec!["a.com".to_string(), "AH".to_string(), "CCD".to_string()]
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let original = vec!["AH".to_string()];
        let mut values = original.clone();
        toggle(&mut values, "a.com");
        toggle(&mut values, "a.com");
        assert_eq!(values, original);
    }

    #[test]
    fn test_toggle_appends_in_insertion_order() {
        let mut values = Vec::new();
        toggle(&mut values, "CCD");
        toggle(&mut values, "a.com");
        assert_eq!(values, ["CCD", "a.com"]);
    }

    #[test]
    fn test_multi_mode_stays_open_on_pick() {
        let mut select = MultiSelect::multi("Surface", options(), Vec::new());
        select.handle_action(Action::Confirm).unwrap(); // open
        assert!(select.is_open());
        select.handle_action(Action::Confirm).unwrap(); // toggle first option
        assert!(select.is_open());
        assert_eq!(select.values(), ["a.com"]);

        // Toggling again deselects
        select.handle_action(Action::Confirm).unwrap();
        assert!(select.values().is_empty());
    }

    #[test]
    fn test_single_mode_replaces_and_closes() {
        let mut select = MultiSelect::single("Funnel", options(), Some("CCD".to_string()));
        select.handle_action(Action::Confirm).unwrap(); // open
        select.handle_action(Action::MoveDown).unwrap();
        select.handle_action(Action::Confirm).unwrap(); // pick "AH"
        assert!(!select.is_open());
        assert_eq!(select.selected(), Some("AH"));
        assert_eq!(select.values().len(), 1);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut select = MultiSelect::multi("Surface", options(), Vec::new());
        select.open();
        select.handle_action(Action::MoveUp).unwrap();
        assert!(select.is_open());
        for _ in 0..10 {
            select.handle_action(Action::MoveDown).unwrap();
        }
        select.handle_action(Action::Confirm).unwrap();
        assert_eq!(select.values(), ["CCD"]);
    }

    #[test]
    fn test_display_value() {
        let mut select = MultiSelect::multi("Surface", options(), Vec::new());
        assert_eq!(select.display_value(), "Select...");
        select.open();
        select.handle_action(Action::Confirm).unwrap();
        select.handle_action(Action::MoveDown).unwrap();
        select.handle_action(Action::Confirm).unwrap();
        assert_eq!(select.display_value(), "2 selected");
    }

    #[test]
    fn test_cancel_closes_without_touching_values() {
        let mut select =
            MultiSelect::multi("Surface", options(), vec!["AH".to_string()]);
        select.open();
        select.handle_action(Action::Cancel).unwrap();
        assert!(!select.is_open());
        assert_eq!(select.values(), ["AH"]);
    }
}
