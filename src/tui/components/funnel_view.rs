use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::core::format;
use crate::core::metrics::Funnel;
use crate::tui::action::Action;
use crate::tui::chart;
use crate::tui::component::{Component, Focusable};
use crate::tui::components::multi_select::MultiSelect;
use crate::tui::theme::Theme;

/// Funnel analysis: step bars with drop-off annotations, the conversion
/// trend, and a summary panel, for one funnel at a time.
///
/// Left/Right cycle the selected funnel; Confirm opens a single-select
/// picker that closes on pick.
pub struct FunnelView {
    funnels: Vec<Funnel>,
    selected: usize,
    picker: Option<MultiSelect>,
    focused: bool,
    supported_actions: Vec<Action>,
}

impl FunnelView {
    pub fn new(funnels: Vec<Funnel>) -> Self {
        Self {
            funnels,
            selected: 0,
            picker: None,
            focused: false,
            supported_actions: vec![
                Action::MoveLeft,
                Action::MoveRight,
                Action::Confirm,
            ],
        }
    }

    pub fn selected_funnel(&self) -> Option<&Funnel> {
        self.funnels.get(self.selected)
    }

    pub fn picker_open(&self) -> bool {
        self.picker.is_some()
    }

    fn cycle(&mut self, delta: isize) {
        if self.funnels.is_empty() {
            return;
        }
        let len = self.funnels.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    fn open_picker(&mut self) {
        let options: Vec<String> = self.funnels.iter().map(|f| f.name.clone()).collect();
        let current = self.selected_funnel().map(|f| f.name.clone());
        let mut picker = MultiSelect::single("Funnel", options, current);
        picker.open();
        self.picker = Some(picker);
    }

    fn render_steps(&self, frame: &mut Frame, area: Rect, theme: &Theme, funnel: &Funnel) {
        let mut constraints = Vec::new();
        for _ in &funnel.steps {
            constraints.push(Constraint::Length(1)); // info line
            constraints.push(Constraint::Length(1)); // gauge
        }
        constraints.push(Constraint::Min(0));
        let slots = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (i, step) in funnel.steps.iter().enumerate() {
            let mut spans = vec![
                Span::styled(
                    format!("{}. {}", i + 1, step.name),
                    theme.normal_style().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(format::thousands(step.value), theme.normal_style()),
                Span::raw("  "),
                Span::styled(format::pct1(step.percentage), theme.muted_style()),
            ];
            if let Some(drop) = step.drop_off {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    format!("-{} drop", format::pct1(drop)),
                    theme.error_style(),
                ));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), slots[i * 2]);

            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(theme.chart_line).bg(theme.row_alt_bg))
                .ratio((step.percentage / 100.0).clamp(0.0, 1.0))
                .label(format::pct1(step.percentage));
            frame.render_widget(gauge, slots[i * 2 + 1]);
        }
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect, theme: &Theme, funnel: &Funnel) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Funnel Metrics")
            .border_style(theme.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let entries = [
            ("Total Entries", format::thousands(funnel.total_entries()), theme.normal_style()),
            (
                "Final Conversions",
                format::thousands(funnel.final_conversions()),
                theme.normal_style(),
            ),
            (
                "Overall Conversion Rate",
                format::pct1(funnel.overall_rate()),
                theme.success_style(),
            ),
            (
                "Biggest Drop-off",
                format::pct1(funnel.biggest_drop_off()),
                theme.error_style(),
            ),
        ];
        let lines: Vec<Line> = entries
            .into_iter()
            .map(|(label, value, style)| {
                Line::from(vec![
                    Span::styled(format!("{label:<24}"), theme.muted_style()),
                    Span::styled(value, style.add_modifier(Modifier::BOLD)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for FunnelView {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        if let Some(picker) = &mut self.picker {
            let handled = picker.handle_action(action)?;
            if handled {
                if !picker.is_open() {
                    // Single mode closed: either a pick or a cancel
                    if let Some(name) = picker.selected() {
                        if let Some(index) = self.funnels.iter().position(|f| f.name == name) {
                            self.selected = index;
                        }
                    }
                    self.picker = None;
                }
                return Ok(true);
            }
            return Ok(false);
        }

        match action {
            Action::MoveLeft => {
                self.cycle(-1);
                Ok(true)
            }
            Action::MoveRight => {
                self.cycle(1);
                Ok(true)
            }
            Action::Confirm => {
                self.open_picker();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(funnel) = self.selected_funnel().cloned() else {
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(10)])
            .split(area);

        let steps_block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Funnel Analysis — {} (←/→ to switch)", funnel.name))
            .border_style(if self.focused {
                theme.focused_border_style()
            } else {
                theme.border_style()
            });
        let steps_inner = steps_block.inner(rows[0]);
        frame.render_widget(steps_block, rows[0]);
        self.render_steps(frame, steps_inner, theme, &funnel);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        let trend_block = Block::default()
            .borders(Borders::ALL)
            .title("Conversion Trend")
            .border_style(theme.border_style());
        chart::render_rate_trend(frame, bottom[0], theme, trend_block, &funnel.trend);
        self.render_summary(frame, bottom[1], theme, &funnel);

        if let Some(picker) = &mut self.picker {
            let height = picker.dropdown_height().min(area.height);
            let width = area.width.min(28);
            let popup = Rect {
                x: area.x + (area.width.saturating_sub(width)) / 2,
                y: area.y + 1,
                width,
                height,
            };
            picker.render(frame, popup, theme);
        }
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        "FunnelView"
    }
}

impl Focusable for FunnelView {
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
    use crate::data::fixtures;

    fn view() -> FunnelView {
        FunnelView::new(fixtures::funnels())
    }

    #[test]
    fn test_cycling_wraps_both_ways() {
        let mut view = view();
        assert_eq!(view.selected_funnel().unwrap().name, "3in1");
        view.handle_action(Action::MoveLeft).unwrap();
        assert_eq!(view.selected_funnel().unwrap().name, "Recommendation");
        view.handle_action(Action::MoveRight).unwrap();
        assert_eq!(view.selected_funnel().unwrap().name, "3in1");
    }

    #[test]
    fn test_picker_selects_and_closes() {
        let mut view = view();
        view.handle_action(Action::Confirm).unwrap();
        assert!(view.picker_open());

        // Move to "Commitment" and pick it; single mode closes on pick
        view.handle_action(Action::MoveDown).unwrap();
        view.handle_action(Action::MoveDown).unwrap();
        view.handle_action(Action::Confirm).unwrap();
        assert!(!view.picker_open());
        assert_eq!(view.selected_funnel().unwrap().name, "Commitment");
    }

    #[test]
    fn test_picker_cancel_keeps_selection() {
        let mut view = view();
        view.handle_action(Action::MoveRight).unwrap(); // TwP
        view.handle_action(Action::Confirm).unwrap();
        view.handle_action(Action::Cancel).unwrap();
        assert!(!view.picker_open());
        assert_eq!(view.selected_funnel().unwrap().name, "TwP");
    }

    #[test]
    fn test_empty_funnel_list_is_harmless() {
        let mut view = FunnelView::new(Vec::new());
        assert!(view.selected_funnel().is_none());
        view.handle_action(Action::MoveRight).unwrap();
        assert!(view.selected_funnel().is_none());
    }
}
