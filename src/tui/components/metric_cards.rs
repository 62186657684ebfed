use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::core::format;
use crate::core::metrics::MetricData;
use crate::tui::action::Action;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

/// The overview's headline metric cards: value plus YoY/QoQ/WoW deltas.
///
/// Purely presentational; holds no interactive state.
pub struct MetricCards {
    metrics: Vec<MetricData>,
}

impl MetricCards {
    pub fn new(metrics: Vec<MetricData>) -> Self {
        Self { metrics }
    }

    fn delta_line(metric: &MetricData, theme: &Theme) -> Line<'static> {
        let mut spans: Vec<Span> = Vec::new();
        for (label, delta) in [("YoY", metric.yoy), ("QoQ", metric.qoq), ("WoW", metric.wow)] {
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            let arrow = if delta >= 0.0 { "▲" } else { "▼" };
            spans.push(Span::styled(format!("{label} "), theme.muted_style()));
            spans.push(Span::styled(
                format!("{}{arrow}", format::signed_pct(delta)),
                theme.delta_style(delta),
            ));
        }
        Line::from(spans)
    }
}

impl Component for MetricCards {
    fn handle_action(&mut self, _action: Action) -> Result<bool> {
        Ok(false)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if self.metrics.is_empty() {
            return;
        }
        let per_row = 3;
        let row_count = self.metrics.len().div_ceil(per_row);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, row_count as u32); row_count])
            .split(area);

        for (row_index, row_area) in rows.iter().enumerate() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, per_row as u32); per_row])
                .split(*row_area);
            for col_index in 0..per_row {
                let Some(metric) = self.metrics.get(row_index * per_row + col_index) else {
                    continue;
                };
                let body = vec![
                    Line::from(Span::styled(
                        metric.value.clone(),
                        theme.normal_style().add_modifier(Modifier::BOLD),
                    )),
                    Self::delta_line(metric, theme),
                ];
                let card = Paragraph::new(body).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(metric.title.clone())
                        .border_style(theme.border_style()),
                );
                frame.render_widget(card, columns[col_index]);
            }
        }
    }

    fn supported_actions(&self) -> &[Action] {
        &[]
    }

    fn name(&self) -> &str {
        "MetricCards"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn test_cards_ignore_actions() {
        let mut cards = MetricCards::new(fixtures::metrics());
        assert!(!cards.handle_action(Action::Confirm).unwrap());
        assert!(!cards.handle_action(Action::MoveDown).unwrap());
    }

    #[test]
    fn test_delta_line_carries_all_three_periods() {
        let theme = Theme::dark();
        let metric = &fixtures::metrics()[0];
        let line = MetricCards::delta_line(metric, &theme);
        let text: String = line.spans.iter().map(|s| s.content.clone()).collect();
        assert!(text.contains("YoY +12.4%"));
        assert!(text.contains("QoQ +3.2%"));
        assert!(text.contains("WoW -1.8%"));
    }
}
