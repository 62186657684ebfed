use std::collections::BTreeMap;

use color_eyre::Result;
use rand::Rng;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
};

use crate::core::metrics::TrendPoint;
use crate::data::fixtures;
use crate::data::trend::{TrendInterval, generate_series};
use crate::tui::action::Action;
use crate::tui::chart;
use crate::tui::component::{Component, Focusable};
use crate::tui::components::multi_select::MultiSelect;
use crate::tui::theme::Theme;

/// The overview's trend section: one bar panel per selected metric, with a
/// WoW/QoQ interval toggle and a metric picker.
///
/// Series are regenerated whenever the interval or the metric selection
/// changes; the muted overlay line simulates the comparison period at
/// 0.9–1.1x the current series.
pub struct TrendView {
    interval: TrendInterval,
    selected: Vec<String>,
    series: BTreeMap<String, Vec<TrendPoint>>,
    overlays: BTreeMap<String, Vec<f64>>,
    selector: Option<MultiSelect>,
    focused: bool,
    supported_actions: Vec<Action>,
}

impl TrendView {
    pub fn new() -> Self {
        let mut view = Self {
            interval: TrendInterval::Weekly,
            selected: fixtures::DEFAULT_TREND_METRICS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            series: BTreeMap::new(),
            overlays: BTreeMap::new(),
            selector: None,
            focused: false,
            supported_actions: vec![
                Action::ToggleInterval,
                Action::SelectMetrics,
                Action::Refresh,
            ],
        };
        view.regenerate();
        view
    }

    pub fn interval(&self) -> TrendInterval {
        self.interval
    }

    pub fn selected_metrics(&self) -> &[String] {
        &self.selected
    }

    pub fn selector_open(&self) -> bool {
        self.selector.is_some()
    }

    fn regenerate(&mut self) {
        let mut rng = rand::thread_rng();
        self.series.clear();
        self.overlays.clear();
        for metric in &self.selected {
            let series = generate_series(self.interval, metric);
            let overlay = series
                .iter()
                .map(|p| p.value * (0.9 + rng.r#gen::<f64>() * 0.2))
                .collect();
            self.series.insert(metric.clone(), series);
            self.overlays.insert(metric.clone(), overlay);
        }
    }

    fn open_selector(&mut self) {
        let options = fixtures::AVAILABLE_METRICS
            .iter()
            .map(|m| m.to_string())
            .collect();
        let mut selector = MultiSelect::multi("Metrics", options, self.selected.clone());
        selector.open();
        self.selector = Some(selector);
    }
}

impl Default for TrendView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TrendView {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        // The metric picker has priority while open
        if let Some(selector) = &mut self.selector {
            let handled = selector.handle_action(action)?;
            if handled {
                if !selector.is_open() {
                    self.selector = None;
                } else if selector.values() != self.selected.as_slice() {
                    self.selected = selector.values().to_vec();
                    self.regenerate();
                }
                return Ok(true);
            }
            return Ok(false);
        }

        match action {
            Action::ToggleInterval => {
                self.interval = self.interval.toggled();
                self.regenerate();
                Ok(true)
            }
            Action::Refresh => {
                self.regenerate();
                Ok(true)
            }
            Action::SelectMetrics => {
                self.open_selector();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Trend Analysis [{}]", self.interval))
            .border_style(if self.focused {
                theme.focused_border_style()
            } else {
                theme.border_style()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if !self.selected.is_empty() && inner.width > 0 {
            let panels = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![
                    Constraint::Ratio(1, self.selected.len() as u32);
                    self.selected.len()
                ])
                .split(inner);
            for (i, metric) in self.selected.iter().enumerate() {
                let Some(series) = self.series.get(metric) else {
                    continue;
                };
                let overlay = self
                    .overlays
                    .get(metric)
                    .map(|o| o.as_slice())
                    .unwrap_or(&[]);
                let panel_block = Block::default()
                    .borders(Borders::ALL)
                    .title(metric.clone())
                    .border_style(theme.border_style());
                chart::render_metric_panel(
                    frame,
                    panels[i],
                    theme,
                    panel_block,
                    series,
                    overlay,
                    theme.bar_colors[i % theme.bar_colors.len()],
                );
            }
        }

        if let Some(selector) = &mut self.selector {
            let height = selector.dropdown_height().min(area.height);
            let width = area.width.min(30);
            let popup = Rect {
                x: area.x + (area.width.saturating_sub(width)) / 2,
                y: area.y + (area.height.saturating_sub(height)) / 2,
                width,
                height,
            };
            selector.render(frame, popup, theme);
        }
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        "TrendView"
    }
}

impl Focusable for TrendView {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
