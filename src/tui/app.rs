use color_eyre::Result;
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
};
use strum::IntoEnumIterator;
use tracing::debug;

use crate::config::Config;
use crate::core::filters::FilterState;
use crate::tui::components::{AttachView, FilterPanel, FunnelView, OverviewView, PivotView};
use crate::tui::{Action, ActionCategory, Component, Focusable, KeyBindings, Theme};
use crate::data::fixtures;

/// Top-level views of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum Tab {
    Overview,
    Funnel,
    Attaches,
    Pivot,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Funnel => "Funnel",
            Tab::Attaches => "Attaches",
            Tab::Pivot => "Advanced Drilldown",
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Overview => Tab::Funnel,
            Tab::Funnel => Tab::Attaches,
            Tab::Attaches => Tab::Pivot,
            Tab::Pivot => Tab::Overview,
        }
    }

    pub fn prev(&self) -> Tab {
        match self {
            Tab::Overview => Tab::Pivot,
            Tab::Funnel => Tab::Overview,
            Tab::Attaches => Tab::Funnel,
            Tab::Pivot => Tab::Attaches,
        }
    }

    /// Resolve a config/CLI name; unknown names land on the overview
    pub fn from_name(name: &str) -> Tab {
        match name.to_ascii_lowercase().as_str() {
            "funnel" => Tab::Funnel,
            "attaches" => Tab::Attaches,
            "pivot" | "drilldown" => Tab::Pivot,
            _ => Tab::Overview,
        }
    }
}

/// Application state
///
/// Owns the filter state and the active tab, translates key events into
/// actions, and routes actions: app-level first, then the open overlay,
/// then the active view.
pub struct App {
    filters: FilterState,
    active_tab: Tab,

    overview: OverviewView,
    funnel: FunnelView,
    attaches: AttachView,
    pivot: PivotView,

    /// Filter overlay (when open)
    filter_panel: Option<FilterPanel>,

    /// Keybindings configuration
    keybindings: KeyBindings,

    /// Current theme
    theme: Theme,

    /// Whether the help overlay is visible
    show_help: bool,

    /// Whether the app should quit
    should_quit: bool,
}

impl App {
    /// Create a new App instance from resolved configuration
    pub fn new(config: &Config) -> Self {
        let mut app = Self {
            filters: FilterState::default(),
            active_tab: Tab::from_name(&config.settings.start_tab),
            overview: OverviewView::new(),
            funnel: FunnelView::new(fixtures::funnels()),
            attaches: AttachView::new(fixtures::attach_data()),
            pivot: PivotView::new(),
            filter_panel: None,
            keybindings: config.keybindings(),
            theme: Theme::by_name(&config.settings.theme),
            show_help: false,
            should_quit: false,
        };
        app.apply_tab_focus();
        app
    }

    fn apply_tab_focus(&mut self) {
        let tab = self.active_tab;
        self.overview.set_focused(tab == Tab::Overview);
        self.funnel.set_focused(tab == Tab::Funnel);
        self.attaches.set_focused(tab == Tab::Attaches);
        self.pivot.set_focused(tab == Tab::Pivot);
    }

    fn active_view_mut(&mut self) -> &mut dyn Component {
        match self.active_tab {
            Tab::Overview => &mut self.overview,
            Tab::Funnel => &mut self.funnel,
            Tab::Attaches => &mut self.attaches,
            Tab::Pivot => &mut self.pivot,
        }
    }

    /// Handle a key event
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Only handle key press events, ignore release/repeat
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Translate key to action
        if let Some(action) = self.keybindings.get_action(&key) {
            self.handle_action(action)?;
        }

        Ok(())
    }

    /// Handle an action
    fn handle_action(&mut self, action: Action) -> Result<()> {
        if action == Action::Quit {
            self.should_quit = true;
            return Ok(());
        }

        // The help overlay swallows everything except its own dismissal
        if self.show_help {
            if matches!(action, Action::Cancel | Action::ToggleHelp) {
                self.show_help = false;
            }
            return Ok(());
        }

        // The filter overlay has priority while open
        if let Some(panel) = &mut self.filter_panel {
            if action == Action::ToggleFilters {
                self.filters = panel.filters().clone();
                self.filter_panel = None;
                return Ok(());
            }
            let keep_open = panel.handle_action(action)?;
            // Read the wholesale-replaced state back after every change
            self.filters = panel.filters().clone();
            if !keep_open {
                self.filter_panel = None;
            }
            return Ok(());
        }

        match action {
            Action::ToggleHelp => {
                self.show_help = true;
            }
            Action::ToggleFilters => {
                self.filter_panel = Some(FilterPanel::new(self.filters.clone()));
            }
            Action::ToggleCompare => {
                self.filters = self.filters.with_compare_mode(!self.filters.compare_mode);
            }
            Action::NextTab => self.set_active_tab(self.active_tab.next()),
            Action::PrevTab => self.set_active_tab(self.active_tab.prev()),
            Action::ShowOverview => self.set_active_tab(Tab::Overview),
            Action::ShowFunnel => self.set_active_tab(Tab::Funnel),
            Action::ShowAttaches => self.set_active_tab(Tab::Attaches),
            Action::ShowPivot => self.set_active_tab(Tab::Pivot),
            other => {
                let handled = self.active_view_mut().handle_action(other)?;
                if !handled {
                    debug!("Unhandled action on {:?}: {other:?}", self.active_tab);
                }
            }
        }

        Ok(())
    }

    /// Check if the app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Update app state (called on every tick)
    pub fn update(&mut self) -> Result<()> {
        self.active_view_mut().update()
    }

    /// Render the app
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let theme = self.theme.clone();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(frame, rows[0], &theme);

        match self.active_tab {
            Tab::Overview => self.overview.render(frame, rows[1], &theme),
            Tab::Funnel => self.funnel.render(frame, rows[1], &theme),
            Tab::Attaches => self.attaches.render(frame, rows[1], &theme),
            Tab::Pivot => self.pivot.render(frame, rows[1], &theme),
        }

        self.render_footer(frame, rows[2], &theme);

        if let Some(panel) = &mut self.filter_panel {
            let overlay = Self::centered_rect(84, 70, area);
            panel.render(frame, overlay, &theme);
        }

        if self.show_help {
            self.render_help(frame, Self::centered_rect(60, 80, area), &theme);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("PulseBoard — Analytics Dashboard")
            .border_style(theme.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(40)])
            .split(inner);

        let titles: Vec<Line> = Tab::iter().map(|t| Line::from(t.title())).collect();
        let selected = Tab::iter().position(|t| t == self.active_tab).unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .style(theme.muted_style())
            .highlight_style(theme.selected_style());
        frame.render_widget(tabs, columns[0]);

        let mut status = vec![Span::styled(
            format!(
                "Filters: {} ({} values)",
                self.filters.active_dimensions(),
                self.filters.selected_values()
            ),
            theme.muted_style(),
        )];
        if self.filters.compare_mode {
            status.push(Span::raw("  "));
            status.push(Span::styled("COMPARE", theme.warning_style()));
        }
        frame.render_widget(
            Paragraph::new(Line::from(status)).alignment(Alignment::Right),
            columns[1],
        );
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let hints = [
            (Action::Quit, "Quit"),
            (Action::ToggleFilters, "Filters"),
            (Action::ToggleCompare, "Compare"),
            (Action::NextTab, "Next tab"),
            (Action::ToggleHelp, "Help"),
        ];
        let text = hints
            .iter()
            .filter_map(|(action, label)| {
                self.keybindings
                    .get_keys_for_action(*action)
                    .first()
                    .map(|key| format!("{key}: {label}"))
            })
            .collect::<Vec<_>>()
            .join("  ");
        frame.render_widget(Paragraph::new(text).style(theme.muted_style()), area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Help (Esc to close)")
            .border_style(theme.focused_border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let categories = [
            ActionCategory::Navigation,
            ActionCategory::Tabs,
            ActionCategory::DataOps,
            ActionCategory::Pivot,
            ActionCategory::Filters,
            ActionCategory::View,
            ActionCategory::Application,
        ];
        let mut lines: Vec<Line> = Vec::new();
        for category in categories {
            lines.push(Line::from(Span::styled(
                category.to_string(),
                theme.header_style(),
            )));
            for action in Action::all() {
                if action.category() != category {
                    continue;
                }
                let keys = self.keybindings.get_keys_for_action(action).join(", ");
                lines.push(Line::from(vec![
                    Span::styled(format!("  {keys:<16}"), theme.info_style()),
                    Span::raw(action.description()),
                ]));
            }
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Helper to create centered rectangle
    fn centered_rect(percent_w: u16, percent_h: u16, area: Rect) -> Rect {
        let width = (area.width * percent_w) / 100;
        let height = (area.height * percent_h) / 100;
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the active tab
    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Switch to a tab, moving focus with it
    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.apply_tab_focus();
    }

    /// Get the current filter state
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Whether the filter overlay is open
    pub fn filter_panel_open(&self) -> bool {
        self.filter_panel.is_some()
    }

    /// Whether the help overlay is open
    pub fn help_open(&self) -> bool {
        self.show_help
    }

    /// Get reference to theme
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Set theme
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Get keybindings
    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    /// Set keybindings
    pub fn set_keybindings(&mut self, keybindings: KeyBindings) {
        self.keybindings = keybindings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filters::FilterDimension;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn create_test_app() -> App {
        App::new(&Config::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    #[test]
    fn test_app_creation() {
        let app = create_test_app();
        assert!(!app.should_quit());
        assert_eq!(app.active_tab(), Tab::Overview);
        assert!(!app.filter_panel_open());
    }

    #[test]
    fn test_quit_action() {
        let mut app = create_test_app();
        assert!(!app.should_quit());

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_tab_switching() {
        let mut app = create_test_app();

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_tab(), Tab::Funnel);

        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.active_tab(), Tab::Attaches);

        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.active_tab(), Tab::Funnel);

        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.active_tab(), Tab::Pivot);
    }

    #[test]
    fn test_compare_mode_replaces_filter_state() {
        let mut app = create_test_app();
        assert!(!app.filters().compare_mode);

        press(&mut app, KeyCode::Char('c'));
        assert!(app.filters().compare_mode);

        press(&mut app, KeyCode::Char('c'));
        assert!(!app.filters().compare_mode);
    }

    #[test]
    fn test_filter_panel_commits_wholesale() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('f'));
        assert!(app.filter_panel_open());

        // Open the first dimension's dropdown and toggle its first option
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.filters().values(FilterDimension::FiscalWeek),
            ["W26-Q2 2025", "W1-Q2 2025"]
        );

        // Close dropdown, then panel; the selection survives
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Esc);
        assert!(!app.filter_panel_open());
        assert_eq!(
            app.filters().values(FilterDimension::FiscalWeek),
            ["W26-Q2 2025", "W1-Q2 2025"]
        );
    }

    #[test]
    fn test_filter_toggle_key_closes_panel() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('f'));
        assert!(app.filter_panel_open());
        press(&mut app, KeyCode::Char('f'));
        assert!(!app.filter_panel_open());
    }

    #[test]
    fn test_help_overlay_swallows_input() {
        let mut app = create_test_app();
        // Terminals report '?' with SHIFT held
        app.handle_key_event(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT))
            .unwrap();
        assert!(app.help_open());

        // Tab keys are ignored while help is open
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_tab(), Tab::Overview);

        press(&mut app, KeyCode::Esc);
        assert!(!app.help_open());
    }

    #[test]
    fn test_navigation_routes_to_active_view() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('3'));
        // Arrow keys move the heatmap cursor without error
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = create_test_app();
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        app.handle_key_event(release).unwrap();
        assert!(!app.should_quit());
    }

    #[test]
    fn test_tab_name_resolution() {
        assert_eq!(Tab::from_name("funnel"), Tab::Funnel);
        assert_eq!(Tab::from_name("Attaches"), Tab::Attaches);
        assert_eq!(Tab::from_name("drilldown"), Tab::Pivot);
        assert_eq!(Tab::from_name("unknown"), Tab::Overview);
    }
}
