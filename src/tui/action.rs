use serde::{Deserialize, Serialize};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    NextPane,
    PrevPane,

    // Tabs
    NextTab,
    PrevTab,
    ShowOverview,
    ShowFunnel,
    ShowAttaches,
    ShowPivot,

    // Data Operations
    Sort,
    ToggleInterval,
    SelectMetrics,
    Refresh,
    Export,

    // Pivot Builder
    AddToRows,
    AddToValues,
    RemoveField,

    // Filters
    ToggleFilters,
    ToggleCompare,

    // View
    ToggleHelp,

    // Application
    Quit,
    Confirm,
    Cancel,
}

impl Action {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move cursor up",
            Action::MoveDown => "Move cursor down",
            Action::MoveLeft => "Move cursor left",
            Action::MoveRight => "Move cursor right",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::GoToTop => "Go to first entry",
            Action::GoToBottom => "Go to last entry",
            Action::NextPane => "Focus next pane",
            Action::PrevPane => "Focus previous pane",
            Action::NextTab => "Next tab",
            Action::PrevTab => "Previous tab",
            Action::ShowOverview => "Show overview",
            Action::ShowFunnel => "Show funnel analysis",
            Action::ShowAttaches => "Show attach analysis",
            Action::ShowPivot => "Show pivot builder",
            Action::Sort => "Sort by highlighted column",
            Action::ToggleInterval => "Toggle WoW/QoQ interval",
            Action::SelectMetrics => "Choose plotted metrics",
            Action::Refresh => "Regenerate trend series",
            Action::Export => "Copy as CSV to clipboard",
            Action::AddToRows => "Add field to pivot rows",
            Action::AddToValues => "Add field to pivot values",
            Action::RemoveField => "Remove highlighted field",
            Action::ToggleFilters => "Toggle filter panel",
            Action::ToggleCompare => "Toggle compare mode",
            Action::ToggleHelp => "Toggle help screen",
            Action::Quit => "Quit application",
            Action::Confirm => "Confirm action",
            Action::Cancel => "Cancel action",
        }
    }

    /// Get category for grouping in help screen
    pub fn category(&self) -> ActionCategory {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::MoveLeft
            | Action::MoveRight
            | Action::PageUp
            | Action::PageDown
            | Action::GoToTop
            | Action::GoToBottom
            | Action::NextPane
            | Action::PrevPane => ActionCategory::Navigation,

            Action::NextTab
            | Action::PrevTab
            | Action::ShowOverview
            | Action::ShowFunnel
            | Action::ShowAttaches
            | Action::ShowPivot => ActionCategory::Tabs,

            Action::Sort
            | Action::ToggleInterval
            | Action::SelectMetrics
            | Action::Refresh
            | Action::Export => ActionCategory::DataOps,

            Action::AddToRows | Action::AddToValues | Action::RemoveField => ActionCategory::Pivot,

            Action::ToggleFilters | Action::ToggleCompare => ActionCategory::Filters,

            Action::ToggleHelp => ActionCategory::View,

            Action::Quit | Action::Confirm | Action::Cancel => ActionCategory::Application,
        }
    }

    /// Get all possible actions (for validation)
    pub fn all() -> Vec<Action> {
        vec![
            Action::MoveUp,
            Action::MoveDown,
            Action::MoveLeft,
            Action::MoveRight,
            Action::PageUp,
            Action::PageDown,
            Action::GoToTop,
            Action::GoToBottom,
            Action::NextPane,
            Action::PrevPane,
            Action::NextTab,
            Action::PrevTab,
            Action::ShowOverview,
            Action::ShowFunnel,
            Action::ShowAttaches,
            Action::ShowPivot,
            Action::Sort,
            Action::ToggleInterval,
            Action::SelectMetrics,
            Action::Refresh,
            Action::Export,
            Action::AddToRows,
            Action::AddToValues,
            Action::RemoveField,
            Action::ToggleFilters,
            Action::ToggleCompare,
            Action::ToggleHelp,
            Action::Quit,
            Action::Confirm,
            Action::Cancel,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Tabs,
    DataOps,
    Pivot,
    Filters,
    View,
    Application,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionCategory::Navigation => write!(f, "Navigation"),
            ActionCategory::Tabs => write!(f, "Tabs"),
            ActionCategory::DataOps => write!(f, "Data Operations"),
            ActionCategory::Pivot => write!(f, "Pivot Builder"),
            ActionCategory::Filters => write!(f, "Filters"),
            ActionCategory::View => write!(f, "View"),
            ActionCategory::Application => write!(f, "Application"),
        }
    }
}
