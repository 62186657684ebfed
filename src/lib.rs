#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_match)]
#![allow(clippy::collapsible_else_if)]

pub mod config;
pub mod core;
pub mod data;
pub mod logging;
pub mod tui;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::core::{FilterDimension, FilterState, PivotSelection, SortDirection, SortField};
pub use crate::tui::{Action, ActionCategory, App};
