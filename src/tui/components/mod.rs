pub mod attach_view;
pub mod breakdown_table;
pub mod filter_panel;
pub mod funnel_view;
pub mod metric_cards;
pub mod multi_select;
pub mod overview;
pub mod pivot_view;
pub mod trend_view;

pub use attach_view::AttachView;
pub use breakdown_table::BreakdownTable;
pub use filter_panel::FilterPanel;
pub use funnel_view::FunnelView;
pub use metric_cards::MetricCards;
pub use multi_select::{MultiSelect, SelectionMode, toggle};
pub use overview::OverviewView;
pub use pivot_view::PivotView;
pub use trend_view::TrendView;
