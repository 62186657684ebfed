pub mod filters;
pub mod format;
pub mod heatmap;
pub mod metrics;
pub mod normalize;
pub mod pivot;
pub mod sort;

pub use filters::{DateRange, FilterDimension, FilterState};
pub use heatmap::PairFrequency;
pub use metrics::{
    AttachData, AttachProduct, BreakdownRow, Funnel, FunnelStep, MetricData, MetricFormat,
    ProductCombo, RatePoint, TrendPoint,
};
pub use pivot::{PivotSelection, PivotZone};
pub use sort::{SortDirection, SortField, TableSort, sort_rows};
