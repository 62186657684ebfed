use std::collections::BTreeMap;

use strum::{Display, EnumIter};

/// One filterable dimension of the dashboard.
///
/// The variant order is the order the filter panel presents them in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter,
)]
pub enum FilterDimension {
    FiscalWeek,
    FiscalQuarter,
    Surface,
    SubSurface,
    Region,
    Country,
    ProductType,
    LoggedInStatus,
    EntitlementType,
    Segment,
    EntryPage,
    PurchaseType,
    Device,
    MarketingChannel,
}

impl FilterDimension {
    /// Human-readable label shown on the filter control
    pub fn label(&self) -> &'static str {
        match self {
            FilterDimension::FiscalWeek => "Fiscal Week",
            FilterDimension::FiscalQuarter => "Fiscal Quarter",
            FilterDimension::Surface => "Surface",
            FilterDimension::SubSurface => "Sub-Surface",
            FilterDimension::Region => "Geos",
            FilterDimension::Country => "Market Area",
            FilterDimension::ProductType => "Product",
            FilterDimension::LoggedInStatus => "Logged in Status",
            FilterDimension::EntitlementType => "Entitlement",
            FilterDimension::Segment => "Segment",
            FilterDimension::EntryPage => "Entry Page",
            FilterDimension::PurchaseType => "Purchase Type",
            FilterDimension::Device => "Device",
            FilterDimension::MarketingChannel => "LTC",
        }
    }

    /// The static option catalog for this dimension.
    ///
    /// Every selectable value comes from here; the control never offers
    /// anything outside the catalog.
    pub fn options(&self) -> Vec<String> {
        match self {
            FilterDimension::FiscalWeek => fiscal_week_options(),
            FilterDimension::FiscalQuarter => fiscal_quarter_options(),
            FilterDimension::Surface => to_owned(&["a.com", "AH", "CCD", "HelpX"]),
            FilterDimension::SubSurface => to_owned(&[
                "AH Home",
                "AH apps 2.0",
                "CCD Home",
                "CCD Apps 2.0",
                "a.com catalog",
                "a.com plans",
                "a.com product",
                "a.com cc overview",
            ]),
            FilterDimension::Region => to_owned(&[
                "North America",
                "Europe",
                "Asia Pacific",
                "Latin America",
                "Middle East & Africa",
            ]),
            FilterDimension::Country => to_owned(&[
                "United States",
                "Canada",
                "Germany",
                "France",
                "United Kingdom",
                "Japan",
                "Australia",
            ]),
            FilterDimension::ProductType => to_owned(&[
                "Creative Cloud",
                "Document Cloud",
                "Experience Cloud",
                "Commerce",
            ]),
            FilterDimension::LoggedInStatus => to_owned(&["Logged In", "Not Logged In"]),
            FilterDimension::EntitlementType => to_owned(&["Free", "Paid", "Lapsed", "Trial"]),
            FilterDimension::Segment => to_owned(&[
                "Individual (IND)",
                "B2B Admin",
                "Delegate",
                "Team",
                "Enterprise",
            ]),
            FilterDimension::EntryPage => {
                to_owned(&["3in1", "TwP", "Commitment", "Recommendation"])
            }
            FilterDimension::PurchaseType => to_owned(&["D2P", "TwP"]),
            FilterDimension::Device => to_owned(&["Desktop", "Mobile"]),
            FilterDimension::MarketingChannel => to_owned(&[
                "Search Paid",
                "Organic",
                "Social",
                "Email",
                "Display",
            ]),
        }
    }
}

fn to_owned(options: &[&str]) -> Vec<String> {
    options.iter().map(|o| o.to_string()).collect()
}

/// Week labels for the current quarter: W1-Q2 2025 .. W26-Q2 2025
fn fiscal_week_options() -> Vec<String> {
    (1..=26).map(|week| format!("W{week}-Q2 2025")).collect()
}

/// Quarter labels for the last four fiscal years: Q1 2022 .. Q4 2025
fn fiscal_quarter_options() -> Vec<String> {
    let mut options = Vec::new();
    for year in 2022..=2025 {
        for quarter in 1..=4 {
            options.push(format!("Q{quarter} {year}"));
        }
    }
    options
}

/// An inclusive date range, as opaque display strings.
///
/// Empty strings mean "unbounded"; the range is carried in the filter state
/// but has no editor yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// The full set of active filter selections.
///
/// Each dimension maps to the list of selected catalog values; an empty (or
/// absent) list means "no filter applied", never "match nothing". The state
/// is replaced wholesale on every change — none of the mutators here touch
/// `self`, they all return a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    selections: BTreeMap<FilterDimension, Vec<String>>,
    pub date_range: DateRange,
    pub compare_mode: bool,
}

impl Default for FilterState {
    /// The launch default: current week and current quarter preselected.
    fn default() -> Self {
        let mut selections = BTreeMap::new();
        selections.insert(FilterDimension::FiscalWeek, vec!["W26-Q2 2025".to_string()]);
        selections.insert(FilterDimension::FiscalQuarter, vec!["Q2 2025".to_string()]);
        Self {
            selections,
            date_range: DateRange::default(),
            compare_mode: false,
        }
    }
}

impl FilterState {
    /// A state with nothing selected at all.
    pub fn empty() -> Self {
        Self {
            selections: BTreeMap::new(),
            date_range: DateRange::default(),
            compare_mode: false,
        }
    }

    /// Selected values for a dimension (empty slice when unfiltered)
    pub fn values(&self, dimension: FilterDimension) -> &[String] {
        self.selections
            .get(&dimension)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// A new state with the given dimension's selection replaced
    pub fn with_values(&self, dimension: FilterDimension, values: Vec<String>) -> Self {
        let mut next = self.clone();
        if values.is_empty() {
            next.selections.remove(&dimension);
        } else {
            next.selections.insert(dimension, values);
        }
        next
    }

    /// A new state with the compare flag flipped
    pub fn with_compare_mode(&self, compare_mode: bool) -> Self {
        let mut next = self.clone();
        next.compare_mode = compare_mode;
        next
    }

    /// A new state with the date range replaced
    pub fn with_date_range(&self, date_range: DateRange) -> Self {
        let mut next = self.clone();
        next.date_range = date_range;
        next
    }

    /// Number of dimensions with at least one value selected
    pub fn active_dimensions(&self) -> usize {
        self.selections.values().filter(|v| !v.is_empty()).count()
    }

    /// Total number of selected values across all dimensions
    pub fn selected_values(&self) -> usize {
        self.selections.values().map(|v| v.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_dimension_has_options_and_label() {
        for dimension in FilterDimension::iter() {
            assert!(!dimension.options().is_empty());
            assert!(!dimension.label().is_empty());
        }
    }

    #[test]
    fn test_default_state_preselects_current_periods() {
        let state = FilterState::default();
        assert_eq!(state.values(FilterDimension::FiscalWeek), ["W26-Q2 2025"]);
        assert_eq!(state.values(FilterDimension::FiscalQuarter), ["Q2 2025"]);
        assert!(state.values(FilterDimension::Region).is_empty());
        assert!(!state.compare_mode);
        assert_eq!(state.active_dimensions(), 2);
    }

    #[test]
    fn test_default_selections_come_from_the_catalog() {
        let state = FilterState::default();
        for dimension in [FilterDimension::FiscalWeek, FilterDimension::FiscalQuarter] {
            let catalog = dimension.options();
            for value in state.values(dimension) {
                assert!(catalog.contains(value), "{value} not in {dimension} catalog");
            }
        }
    }

    #[test]
    fn test_with_values_replaces_wholesale() {
        let state = FilterState::default();
        let next = state.with_values(FilterDimension::Region, vec!["Europe".to_string()]);

        // The original is untouched
        assert!(state.values(FilterDimension::Region).is_empty());
        assert_eq!(next.values(FilterDimension::Region), ["Europe"]);

        // Clearing a dimension removes the filter entirely
        let cleared = next.with_values(FilterDimension::Region, Vec::new());
        assert!(cleared.values(FilterDimension::Region).is_empty());
        assert_eq!(cleared.active_dimensions(), 2);
    }

    #[test]
    fn test_compare_mode_round_trip() {
        let state = FilterState::default();
        let on = state.with_compare_mode(true);
        assert!(on.compare_mode);
        assert!(!state.compare_mode);
        assert_eq!(on.with_compare_mode(false), state);
    }

    #[test]
    fn test_fiscal_catalog_sizes() {
        assert_eq!(FilterDimension::FiscalWeek.options().len(), 26);
        assert_eq!(FilterDimension::FiscalQuarter.options().len(), 16);
    }
}
