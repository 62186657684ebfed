use crate::core::metrics::BreakdownRow;

/// Sortable columns of a breakdown table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Orders,
    Cvr,
    Gnarr,
}

impl SortField {
    /// Column order as rendered, left to right
    pub fn all() -> [SortField; 4] {
        [SortField::Name, SortField::Orders, SortField::Cvr, SortField::Gnarr]
    }

    pub fn title(&self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Orders => "Orders",
            SortField::Cvr => "CVR%",
            SortField::Gnarr => "GNARR ($M)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(&self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Active sort of a breakdown table.
///
/// Activating the current field flips the direction; activating any other
/// field selects it and resets to descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for TableSort {
    fn default() -> Self {
        Self {
            field: SortField::Orders,
            direction: SortDirection::Descending,
        }
    }
}

impl TableSort {
    pub fn activate(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Descending;
        }
    }
}

/// Produce a sorted projection of `rows` without mutating the input.
///
/// Numeric fields compare numerically, the name field lexicographically.
/// `slice::sort_by` is stable, so rows with equal keys keep their input
/// order.
pub fn sort_rows(rows: &[BreakdownRow], sort: TableSort) -> Vec<BreakdownRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match sort.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Orders => a.orders.cmp(&b.orders),
            SortField::Cvr => a.cvr.total_cmp(&b.cvr),
            SortField::Gnarr => a.gnarr.total_cmp(&b.gnarr),
        };
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}
