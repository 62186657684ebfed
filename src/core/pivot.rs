//! Field selection state for the pivot builder.

/// Which pivot zone a field sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotZone {
    Rows,
    Values,
}

/// The two ordered field sets of the pivot builder.
///
/// Adds keep insertion order and ignore duplicates within a zone; removes
/// affect only the named zone. The same field may sit in both zones at
/// once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotSelection {
    rows: Vec<String>,
    values: Vec<String>,
}

impl PivotSelection {
    pub fn new(rows: &[&str], values: &[&str]) -> Self {
        Self {
            rows: rows.iter().map(|f| f.to_string()).collect(),
            values: values.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn zone(&self, zone: PivotZone) -> &[String] {
        match zone {
            PivotZone::Rows => &self.rows,
            PivotZone::Values => &self.values,
        }
    }

    /// Append `field` to a zone; a duplicate add is a no-op
    pub fn add(&mut self, zone: PivotZone, field: &str) {
        let list = match zone {
            PivotZone::Rows => &mut self.rows,
            PivotZone::Values => &mut self.values,
        };
        if !list.iter().any(|f| f == field) {
            list.push(field.to_string());
        }
    }

    /// Remove `field` from one zone only
    pub fn remove(&mut self, zone: PivotZone, field: &str) {
        let list = match zone {
            PivotZone::Rows => &mut self.rows,
            PivotZone::Values => &mut self.values,
        };
        list.retain(|f| f != field);
    }

    /// "Region, Country" / "None" — the informational results text
    pub fn describe(list: &[String]) -> String {
        if list.is_empty() {
            "None".to_string()
        } else {
            list.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut selection = PivotSelection::default();
        selection.add(PivotZone::Rows, "Region");
        selection.add(PivotZone::Rows, "Country");
        selection.add(PivotZone::Rows, "Segment");
        assert_eq!(selection.rows(), ["Region", "Country", "Segment"]);
    }

    #[test]
    fn test_duplicate_add_is_a_noop() {
        let mut selection = PivotSelection::new(&["Region"], &[]);
        selection.add(PivotZone::Rows, "Region");
        assert_eq!(selection.rows(), ["Region"]);
    }

    #[test]
    fn test_remove_affects_one_zone_only() {
        let mut selection = PivotSelection::new(&["Orders"], &["Orders", "CVR%"]);
        selection.remove(PivotZone::Values, "Orders");
        assert_eq!(selection.rows(), ["Orders"]);
        assert_eq!(selection.values(), ["CVR%"]);
    }

    #[test]
    fn test_zones_are_not_mutually_exclusive() {
        // The same label may sit in both zones at once
        let mut selection = PivotSelection::default();
        selection.add(PivotZone::Rows, "Orders");
        selection.add(PivotZone::Values, "Orders");
        assert_eq!(selection.rows(), ["Orders"]);
        assert_eq!(selection.values(), ["Orders"]);
    }

    #[test]
    fn test_describe() {
        let selection = PivotSelection::new(&["Region"], &[]);
        assert_eq!(PivotSelection::describe(selection.rows()), "Region");
        assert_eq!(PivotSelection::describe(selection.values()), "None");
    }
}
