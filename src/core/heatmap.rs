//! Undirected product-pair frequency lookups for the attach heatmap.

/// How often two products are purchased together, as a percentage.
///
/// Pairs are undirected: an entry stored as (a, b) answers lookups for
/// (b, a) as well.
#[derive(Debug, Clone, PartialEq)]
pub struct PairFrequency {
    pub a: String,
    pub b: String,
    pub frequency: f64,
}

impl PairFrequency {
    pub fn new(a: &str, b: &str, frequency: f64) -> Self {
        Self {
            a: a.to_string(),
            b: b.to_string(),
            frequency,
        }
    }
}

/// Frequency of the (a, b) pair in either stored order; 0.0 when absent
pub fn frequency(entries: &[PairFrequency], a: &str, b: &str) -> f64 {
    entries
        .iter()
        .find(|e| (e.a == a && e.b == b) || (e.a == b && e.b == a))
        .map(|e| e.frequency)
        .unwrap_or(0.0)
}

/// Largest frequency across all pairs; 0.0 for an empty table
pub fn max_frequency(entries: &[PairFrequency]) -> f64 {
    entries.iter().map(|e| e.frequency).fold(0.0, f64::max)
}

/// Color intensity for the (a, b) cell: frequency over the table maximum.
///
/// Missing pairs and empty tables are 0.0, never an error. Diagonal cells
/// are the renderer's concern; this returns whatever the table holds.
pub fn intensity(entries: &[PairFrequency], a: &str, b: &str) -> f64 {
    let max = max_frequency(entries);
    if max == 0.0 {
        0.0
    } else {
        frequency(entries, a, b) / max
    }
}

/// Product names appearing in the table, first-seen order, no duplicates
pub fn product_names(entries: &[PairFrequency]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in entries.iter().map(|e| e.a.as_str()).chain(entries.iter().map(|e| e.b.as_str())) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<PairFrequency> {
        vec![
            PairFrequency::new("Creative Cloud", "Acrobat Pro", 42.3),
            PairFrequency::new("Photoshop", "Lightroom", 38.7),
            PairFrequency::new("Illustrator", "InDesign", 31.2),
        ]
    }

    #[test]
    fn test_lookup_is_order_insensitive() {
        let entries = table();
        assert_eq!(
            frequency(&entries, "Creative Cloud", "Acrobat Pro"),
            frequency(&entries, "Acrobat Pro", "Creative Cloud"),
        );
        assert_eq!(frequency(&entries, "Lightroom", "Photoshop"), 38.7);
    }

    #[test]
    fn test_missing_pair_is_zero_not_an_error() {
        let entries = table();
        assert_eq!(frequency(&entries, "Creative Cloud", "Lightroom"), 0.0);
        assert_eq!(intensity(&entries, "Creative Cloud", "Lightroom"), 0.0);
    }

    #[test]
    fn test_intensity_scenario() {
        let entries = table();
        // The max-frequency pair, looked up in reverse order
        assert_eq!(intensity(&entries, "Acrobat Pro", "Creative Cloud"), 1.0);
        assert!((intensity(&entries, "Photoshop", "Lightroom") - 38.7 / 42.3).abs() < 1e-9);
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(max_frequency(&[]), 0.0);
        assert_eq!(intensity(&[], "A", "B"), 0.0);
        assert!(product_names(&[]).is_empty());
    }

    #[test]
    fn test_product_names_first_seen_order() {
        let names = product_names(&table());
        assert_eq!(
            names,
            [
                "Creative Cloud",
                "Photoshop",
                "Illustrator",
                "Acrobat Pro",
                "Lightroom",
                "InDesign",
            ]
        );
    }
}
