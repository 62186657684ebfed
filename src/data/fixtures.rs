//! Static mock datasets backing every view.
//!
//! Values are fixed; nothing here consults the active filters (the filter
//! panel is a pass-through until a real data backend exists).

use crate::core::heatmap::PairFrequency;
use crate::core::metrics::{
    AttachData, AttachProduct, BreakdownRow, Funnel, MetricData, MetricFormat, ProductCombo,
    RatePoint,
};

/// Metric names offered by the trend section and the pivot builder
pub const AVAILABLE_METRICS: [&str; 6] = ["Orders", "CVR%", "GNARR", "ARPU", "Users", "Retention"];

/// Metrics plotted by default on the overview tab
pub const DEFAULT_TREND_METRICS: [&str; 3] = ["Orders", "CVR%", "GNARR"];

/// Dimension fields offered by the pivot builder
pub const PIVOT_DIMENSIONS: [&str; 5] = ["Region", "Country", "Product Type", "Segment", "Channel"];

/// Metric fields offered by the pivot builder
pub const PIVOT_METRICS: [&str; 5] = ["Orders", "CVR%", "GNARR", "ARPU", "Users"];

/// The six headline metric cards
pub fn metrics() -> Vec<MetricData> {
    fn card(title: &str, value: &str, yoy: f64, qoq: f64, wow: f64, format: MetricFormat) -> MetricData {
        MetricData {
            title: title.to_string(),
            value: value.to_string(),
            yoy,
            qoq,
            wow,
            format,
        }
    }

    vec![
        card("Total Visits", "5,000,000", 12.4, 3.2, -1.8, MetricFormat::Number),
        card("Total Entries", "3,000,000", 8.7, 1.4, 0.3, MetricFormat::Number),
        card("Web Orders", "30,000", 15.6, 4.8, 2.1, MetricFormat::Number),
        card("Net Orders", "25,000", 2.8, -0.6, 1.2, MetricFormat::Number),
        card("Conversion Rate (Web)", "10%", 18.3, 6.2, 1.9, MetricFormat::Percentage),
        card("GNARR (Net)", "$400M", 4.2, 1.1, -0.4, MetricFormat::Currency),
    ]
}

/// Geographic breakdown rows with their 8-week sparkline series
pub fn breakdown_rows() -> Vec<BreakdownRow> {
    vec![
        BreakdownRow {
            name: "North America".to_string(),
            orders: 1_247_832,
            cvr: 4.2,
            gnarr: 387.2,
            trend: vec![95.0, 108.0, 112.0, 106.0, 118.0, 125.0, 122.0, 134.0],
        },
        BreakdownRow {
            name: "Europe".to_string(),
            orders: 987_456,
            cvr: 3.8,
            gnarr: 298.7,
            trend: vec![88.0, 92.0, 98.0, 102.0, 97.0, 105.0, 110.0, 108.0],
        },
        BreakdownRow {
            name: "Asia Pacific".to_string(),
            orders: 612_005,
            cvr: 2.9,
            gnarr: 161.3,
            trend: vec![76.0, 82.0, 79.0, 85.0, 91.0, 88.0, 94.0, 97.0],
        },
    ]
}

/// Segment breakdown: the geographic rows relabelled by customer segment
pub fn segment_rows() -> Vec<BreakdownRow> {
    breakdown_rows()
        .into_iter()
        .map(|mut row| {
            row.name = match row.name.as_str() {
                "North America" => "Individual".to_string(),
                "Europe" => "B2B Admin".to_string(),
                "Asia Pacific" => "Enterprise".to_string(),
                other => other.to_string(),
            };
            row
        })
        .collect()
}

/// The four entry-page funnels, in picker order
pub fn funnels() -> Vec<Funnel> {
    vec![
        Funnel::from_counts(
            "3in1",
            &[("Email", 1_000_000), ("Payment", 450_000), ("Order Conf", 315_000)],
            vec![
                RatePoint::new("W20-Q2 2025", 29.8),
                RatePoint::new("W21-Q2 2025", 30.2),
                RatePoint::new("W22-Q2 2025", 31.1),
                RatePoint::new("W23-Q2 2025", 30.8),
                RatePoint::new("W24-Q2 2025", 31.5),
                RatePoint::new("W25-Q2 2025", 32.1),
                RatePoint::new("W26-Q2 2025", 31.8),
            ],
        ),
        Funnel::from_counts(
            "TwP",
            &[("Email", 850_000), ("Payment", 382_500), ("Order Conf", 263_750)],
            vec![
                RatePoint::new("W20-Q2 2025", 29.2),
                RatePoint::new("W21-Q2 2025", 29.8),
                RatePoint::new("W22-Q2 2025", 30.4),
                RatePoint::new("W23-Q2 2025", 30.1),
                RatePoint::new("W24-Q2 2025", 31.0),
                RatePoint::new("W25-Q2 2025", 30.7),
                RatePoint::new("W26-Q2 2025", 31.2),
            ],
        ),
        Funnel::from_counts(
            "Commitment",
            &[("Email", 650_000), ("Payment", 292_500), ("Order Conf", 201_500)],
            vec![
                RatePoint::new("W20-Q2 2025", 28.9),
                RatePoint::new("W21-Q2 2025", 29.5),
                RatePoint::new("W22-Q2 2025", 30.2),
                RatePoint::new("W23-Q2 2025", 29.8),
                RatePoint::new("W24-Q2 2025", 30.6),
                RatePoint::new("W25-Q2 2025", 31.0),
                RatePoint::new("W26-Q2 2025", 30.4),
            ],
        ),
        Funnel::from_counts(
            "Recommendation",
            &[("Email", 750_000), ("Payment", 337_500), ("Order Conf", 232_500)],
            vec![
                RatePoint::new("W20-Q2 2025", 29.5),
                RatePoint::new("W21-Q2 2025", 30.1),
                RatePoint::new("W22-Q2 2025", 30.8),
                RatePoint::new("W23-Q2 2025", 30.4),
                RatePoint::new("W24-Q2 2025", 31.0),
                RatePoint::new("W25-Q2 2025", 31.6),
                RatePoint::new("W26-Q2 2025", 31.2),
            ],
        ),
    ]
}

/// Product-attach aggregates, pair frequencies and trend
pub fn attach_data() -> AttachData {
    AttachData {
        attach_rate: 68.4,
        top_products: vec![
            AttachProduct {
                name: "Acrobat Pro".to_string(),
                rate: 34.2,
                revenue: 147.8,
            },
            AttachProduct {
                name: "Creative Cloud All Apps".to_string(),
                rate: 28.7,
                revenue: 298.4,
            },
            AttachProduct {
                name: "Photoshop".to_string(),
                rate: 23.1,
                revenue: 89.2,
            },
            AttachProduct {
                name: "Illustrator".to_string(),
                rate: 19.8,
                revenue: 76.5,
            },
            AttachProduct {
                name: "InDesign".to_string(),
                rate: 15.4,
                revenue: 52.1,
            },
        ],
        common_combos: vec![
            ProductCombo {
                products: vec!["Creative Cloud".to_string(), "Acrobat Pro".to_string()],
                frequency: 42.3,
            },
            ProductCombo {
                products: vec!["Photoshop".to_string(), "Lightroom".to_string()],
                frequency: 38.7,
            },
            ProductCombo {
                products: vec!["Illustrator".to_string(), "InDesign".to_string()],
                frequency: 31.2,
            },
        ],
        heatmap: vec![
            PairFrequency::new("Creative Cloud", "Acrobat Pro", 42.3),
            PairFrequency::new("Creative Cloud", "Stock", 28.7),
            PairFrequency::new("Photoshop", "Lightroom", 38.7),
            PairFrequency::new("Illustrator", "InDesign", 31.2),
            PairFrequency::new("Premiere Pro", "After Effects", 25.8),
            PairFrequency::new("Acrobat Pro", "Sign", 22.4),
        ],
        trend: vec![
            RatePoint::new("W20-Q2 2025", 66.2),
            RatePoint::new("W21-Q2 2025", 67.1),
            RatePoint::new("W22-Q2 2025", 67.8),
            RatePoint::new("W23-Q2 2025", 68.4),
            RatePoint::new("W24-Q2 2025", 69.1),
            RatePoint::new("W25-Q2 2025", 68.7),
            RatePoint::new("W26-Q2 2025", 69.3),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::heatmap;

    #[test]
    fn test_metric_cards_are_complete() {
        let cards = metrics();
        assert_eq!(cards.len(), 6);
        for card in cards {
            assert!(!card.title.is_empty());
            assert!(!card.value.is_empty());
        }
    }

    #[test]
    fn test_breakdown_trends_are_non_empty() {
        for row in breakdown_rows() {
            assert_eq!(row.trend.len(), 8);
            assert!(row.trend.iter().all(|v| *v > 0.0));
        }
    }

    #[test]
    fn test_segment_rows_share_figures_with_geo_rows() {
        let geo = breakdown_rows();
        let segments = segment_rows();
        assert_eq!(segments.len(), geo.len());
        for (segment, region) in segments.iter().zip(&geo) {
            assert_ne!(segment.name, region.name);
            assert_eq!(segment.orders, region.orders);
            assert_eq!(segment.trend, region.trend);
        }
    }

    #[test]
    fn test_funnels_are_monotonic_with_drop_offs() {
        let funnels = funnels();
        assert_eq!(funnels.len(), 4);
        for funnel in funnels {
            assert!(funnel.is_monotonic(), "{} regressed", funnel.name);
            assert_eq!(funnel.steps.len(), 3);
            assert_eq!(funnel.steps[0].drop_off, None);
            assert!(funnel.steps[1].drop_off.is_some());
            assert_eq!(funnel.trend.len(), 7);
        }
    }

    #[test]
    fn test_first_funnel_drop_off_figures() {
        let funnel = &funnels()[0];
        assert_eq!(funnel.steps[1].drop_off, Some(55.0));
        assert_eq!(funnel.steps[2].drop_off, Some(13.5));
        assert_eq!(funnel.overall_rate(), 31.5);
    }

    #[test]
    fn test_attach_heatmap_is_consistent() {
        let data = attach_data();
        assert_eq!(heatmap::max_frequency(&data.heatmap), 42.3);
        // Every combo is also present in the pair table
        for combo in &data.common_combos {
            let freq = heatmap::frequency(&data.heatmap, &combo.products[0], &combo.products[1]);
            assert_eq!(freq, combo.frequency);
        }
    }
}
