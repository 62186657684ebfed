use crate::core::heatmap::PairFrequency;

/// How a metric's display value should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum MetricFormat {
    Number,
    Percentage,
    Currency,
}

/// A headline metric: display value plus period-over-period deltas.
///
/// The deltas are percentages; positive means growth. Read-only, sourced
/// from the mock fixtures.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricData {
    pub title: String,
    pub value: String,
    pub yoy: f64,
    pub qoq: f64,
    pub wow: f64,
    pub format: MetricFormat,
}

/// One point of a generated trend series
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: String,
    pub period: String,
    pub value: f64,
}

/// One point of a rate-over-time series (funnel conversion, attach rate)
#[derive(Debug, Clone, PartialEq)]
pub struct RatePoint {
    pub period: String,
    pub rate: f64,
}

impl RatePoint {
    pub fn new(period: &str, rate: f64) -> Self {
        Self {
            period: period.to_string(),
            rate,
        }
    }
}

/// A row of the geographic/segment breakdown tables.
///
/// `trend` is the 8-point sparkline series; it is non-empty whenever the
/// row is rendered (the sparkline divides by its max).
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub name: String,
    pub orders: u64,
    pub cvr: f64,
    pub gnarr: f64,
    pub trend: Vec<f64>,
}

/// One step of a conversion funnel.
///
/// `percentage` is relative to the first step; `drop_off` is the loss
/// relative to the previous step and is absent on the first step.
#[derive(Debug, Clone, PartialEq)]
pub struct FunnelStep {
    pub name: String,
    pub value: u64,
    pub percentage: f64,
    pub drop_off: Option<f64>,
}

/// A named funnel: ordered steps plus a conversion-rate trend.
///
/// Step values are monotonically non-increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Funnel {
    pub name: String,
    pub steps: Vec<FunnelStep>,
    pub trend: Vec<RatePoint>,
}

impl Funnel {
    /// Build a funnel from raw step counts.
    ///
    /// Percentages are value-over-first-step rounded to one decimal;
    /// drop-offs are the percentage lost versus the previous step.
    pub fn from_counts(name: &str, counts: &[(&str, u64)], trend: Vec<RatePoint>) -> Self {
        let first = counts.first().map(|(_, v)| *v).unwrap_or(0);
        let mut steps = Vec::with_capacity(counts.len());
        let mut prev_pct: Option<f64> = None;
        for (step_name, value) in counts {
            let percentage = if first == 0 {
                0.0
            } else {
                round1(*value as f64 / first as f64 * 100.0)
            };
            let drop_off = prev_pct.map(|prev| round1(prev - percentage));
            steps.push(FunnelStep {
                name: step_name.to_string(),
                value: *value,
                percentage,
                drop_off,
            });
            prev_pct = Some(percentage);
        }
        Self {
            name: name.to_string(),
            steps,
            trend,
        }
    }

    pub fn total_entries(&self) -> u64 {
        self.steps.first().map(|s| s.value).unwrap_or(0)
    }

    pub fn final_conversions(&self) -> u64 {
        self.steps.last().map(|s| s.value).unwrap_or(0)
    }

    /// Overall conversion rate: last step as a percentage of the first
    pub fn overall_rate(&self) -> f64 {
        self.steps.last().map(|s| s.percentage).unwrap_or(0.0)
    }

    /// Largest single-step loss across the funnel
    pub fn biggest_drop_off(&self) -> f64 {
        self.steps
            .iter()
            .filter_map(|s| s.drop_off)
            .fold(0.0, f64::max)
    }

    /// Step values never increase from one step to the next
    pub fn is_monotonic(&self) -> bool {
        self.steps.windows(2).all(|pair| pair[0].value >= pair[1].value)
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// A ranked add-on product
#[derive(Debug, Clone, PartialEq)]
pub struct AttachProduct {
    pub name: String,
    pub rate: f64,
    pub revenue: f64,
}

/// A frequently co-purchased product combination
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCombo {
    pub products: Vec<String>,
    pub frequency: f64,
}

/// Everything the attach view renders
#[derive(Debug, Clone, PartialEq)]
pub struct AttachData {
    pub attach_rate: f64,
    pub top_products: Vec<AttachProduct>,
    pub common_combos: Vec<ProductCombo>,
    pub heatmap: Vec<PairFrequency>,
    pub trend: Vec<RatePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funnel_from_counts_scenario() {
        let funnel = Funnel::from_counts(
            "3in1",
            &[("Email", 1_000_000), ("Payment", 450_000), ("Order Conf", 315_000)],
            Vec::new(),
        );

        assert_eq!(funnel.steps[0].percentage, 100.0);
        assert_eq!(funnel.steps[0].drop_off, None);
        assert_eq!(funnel.steps[1].percentage, 45.0);
        assert_eq!(funnel.steps[1].drop_off, Some(55.0));
        assert_eq!(funnel.steps[2].percentage, 31.5);
        assert_eq!(funnel.steps[2].drop_off, Some(13.5));
    }

    #[test]
    fn test_funnel_summary_helpers() {
        let funnel = Funnel::from_counts(
            "TwP",
            &[("Email", 850_000), ("Payment", 382_500), ("Order Conf", 263_750)],
            Vec::new(),
        );

        assert_eq!(funnel.total_entries(), 850_000);
        assert_eq!(funnel.final_conversions(), 263_750);
        assert_eq!(funnel.overall_rate(), 31.0);
        assert_eq!(funnel.biggest_drop_off(), 55.0);
        assert!(funnel.is_monotonic());
    }

    #[test]
    fn test_empty_funnel_is_harmless() {
        let funnel = Funnel::from_counts("empty", &[], Vec::new());
        assert_eq!(funnel.total_entries(), 0);
        assert_eq!(funnel.final_conversions(), 0);
        assert_eq!(funnel.overall_rate(), 0.0);
        assert_eq!(funnel.biggest_drop_off(), 0.0);
        assert!(funnel.is_monotonic());
    }
}
