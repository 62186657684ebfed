//! Scale helpers for the hand-drawn charts.
//!
//! Series are mapped into a drawing band the way the dashboard's line
//! charts expect: the minimum value sits on the bottom edge, the maximum
//! sits at the top of the data band, and a fixed headroom above the band is
//! left for labels.

/// Fraction of the vertical band carrying the data range; the remainder is
/// headroom above the maximum.
pub const BAND_FILL: f64 = 0.8;

/// Evenly spaced horizontal positions across `width`.
///
/// The first point lands on the left edge and the last on the right edge.
/// A single point centers horizontally; an empty series yields no
/// positions.
pub fn x_positions(count: usize, width: f64) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![width / 2.0],
        _ => (0..count)
            .map(|i| i as f64 / (count - 1) as f64 * width)
            .collect(),
    }
}

/// Vertical position of one value within `height`, measured from the top.
///
/// A degenerate range (max <= min) maps to the middle of the band.
pub fn y_position(value: f64, min: f64, max: f64, height: f64) -> f64 {
    if max > min {
        height - (value - min) / (max - min) * height * BAND_FILL
    } else {
        height / 2.0
    }
}

/// Vertical positions for a whole series, measured from the top.
///
/// Flat series (max == min) map every point to the band middle; single
/// points behave the same. Empty series yield no positions.
pub fn y_positions(values: &[f64], height: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    values
        .iter()
        .map(|v| y_position(*v, min, max, height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_positions_span_the_width() {
        let xs = x_positions(7, 100.0);
        assert_eq!(xs.len(), 7);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[6], 100.0);
        // Evenly spaced
        for pair in xs.windows(2) {
            assert!((pair[1] - pair[0] - 100.0 / 6.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_counts() {
        assert!(x_positions(0, 100.0).is_empty());
        assert_eq!(x_positions(1, 100.0), [50.0]);
        assert!(y_positions(&[], 100.0).is_empty());
    }

    #[test]
    fn test_min_maps_to_bottom_max_into_band() {
        let ys = y_positions(&[29.8, 32.1, 30.8], 100.0);
        // Minimum on the bottom edge
        assert_eq!(ys[0], 100.0);
        // Maximum at the top of the data band (20% headroom above)
        assert!((ys[1] - 20.0).abs() < 1e-9);
        // Everything stays inside the band
        for y in ys {
            assert!((20.0..=100.0).contains(&y));
        }
    }

    #[test]
    fn test_flat_series_is_constant_mid_band() {
        for len in [1, 2, 7] {
            let ys = y_positions(&vec![68.4; len], 100.0);
            assert_eq!(ys.len(), len);
            for y in ys {
                assert_eq!(y, 50.0);
                assert!(y.is_finite());
            }
        }
    }
}
