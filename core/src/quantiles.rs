//! Quartile-based threshold suggestions.
//!
//! Gives a caller who has no thresholds yet a starting point: the
//! 25th, 50th and 75th percentiles of each dimension.

use crate::{config::ThresholdScheme, rfm_table::RfmRecord};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestedThresholds {
    pub recency:   ThresholdScheme,
    pub frequency: ThresholdScheme,
    pub monetary:  ThresholdScheme,
}

/// Percentile `q` in [0, 1] with linear interpolation between closest ranks.
/// `sorted` must be ascending and non-empty.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn quartiles(mut values: Vec<f64>) -> ThresholdScheme {
    values.sort_by(f64::total_cmp);
    ThresholdScheme::ThreeBand([
        percentile(&values, 0.25),
        percentile(&values, 0.50),
        percentile(&values, 0.75),
    ])
}

/// `None` when the table is empty.
pub fn suggest_thresholds(table: &[RfmRecord]) -> Option<SuggestedThresholds> {
    if table.is_empty() {
        return None;
    }
    Some(SuggestedThresholds {
        recency:   quartiles(table.iter().map(|r| r.recency_days as f64).collect()),
        frequency: quartiles(table.iter().map(|r| f64::from(r.frequency)).collect()),
        monetary:  quartiles(table.iter().map(|r| r.monetary_value).collect()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&values, 0.25) - 1.75).abs() < 1e-9);
        assert!((percentile(&values, 0.50) - 2.5).abs() < 1e-9);
        assert!((percentile(&values, 0.75) - 3.25).abs() < 1e-9);
    }

    #[test]
    fn single_value_repeats() {
        assert_eq!(quartiles(vec![7.0]), ThresholdScheme::ThreeBand([7.0, 7.0, 7.0]));
    }
}
