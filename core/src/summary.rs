//! Per-tier roll-up of the segmentation table.

use crate::{classifier::Tier, pipeline::CustomerSegment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSummary {
    pub tier:                 Tier,
    pub customers:            usize,
    pub percent_of_customers: f64,
    pub mean_recency:         f64,
    pub mean_frequency:       f64,
    pub mean_monetary:        f64,
}

/// One row per tier with at least one customer, in `Tier::ALL` order.
pub fn summarize_tiers(segments: &[CustomerSegment]) -> Vec<TierSummary> {
    let total = segments.len() as f64;

    Tier::ALL
        .iter()
        .filter_map(|&tier| {
            let members: Vec<&CustomerSegment> =
                segments.iter().filter(|s| s.rfm_level == tier).collect();
            if members.is_empty() {
                return None;
            }
            let n = members.len() as f64;
            Some(TierSummary {
                tier,
                customers:            members.len(),
                percent_of_customers: 100.0 * n / total,
                mean_recency:         members.iter().map(|s| s.recency_days as f64).sum::<f64>() / n,
                mean_frequency:       members.iter().map(|s| f64::from(s.frequency)).sum::<f64>() / n,
                mean_monetary:        members.iter().map(|s| s.monetary_value).sum::<f64>() / n,
            })
        })
        .collect()
}
