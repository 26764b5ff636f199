//! Dimension scorer: thresholds to per-dimension scores and RFM classes.
//!
//! Recency scores high when small; frequency and monetary score high when
//! large. Every comparison is inclusive and bounds are tried in list order,
//! so the first bound a value fits under decides its score.

use crate::{
    config::{RfmConfig, ThresholdScheme},
    rfm_table::RfmRecord,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest score any dimension can reach, under either scheme.
pub const MAX_SCORE: u8 = 4;

// ── Score functions ──────────────────────────────────────────────────────────

/// Score a recency value (days). Lower is better.
pub fn score_recency(days: f64, scheme: &ThresholdScheme) -> u8 {
    let cuts = scheme.cut_points();
    let bucket = cuts.iter().position(|&t| days <= t).unwrap_or(cuts.len());
    // Bucket 0 always scores 4; falling past every bound scores 4 - len.
    MAX_SCORE - bucket as u8
}

/// Score a frequency or monetary value. Higher is better.
pub fn score_ascending(value: f64, scheme: &ThresholdScheme) -> u8 {
    let cuts = scheme.cut_points();
    let bucket = cuts.iter().position(|&t| value <= t).unwrap_or(cuts.len());
    let floor = match scheme {
        ThresholdScheme::ThreeBand(_) => 1,
        ThresholdScheme::FourBand(_)  => 0,
    };
    floor + bucket as u8
}

// ── RFM class ────────────────────────────────────────────────────────────────

/// Three-digit cohort key: the R, F and M scores concatenated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RfmClass(String);

impl RfmClass {
    pub fn from_scores(r: u8, f: u8, m: u8) -> Self {
        Self(format!("{r}{f}{m}"))
    }

    /// The class with the maximum score on every dimension ("444").
    pub fn top() -> Self {
        Self::from_scores(MAX_SCORE, MAX_SCORE, MAX_SCORE)
    }

    pub fn is_top(&self) -> bool {
        self.0 == "444"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RfmClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RfmClass {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// ── Scored customers ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCustomer {
    pub record:    RfmRecord,
    pub r_score:   u8,
    pub f_score:   u8,
    pub m_score:   u8,
    pub rfm_class: RfmClass,
    pub rfm_score: u8,
}

pub fn score_customer(record: &RfmRecord, config: &RfmConfig) -> ScoredCustomer {
    let r_score = score_recency(record.recency_days as f64, &config.recency);
    let f_score = score_ascending(f64::from(record.frequency), &config.frequency);
    let m_score = score_ascending(record.monetary_value, &config.monetary);

    ScoredCustomer {
        record:    record.clone(),
        r_score,
        f_score,
        m_score,
        rfm_class: RfmClass::from_scores(r_score, f_score, m_score),
        rfm_score: r_score + f_score + m_score,
    }
}

/// Score every record, preserving input order.
pub fn score_table(table: &[RfmRecord], config: &RfmConfig) -> Vec<ScoredCustomer> {
    table.iter().map(|record| score_customer(record, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_class_is_444() {
        assert!(RfmClass::top().is_top());
        assert_eq!(RfmClass::from_scores(4, 4, 3).as_str(), "443");
        assert!(!RfmClass::from_scores(4, 4, 3).is_top());
    }

    #[test]
    fn boundaries_are_inclusive() {
        let scheme = ThresholdScheme::ThreeBand([10.0, 20.0, 30.0]);
        assert_eq!(score_recency(10.0, &scheme), 4);
        assert_eq!(score_recency(10.5, &scheme), 3);
        assert_eq!(score_ascending(20.0, &scheme), 2);
        assert_eq!(score_ascending(20.5, &scheme), 3);
    }
}
