//! Run configuration: scoring thresholds, band rank policy and lifecycle cutoffs.
//!
//! Thresholds are validated once, here, into a `ThresholdScheme`.
//! Nothing downstream ever looks at a raw threshold list again.

use crate::{
    error::{RfmError, RfmResult},
    types::Days,
};
use serde::{Deserialize, Serialize, Serializer};

// ── Dimensions ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Recency,
    Frequency,
    Monetary,
}

impl Dimension {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Recency   => "recency",
            Self::Frequency => "frequency",
            Self::Monetary  => "monetary",
        }
    }
}

// ── Threshold schemes ────────────────────────────────────────────────────────

/// Ascending cut points for one dimension.
///
/// The number of cut points selects the scoring scheme:
/// three cut points give scores 1..=4, four give scores 0..=4.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdScheme {
    ThreeBand([f64; 3]),
    FourBand([f64; 4]),
}

impl ThresholdScheme {
    /// Validate a caller-supplied list for `dimension`.
    ///
    /// Ascending order is the caller's contract. A list that is not
    /// ascending is accepted and logged; scoring will still take the
    /// first bound that matches.
    pub fn parse(dimension: Dimension, values: &[f64]) -> RfmResult<Self> {
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(RfmError::NonFiniteThreshold {
                dimension: dimension.name(),
                value:     *bad,
            });
        }

        let scheme = match values {
            [a, b, c]    => Self::ThreeBand([*a, *b, *c]),
            [a, b, c, d] => Self::FourBand([*a, *b, *c, *d]),
            _ => {
                return Err(RfmError::ThresholdCount {
                    dimension: dimension.name(),
                    count:     values.len(),
                })
            }
        };

        if !scheme.is_ascending() {
            log::warn!(
                "{} thresholds {:?} are not ascending; scores will follow list order",
                dimension.name(),
                scheme.cut_points(),
            );
        }

        Ok(scheme)
    }

    pub fn cut_points(&self) -> &[f64] {
        match self {
            Self::ThreeBand(t) => t,
            Self::FourBand(t)  => t,
        }
    }

    pub fn is_ascending(&self) -> bool {
        self.cut_points().windows(2).all(|w| w[0] <= w[1])
    }
}

impl Serialize for ThresholdScheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.cut_points())
    }
}

// ── Band policy ──────────────────────────────────────────────────────────────

/// Half-open rank range `[start, end)` over classes sorted by
/// revenue share, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRange {
    pub start: usize,
    pub end:   usize,
}

impl RankRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    fn overlaps(&self, other: &RankRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Rank ranges for the three revenue bands.
///
/// The defaults assume the 64-class universe of 4×4×4 scores. Rank 0,
/// the single highest-revenue class, belongs to no band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandPolicy {
    pub valiosos:          RankRange,
    pub potenciais:        RankRange,
    pub descompromissados: RankRange,
}

impl Default for BandPolicy {
    fn default() -> Self {
        Self {
            valiosos:          RankRange::new(1, 5),
            potenciais:        RankRange::new(5, 12),
            descompromissados: RankRange::new(12, 52),
        }
    }
}

impl BandPolicy {
    pub fn validate(&self) -> RfmResult<()> {
        let named = [
            ("valiosos",          self.valiosos),
            ("potenciais",        self.potenciais),
            ("descompromissados", self.descompromissados),
        ];

        for (band, range) in named {
            if range.start > range.end {
                return Err(RfmError::InvalidBandRange {
                    band,
                    start: range.start,
                    end:   range.end,
                });
            }
        }

        for (i, (band, range)) in named.iter().enumerate() {
            if named[i + 1..].iter().any(|(_, other)| range.overlaps(other)) {
                return Err(RfmError::InvalidBandRange {
                    band:  *band,
                    start: range.start,
                    end:   range.end,
                });
            }
        }

        Ok(())
    }
}

// ── Lifecycle cutoffs ────────────────────────────────────────────────────────

/// Inclusive upper bounds, in days of recency, for each lifecycle moment.
/// Anything above `recuperacao_max` is inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentCutoffs {
    pub entrantes_max:   Days,
    pub manutencao_max:  Days,
    pub recuperacao_max: Days,
}

impl Default for MomentCutoffs {
    fn default() -> Self {
        Self {
            entrantes_max:   30,
            manutencao_max:  100,
            recuperacao_max: 200,
        }
    }
}

// ── Run configuration ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfmConfig {
    pub recency:   ThresholdScheme,
    pub frequency: ThresholdScheme,
    pub monetary:  ThresholdScheme,
    pub bands:     BandPolicy,
    pub moments:   MomentCutoffs,
}

#[derive(Debug, Clone, Deserialize)]
struct RfmConfigFile {
    recency_thresholds:   Vec<f64>,
    frequency_thresholds: Vec<f64>,
    monetary_thresholds:  Vec<f64>,
    #[serde(default)]
    bands:                BandPolicy,
    #[serde(default)]
    moments:              MomentCutoffs,
}

impl RfmConfig {
    /// Build a config from three caller-supplied threshold lists,
    /// with the default band policy and lifecycle cutoffs.
    pub fn from_lists(recency: &[f64], frequency: &[f64], monetary: &[f64]) -> RfmResult<Self> {
        Ok(Self {
            recency:   ThresholdScheme::parse(Dimension::Recency, recency)?,
            frequency: ThresholdScheme::parse(Dimension::Frequency, frequency)?,
            monetary:  ThresholdScheme::parse(Dimension::Monetary, monetary)?,
            bands:     BandPolicy::default(),
            moments:   MomentCutoffs::default(),
        })
    }

    pub fn from_json(json: &str) -> RfmResult<Self> {
        let file: RfmConfigFile = serde_json::from_str(json)?;
        file.bands.validate()?;

        let moments = file.moments;
        if !(moments.entrantes_max <= moments.manutencao_max
            && moments.manutencao_max <= moments.recuperacao_max)
        {
            log::warn!("lifecycle cutoffs {moments:?} are not ascending");
        }

        Ok(Self {
            bands: file.bands,
            moments,
            ..Self::from_lists(
                &file.recency_thresholds,
                &file.frequency_thresholds,
                &file.monetary_thresholds,
            )?
        })
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {path}: {e}"))?;
        Ok(config)
    }

    /// Config with hardcoded thresholds for use in tests.
    pub fn default_test() -> Self {
        Self {
            recency:   ThresholdScheme::FourBand([10.0, 30.0, 60.0, 120.0]),
            frequency: ThresholdScheme::ThreeBand([1.0, 3.0, 6.0]),
            monetary:  ThresholdScheme::ThreeBand([50.0, 150.0, 400.0]),
            bands:     BandPolicy::default(),
            moments:   MomentCutoffs::default(),
        }
    }
}
