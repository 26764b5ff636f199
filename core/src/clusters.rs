//! Cluster definer: revenue-ranked bands of RFM classes.

use crate::{
    classes::ClassStatistics,
    config::{BandPolicy, RankRange},
    scoring::RfmClass,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierBands {
    /// Highest revenue share. Not a member of any band.
    pub top_ranked:        Option<RfmClass>,
    pub valiosos:          Vec<RfmClass>,
    pub potenciais:        Vec<RfmClass>,
    pub descompromissados: Vec<RfmClass>,
}

/// Rank classes by `percent_of_total`, highest first, and slice the
/// ranking into the three bands of `policy`.
///
/// Ties keep their order of appearance. Ranges past the end of the
/// ranking are truncated, so small datasets get small (or empty) bands.
pub fn define_clusters(stats: &[ClassStatistics], policy: &BandPolicy) -> TierBands {
    let mut ranked: Vec<&ClassStatistics> = stats.iter().collect();
    ranked.sort_by(|a, b| b.percent_of_total.total_cmp(&a.percent_of_total));

    let band = |range: RankRange| -> Vec<RfmClass> {
        let end = range.end.min(ranked.len());
        let start = range.start.min(end);
        ranked[start..end].iter().map(|s| s.rfm_class.clone()).collect()
    };

    let bands = TierBands {
        top_ranked:        ranked.first().map(|s| s.rfm_class.clone()),
        valiosos:          band(policy.valiosos),
        potenciais:        band(policy.potenciais),
        descompromissados: band(policy.descompromissados),
    };

    log::debug!(
        "clusters: top={:?} valiosos={} potenciais={} descompromissados={}",
        bands.top_ranked.as_ref().map(RfmClass::as_str),
        bands.valiosos.len(),
        bands.potenciais.len(),
        bands.descompromissados.len(),
    );

    bands
}
