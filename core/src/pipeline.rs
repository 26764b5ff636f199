//! The segmentation pipeline.
//!
//! STAGE ORDER (fixed, linear, no retries):
//!   1. Normalize: rows to customer-days, negative days dropped
//!   2. Build: customer-days to one RFM record per customer
//!   3. Score: R/F/M scores, RFM class, RFM score
//!   4. Aggregate: statistics per RFM class
//!   5. Define: revenue-ranked bands of classes
//!   6. Classify: tier and lifecycle moment per customer
//!
//! Every stage is a pure function of the previous stage's output.
//! Identical inputs always give identical tables.

use crate::{
    classes::{aggregate_classes, ClassStatistics},
    classifier::{classify_tier, customer_moment, CustomerMoment, Tier},
    clusters::{define_clusters, TierBands},
    config::RfmConfig,
    error::RfmResult,
    loader,
    rfm_table::{build_rfm_table, reference_date},
    scoring::{score_table, RfmClass, ScoredCustomer},
    transaction::{normalize, Transaction},
    types::{CustomerId, Days},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// One row of the customer segmentation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSegment {
    pub customer_id:     CustomerId,
    pub recency_days:    Days,
    pub frequency:       u32,
    pub monetary_value:  f64,
    #[serde(rename = "R_Quartile")]
    pub r_quartile:      u8,
    #[serde(rename = "F_Quartile")]
    pub f_quartile:      u8,
    #[serde(rename = "M_Quartile")]
    pub m_quartile:      u8,
    #[serde(rename = "RFMClass")]
    pub rfm_class:       RfmClass,
    #[serde(rename = "RFM_Score")]
    pub rfm_score:       u8,
    #[serde(rename = "RFM_Level")]
    pub rfm_level:       Tier,
    #[serde(rename = "Customer_moment")]
    pub customer_moment: CustomerMoment,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub class_statistics: Vec<ClassStatistics>,
    pub segmentation:     Vec<CustomerSegment>,
    pub bands:            TierBands,
    /// Latest date in the retained data. `None` when nothing was retained.
    pub reference_date:   Option<NaiveDate>,
}

/// Run every stage over an in-memory transaction log.
///
/// A log with no retained customer-days produces empty tables rather
/// than an error. A NaN or infinite `net_total` is rejected before any
/// stage runs.
pub fn run_pipeline(transactions: &[Transaction], config: &RfmConfig) -> RfmResult<PipelineOutput> {
    let days = normalize(transactions)?;
    if days.is_empty() {
        log::warn!(
            "pipeline: no customer-days left out of {} rows; returning empty tables",
            transactions.len()
        );
        return Ok(PipelineOutput::default());
    }

    let table = build_rfm_table(&days);
    let scored = score_table(&table, config);
    let class_statistics = aggregate_classes(&scored);
    if class_statistics.len() == 1 {
        log::warn!("pipeline: all customers share class {}", class_statistics[0].rfm_class);
    }

    let bands = define_clusters(&class_statistics, &config.bands);
    let segmentation: Vec<CustomerSegment> = scored
        .iter()
        .map(|customer| segment_customer(customer, &bands, config))
        .collect();

    log::info!(
        "pipeline: segmented {} customers into {} classes",
        segmentation.len(),
        class_statistics.len(),
    );

    Ok(PipelineOutput {
        class_statistics,
        segmentation,
        bands,
        reference_date: reference_date(&days),
    })
}

/// Load a CSV transaction log and run the pipeline over it.
pub fn run_csv<R: Read>(reader: R, config: &RfmConfig) -> RfmResult<PipelineOutput> {
    let transactions = loader::read_transactions(reader)?;
    run_pipeline(&transactions, config)
}

fn segment_customer(
    customer: &ScoredCustomer,
    bands: &TierBands,
    config: &RfmConfig,
) -> CustomerSegment {
    CustomerSegment {
        customer_id:     customer.record.customer_id.clone(),
        recency_days:    customer.record.recency_days,
        frequency:       customer.record.frequency,
        monetary_value:  customer.record.monetary_value,
        r_quartile:      customer.r_score,
        f_quartile:      customer.f_score,
        m_quartile:      customer.m_score,
        rfm_class:       customer.rfm_class.clone(),
        rfm_score:       customer.rfm_score,
        rfm_level:       classify_tier(&customer.rfm_class, bands),
        customer_moment: customer_moment(customer.record.recency_days, &config.moments),
    }
}
