//! Class aggregator: descriptive statistics per RFM class.

use crate::scoring::{RfmClass, ScoredCustomer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStatistics {
    #[serde(rename = "RFMClass")]
    pub rfm_class:            RfmClass,
    pub total_monetary:       f64,
    pub percent_of_total:     f64,
    pub total_customers:      usize,
    pub percentual_customers: f64,
    pub mean_recency:         f64,
    pub mean_frequency:       f64,
}

#[derive(Default)]
struct ClassAcc {
    total_monetary: f64,
    customers:      usize,
    recency_sum:    f64,
    frequency_sum:  f64,
}

/// One statistics row per class present in `scored`, in order of each
/// class's first appearance. Empty classes never appear.
///
/// When total revenue is zero every class reports 0% of revenue.
pub fn aggregate_classes(scored: &[ScoredCustomer]) -> Vec<ClassStatistics> {
    let grand_total: f64 = scored.iter().map(|c| c.record.monetary_value).sum();
    let customer_count = scored.len();

    let mut order: Vec<&RfmClass> = Vec::new();
    let mut accs: HashMap<&RfmClass, ClassAcc> = HashMap::new();

    for customer in scored {
        let acc = accs.entry(&customer.rfm_class).or_insert_with(|| {
            order.push(&customer.rfm_class);
            ClassAcc::default()
        });
        acc.total_monetary += customer.record.monetary_value;
        acc.customers += 1;
        acc.recency_sum += customer.record.recency_days as f64;
        acc.frequency_sum += f64::from(customer.record.frequency);
    }

    let stats: Vec<ClassStatistics> = order
        .into_iter()
        .filter_map(|class| accs.get(class).map(|acc| (class, acc)))
        .map(|(class, acc)| {
            let n = acc.customers as f64;
            ClassStatistics {
                rfm_class:            class.clone(),
                total_monetary:       acc.total_monetary,
                percent_of_total:     percent(acc.total_monetary, grand_total),
                total_customers:      acc.customers,
                percentual_customers: percent(n, customer_count as f64),
                mean_recency:         acc.recency_sum / n,
                mean_frequency:       acc.frequency_sum / n,
            }
        })
        .collect();

    log::debug!(
        "classes: {} customers across {} classes, revenue {:.2}",
        customer_count,
        stats.len(),
        grand_total,
    );

    stats
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        100.0 * part / whole
    }
}
