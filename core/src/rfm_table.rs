//! RFM table builder: one recency/frequency/monetary record per customer.

use crate::{
    transaction::DailyTransaction,
    types::{CustomerId, Days},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfmRecord {
    pub customer_id:    CustomerId,
    /// Days between the latest date in the log and this customer's latest date.
    pub recency_days:   Days,
    /// Number of distinct purchase days.
    pub frequency:      u32,
    pub monetary_value: f64,
}

/// The reference date for recency: the latest date across all rows.
pub fn reference_date(days: &[DailyTransaction]) -> Option<NaiveDate> {
    days.iter().map(|d| d.date).max()
}

/// Build the RFM table from normalized customer-days.
///
/// Output is ordered by customer id as a string, so "10" comes before
/// "9". That order is also the first-appearance order of classes, which
/// breaks revenue ties when bands are defined. An empty input yields an
/// empty table.
pub fn build_rfm_table(days: &[DailyTransaction]) -> Vec<RfmRecord> {
    let Some(now) = reference_date(days) else {
        return Vec::new();
    };

    struct Acc {
        last_date:      NaiveDate,
        frequency:      u32,
        monetary_value: f64,
    }

    let mut per_customer: BTreeMap<&str, Acc> = BTreeMap::new();
    for day in days {
        let acc = per_customer
            .entry(day.customer_id.as_str())
            .or_insert(Acc {
                last_date:      day.date,
                frequency:      0,
                monetary_value: 0.0,
            });
        acc.last_date = acc.last_date.max(day.date);
        acc.frequency += 1;
        acc.monetary_value += day.net_total;
    }

    let table: Vec<RfmRecord> = per_customer
        .into_iter()
        .map(|(customer_id, acc)| RfmRecord {
            customer_id:    customer_id.to_string(),
            recency_days:   (now - acc.last_date).num_days(),
            frequency:      acc.frequency,
            monetary_value: acc.monetary_value,
        })
        .collect();

    log::debug!("rfm_table: {} customers, reference date {now}", table.len());
    table
}
