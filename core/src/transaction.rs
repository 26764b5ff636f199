//! Transaction normalizer: raw rows to one row per customer per day.

use crate::{
    error::{RfmError, RfmResult},
    types::{CustomerId, OrderId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One validated row of the transaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub customer_id: CustomerId,
    pub date:        NaiveDate,
    pub net_total:   f64,
    pub order_id:    OrderId,
}

/// All of a customer's transactions on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTransaction {
    pub customer_id:      CustomerId,
    pub date:             NaiveDate,
    pub net_total:        f64,
    pub qtd_transactions: usize,
    pub order_ids:        Vec<OrderId>,
}

/// Group rows by (customer_id, date), summing `net_total`.
///
/// Groups whose summed `net_total` is negative are refunds or
/// cancellations and are dropped. Output is ordered by customer id,
/// then date. Ids are compared as strings, so "10" sorts before "9".
///
/// A NaN or infinite `net_total` fails with `InvalidNetTotal`, where
/// `row` is the index into `transactions`.
pub fn normalize(transactions: &[Transaction]) -> RfmResult<Vec<DailyTransaction>> {
    let mut groups: BTreeMap<(&str, NaiveDate), DailyTransaction> = BTreeMap::new();

    for (row, txn) in transactions.iter().enumerate() {
        if !txn.net_total.is_finite() {
            return Err(RfmError::InvalidNetTotal {
                row,
                value: txn.net_total.to_string(),
            });
        }
        let day = groups
            .entry((txn.customer_id.as_str(), txn.date))
            .or_insert_with(|| DailyTransaction {
                customer_id:      txn.customer_id.clone(),
                date:             txn.date,
                net_total:        0.0,
                qtd_transactions: 0,
                order_ids:        Vec::new(),
            });
        day.net_total += txn.net_total;
        day.qtd_transactions += 1;
        day.order_ids.push(txn.order_id.clone());
    }

    let total_groups = groups.len();
    let kept: Vec<DailyTransaction> = groups
        .into_values()
        .filter(|day| day.net_total >= 0.0)
        .collect();

    log::debug!(
        "normalize: {} rows -> {} customer-days ({} negative days dropped)",
        transactions.len(),
        kept.len(),
        total_groups - kept.len(),
    );

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(customer: &str, date: &str, net_total: f64, order: &str) -> Transaction {
        Transaction {
            customer_id: customer.into(),
            date:        date.parse().unwrap(),
            net_total,
            order_id:    order.into(),
        }
    }

    #[test]
    fn same_day_rows_collapse_into_one() {
        let rows = vec![
            txn("c1", "2024-03-01", 10.0, "o1"),
            txn("c1", "2024-03-01", 15.5, "o2"),
            txn("c1", "2024-03-02", 7.0, "o3"),
        ];
        let days = normalize(&rows).unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].qtd_transactions, 2);
        assert!((days[0].net_total - 25.5).abs() < 1e-9);
        assert_eq!(days[0].order_ids, vec!["o1".to_string(), "o2".to_string()]);
    }

    #[test]
    fn negative_day_is_dropped_but_partial_refund_is_kept() {
        let rows = vec![
            txn("c1", "2024-03-01", 40.0, "o1"),
            txn("c1", "2024-03-01", -10.0, "r1"),
            txn("c2", "2024-03-01", -25.0, "r2"),
        ];
        let days = normalize(&rows).unwrap();

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].customer_id, "c1");
        assert!((days[0].net_total - 30.0).abs() < 1e-9);
    }

    #[test]
    fn zero_total_day_is_kept() {
        let rows = vec![
            txn("c1", "2024-03-01", 20.0, "o1"),
            txn("c1", "2024-03-01", -20.0, "r1"),
        ];
        assert_eq!(normalize(&rows).unwrap().len(), 1);
    }

    #[test]
    fn non_finite_total_is_rejected_with_its_index() {
        let rows = vec![
            txn("c1", "2024-03-01", 10.0, "o1"),
            txn("c2", "2024-03-02", f64::INFINITY, "o2"),
        ];
        let err = normalize(&rows).unwrap_err();
        assert!(
            matches!(&err, RfmError::InvalidNetTotal { row: 1, value } if value == "inf"),
            "unexpected error: {err}"
        );
    }
}
