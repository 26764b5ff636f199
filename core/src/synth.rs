//! Synthetic transaction log generator.
//!
//! Produces a reproducible store log for demos and tests: customers with
//! their own visit rate and spend level, some of whom stop buying partway
//! through, plus the occasional refund row.

use crate::{
    rng::{RngStream, SeededRng},
    transaction::Transaction,
};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticConfig {
    pub customers:                 usize,
    pub days:                      u32,
    /// Last calendar day of the generated log.
    pub end_date:                  NaiveDate,
    pub visits_per_month_mean:     f64,
    pub order_amount_pareto_xmin:  f64,
    pub order_amount_pareto_alpha: f64,
    pub order_amount_cap:          f64,
    pub refund_probability:        f64,
    /// Share of customers who stop buying before the last day.
    pub lapsed_share:              f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            customers:                 500,
            days:                      365,
            end_date:                  NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
            visits_per_month_mean:     2.0,
            order_amount_pareto_xmin:  15.0,
            order_amount_pareto_alpha: 1.6,
            order_amount_cap:          2000.0,
            refund_probability:        0.03,
            lapsed_share:              0.40,
        }
    }
}

struct CustomerProfile {
    customer_id:  String,
    visit_prob:   f64,
    spend_scale:  f64,
    first_day:    u32,
    active_until: u32,
}

fn build_profiles(config: &SyntheticConfig, rng: &mut SeededRng) -> Vec<CustomerProfile> {
    let last_day = config.days.saturating_sub(1);

    (0..config.customers)
        .map(|i| {
            // Individual visit rate: population mean ±80%
            let rate_adj = 0.2 + rng.next_f64() * 1.6;
            let visit_prob = (config.visits_per_month_mean * rate_adj / 30.0).min(1.0);

            let active_until = if rng.chance(config.lapsed_share) {
                rng.next_u64_below(u64::from(last_day) + 1) as u32
            } else {
                last_day
            };
            let first_day = rng.next_u64_below(u64::from(active_until) + 1) as u32;

            CustomerProfile {
                customer_id: format!("c-{i:06}"),
                visit_prob,
                spend_scale: rng.pareto(1.0, 2.5).min(10.0),
                first_day,
                active_until,
            }
        })
        .collect()
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Generate a transaction log. Same seed and config, same log.
pub fn generate(seed: u64, config: &SyntheticConfig) -> Vec<Transaction> {
    let mut profile_rng = SeededRng::new(seed, RngStream::Profiles);
    let mut activity_rng = SeededRng::new(seed, RngStream::Activity);

    let profiles = build_profiles(config, &mut profile_rng);
    let start_date = config
        .end_date
        .checked_sub_days(Days::new(u64::from(config.days.saturating_sub(1))))
        .unwrap_or(config.end_date);

    let mut transactions = Vec::new();
    let mut next_order = 0u64;

    for day in 0..config.days {
        let Some(date) = start_date.checked_add_days(Days::new(u64::from(day))) else {
            break;
        };

        for profile in &profiles {
            if day < profile.first_day || day > profile.active_until {
                continue;
            }
            if day != profile.first_day && !activity_rng.chance(profile.visit_prob) {
                continue;
            }

            let orders = 1 + activity_rng.next_u64_below(3);
            for _ in 0..orders {
                next_order += 1;
                let raw = activity_rng.pareto(
                    config.order_amount_pareto_xmin,
                    config.order_amount_pareto_alpha,
                );
                let amount = round_cents(raw.min(config.order_amount_cap) * profile.spend_scale);

                transactions.push(Transaction {
                    customer_id: profile.customer_id.clone(),
                    date,
                    net_total:   amount,
                    order_id:    format!("o-{next_order:08}"),
                });

                if activity_rng.chance(config.refund_probability) {
                    // Refunds can exceed the day's spend, leaving a negative day.
                    let refund = round_cents(amount * (0.5 + activity_rng.next_f64()));
                    transactions.push(Transaction {
                        customer_id: profile.customer_id.clone(),
                        date,
                        net_total:   -refund,
                        order_id:    format!("r-{next_order:08}"),
                    });
                }
            }
        }
    }

    log::debug!(
        "synth: seed={seed} customers={} days={} rows={}",
        config.customers,
        config.days,
        transactions.len(),
    );

    transactions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SyntheticConfig {
        SyntheticConfig {
            customers: 40,
            days:      120,
            ..SyntheticConfig::default()
        }
    }

    #[test]
    fn every_customer_buys_at_least_once() {
        let txns = generate(42, &small_config());
        let mut customers: Vec<&str> = txns.iter().map(|t| t.customer_id.as_str()).collect();
        customers.sort_unstable();
        customers.dedup();
        assert_eq!(customers.len(), 40);
    }

    #[test]
    fn dates_stay_inside_window() {
        let config = small_config();
        let first = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();
        for txn in generate(7, &config) {
            assert!(txn.date >= first && txn.date <= config.end_date, "out of window: {}", txn.date);
        }
    }

    #[test]
    fn same_seed_same_log() {
        assert_eq!(generate(99, &small_config()), generate(99, &small_config()));
    }
}
