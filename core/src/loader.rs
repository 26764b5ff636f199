//! CSV transaction loader.
//!
//! Expected columns (any order, extra columns ignored):
//!   date (or date_created), customer_id, net_total, order_id

use crate::{
    error::{RfmError, RfmResult},
    transaction::Transaction,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::io::Read;

const DATE_COLUMNS: [&str; 2] = ["date", "date_created"];
const CUSTOMER_COLUMN: &str = "customer_id";
const NET_TOTAL_COLUMN: &str = "net_total";
const ORDER_COLUMN: &str = "order_id";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

struct ColumnIndex {
    date:        usize,
    customer_id: usize,
    net_total:   usize,
    order_id:    usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> RfmResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| RfmError::MissingColumn { column: name.to_string() })
        };

        let date = DATE_COLUMNS
            .iter()
            .find_map(|name| find(*name))
            .ok_or_else(|| RfmError::MissingColumn { column: DATE_COLUMNS[0].to_string() })?;

        Ok(Self {
            date,
            customer_id: require(CUSTOMER_COLUMN)?,
            net_total:   require(NET_TOTAL_COLUMN)?,
            order_id:    require(ORDER_COLUMN)?,
        })
    }
}

/// Load transactions from a CSV reader.
///
/// The first malformed row aborts the load; no partial result is returned.
pub fn read_transactions<R: Read>(reader: R) -> RfmResult<Vec<Transaction>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnIndex::resolve(csv_reader.headers()?)?;

    let mut transactions = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let record = result?;
        // Header is line 1.
        let row = i + 2;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let customer_id = field(columns.customer_id);
        if customer_id.is_empty() {
            return Err(RfmError::EmptyField { row, column: CUSTOMER_COLUMN.to_string() });
        }

        let raw_date = field(columns.date);
        let date = parse_date(raw_date)
            .ok_or_else(|| RfmError::InvalidDate { row, value: raw_date.to_string() })?;

        let raw_total = field(columns.net_total);
        let net_total = raw_total
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| RfmError::InvalidNetTotal { row, value: raw_total.to_string() })?;

        transactions.push(Transaction {
            customer_id: customer_id.to_string(),
            date,
            net_total,
            order_id: field(columns.order_id).to_string(),
        });
    }

    log::debug!("loader: read {} transactions", transactions.len());
    Ok(transactions)
}

/// Load transactions from a CSV file path.
pub fn read_transactions_file(path: &str) -> RfmResult<Vec<Transaction>> {
    let file = std::fs::File::open(path)?;
    read_transactions(file)
}

/// Parse a calendar date, dropping any time-of-day part.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|datetime| datetime.date_naive())
}
