//! Shared primitive types used across the entire pipeline.

/// A stable customer identifier, taken verbatim from the transaction log.
pub type CustomerId = String;

/// An order identifier, taken verbatim from the transaction log.
pub type OrderId = String;

/// Whole days between two calendar dates.
pub type Days = i64;
