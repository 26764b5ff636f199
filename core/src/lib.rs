//! RFM customer segmentation.
//!
//! Turns a transaction log into recency/frequency/monetary scores, groups
//! customers into RFM classes, ranks the classes by revenue share and labels
//! every customer with a business tier and a lifecycle moment.
//!
//! Entry point: [`pipeline::run_pipeline`].

pub mod classes;
pub mod classifier;
pub mod clusters;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod pipeline;
pub mod quantiles;
pub mod rfm_table;
pub mod rng;
pub mod scoring;
pub mod summary;
pub mod synth;
pub mod transaction;
pub mod types;

pub use config::RfmConfig;
pub use error::{RfmError, RfmResult};
pub use pipeline::{run_pipeline, CustomerSegment, PipelineOutput};
