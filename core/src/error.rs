use thiserror::Error;

#[derive(Error, Debug)]
pub enum RfmError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Required column '{column}' is missing")]
    MissingColumn { column: String },

    #[error("Line {row}: column '{column}' is empty")]
    EmptyField { row: usize, column: String },

    #[error("Line {row}: cannot parse date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("Row {row}: net_total '{value}' is not a finite number")]
    InvalidNetTotal { row: usize, value: String },

    #[error("{dimension} thresholds must have 3 or 4 values, got {count}")]
    ThresholdCount { dimension: &'static str, count: usize },

    #[error("{dimension} threshold {value} is not finite")]
    NonFiniteThreshold { dimension: &'static str, value: f64 },

    #[error("Band '{band}' has invalid rank range {start}..{end}")]
    InvalidBandRange { band: &'static str, start: usize, end: usize },
}

pub type RfmResult<T> = Result<T, RfmError>;
