use chrono::NaiveDate;
use thiserror::Error;

/// Error type that captures report generation failures.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("Invalid interval label: {0}")]
    InvalidLabel(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

pub type ReportResult<T> = Result<T, ReportError>;
