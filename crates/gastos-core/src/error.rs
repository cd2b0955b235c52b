//! Error types for the débitos pipeline, filters and saldos preparation.

use chrono::NaiveDate;
use gastos_model::GastosError;
use thiserror::Error;

// === Pipeline ===

/// Fatal pipeline conditions. Bad cell data is never one of these.
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    /// No canonical field is mapped and there are rows to process.
    #[error("column mapping is empty; map at least one field")]
    EmptyMapping,

    #[error(transparent)]
    InvalidOptions(#[from] GastosError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

// === Filters ===

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("date range starts at {start} after it ends at {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("amount range minimum {min} is above maximum {max}")]
    InvertedAmountRange { min: f64, max: f64 },
}

// === Saldos ===

#[derive(Debug, Error, PartialEq)]
pub enum SaldosError {
    #[error("missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },
}
