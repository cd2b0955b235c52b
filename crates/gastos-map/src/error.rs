//! Error types for mapping operations.

use gastos_model::GastosError;
use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Error, PartialEq)]
pub enum MappingError {
    /// Raw mapping used a key that is not a canonical field.
    #[error(transparent)]
    InvalidMapping(#[from] GastosError),
    /// Two canonical fields were pointed at the same source column.
    #[error("column '{column}' mapped to both '{first}' and '{second}'")]
    ColumnAlreadyUsed {
        column: String,
        first: String,
        second: String,
    },
}

pub type Result<T> = std::result::Result<T, MappingError>;
