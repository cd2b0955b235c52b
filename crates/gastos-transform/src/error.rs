use thiserror::Error;

/// Why a single cell could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("empty value")]
    Empty,
    #[error("'{value}' does not match any accepted date format")]
    UnparseableDate { value: String },
    #[error("'{value}' is not a number")]
    NotANumber { value: String },
    #[error("negative amount {value}")]
    NegativeAmount { value: String },
    #[error("amount {value} exceeds the accepted maximum")]
    AmountTooLarge { value: String },
    #[error("CNPJ has {digits} digits, more than 14")]
    CnpjTooLong { digits: usize },
}

pub type Result<T> = std::result::Result<T, NormalizationError>;
