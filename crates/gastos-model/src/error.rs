use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GastosError {
    #[error("unknown canonical field '{key}'")]
    UnknownField { key: String },
    #[error("canonical field '{field}' mapped more than once")]
    DuplicateField { field: String },
    #[error("invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, GastosError>;
