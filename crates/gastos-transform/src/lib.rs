//! Débito cell normalization.
//!
//! - **datetime**: calendar date parsing under configurable formats
//! - **numeric**: plain and BRL-formatted amount parsing
//! - **cnpj**: digit extraction and zero padding of CNPJ values

mod error;
pub mod normalization;

pub use error::{NormalizationError, Result};
pub use normalization::cnpj::{CNPJ_LEN, format_cnpj, normalize_cnpj, normalize_cnpj_cell};
pub use normalization::datetime::{parse_date, parse_date_cell};
pub use normalization::numeric::{
    MAX_AMOUNT, parse_amount, parse_amount_cell, parse_non_negative_amount, round_cents,
};
