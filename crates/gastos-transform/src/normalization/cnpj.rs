//! CNPJ normalization.
//!
//! Values are reduced to their ASCII digits and left-padded with zeros to
//! 14 digits. Inputs with more than 14 digits are rejected.

use gastos_model::CellValue;

use crate::error::{NormalizationError, Result};

/// Number of digits in a CNPJ.
pub const CNPJ_LEN: usize = 14;

/// Normalize a CNPJ string to exactly 14 digits.
pub fn normalize_cnpj(value: &str) -> Result<String> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.len() > CNPJ_LEN {
        return Err(NormalizationError::CnpjTooLong {
            digits: digits.len(),
        });
    }
    Ok(format!("{digits:0>width$}", width = CNPJ_LEN))
}

/// Normalize a CNPJ cell. Numbers are rendered without a fractional part
/// first, so a spreadsheet-coerced `123.0` yields `00000000000123`.
pub fn normalize_cnpj_cell(cell: &CellValue) -> Result<String> {
    match cell {
        CellValue::Text(text) => normalize_cnpj(text),
        CellValue::Number(value) if value.is_finite() => {
            normalize_cnpj(&format!("{:.0}", value.abs().trunc()))
        }
        CellValue::Number(_) | CellValue::Date(_) | CellValue::Empty => {
            normalize_cnpj(&cell.to_string())
        }
    }
}

/// Render 14 digits as `12.345.678/0001-90`. Other inputs are returned as-is.
pub fn format_cnpj(digits: &str) -> String {
    if digits.len() != CNPJ_LEN || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return digits.to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &digits[0..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..14]
    )
}
