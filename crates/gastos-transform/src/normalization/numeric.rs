//! Amount parsing.
//!
//! Handles plain numbers ("1234.56") and Brazilian currency text
//! ("R$ 1.234,56", "1234,5"). When both separators appear, the last one is the
//! decimal separator.

use gastos_model::CellValue;

use crate::error::{NormalizationError, Result};

/// Largest accepted débito amount. Keeps every accepted amount exact in
/// cents and within `i64` cents.
pub const MAX_AMOUNT: f64 = 1e13;

/// Parse an amount string; returns None for blank, non-numeric or non-finite input.
pub fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '\u{a0}')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(parsed) = cleaned.parse::<f64>() {
        return parsed.is_finite().then_some(parsed);
    }
    if !cleaned.contains(['.', ',']) {
        return None;
    }
    let normalized = normalize_separators(&cleaned);
    normalized
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

fn normalize_separators(value: &str) -> String {
    let last_dot = value.rfind('.');
    let last_comma = value.rfind(',');
    let decimal = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => Some(if comma > dot { ',' } else { '.' }),
        (None, Some(_)) if value.matches(',').count() == 1 => Some(','),
        _ => None,
    };
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '.' | ',' if Some(ch) == decimal => out.push('.'),
            '.' | ',' => {}
            other => out.push(other),
        }
    }
    out
}

/// Parse a cell into an amount, negatives included.
pub fn parse_amount_cell(cell: &CellValue) -> Result<f64> {
    match cell {
        CellValue::Number(value) if value.is_finite() => Ok(*value),
        CellValue::Number(_) | CellValue::Date(_) => Err(NormalizationError::NotANumber {
            value: cell.to_string(),
        }),
        CellValue::Empty => Err(NormalizationError::Empty),
        CellValue::Text(text) if text.trim().is_empty() => Err(NormalizationError::Empty),
        CellValue::Text(text) => parse_amount(text).ok_or_else(|| NormalizationError::NotANumber {
            value: text.trim().to_string(),
        }),
    }
}

/// Parse a cell into a non-negative amount rounded to cents, at most
/// [`MAX_AMOUNT`].
pub fn parse_non_negative_amount(cell: &CellValue) -> Result<f64> {
    let value = parse_amount_cell(cell)?;
    if value < 0.0 {
        return Err(NormalizationError::NegativeAmount {
            value: cell.to_string(),
        });
    }
    if value > MAX_AMOUNT {
        return Err(NormalizationError::AmountTooLarge {
            value: cell.to_string(),
        });
    }
    // -0.0 rounds to -0.0; normalize so it prints and compares as zero
    Ok(round_cents(value) + 0.0)
}

/// Round to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_amount("100"), Some(100.0));
        assert_eq!(parse_amount(" 1234.56 "), Some(1234.56));
        assert_eq!(parse_amount("-5"), Some(-5.0));
        assert_eq!(parse_amount("1e3"), Some(1000.0));
    }

    #[test]
    fn brazilian_currency() {
        assert_eq!(parse_amount("1.234,56"), Some(1234.56));
        assert_eq!(parse_amount("R$ 1.234,56"), Some(1234.56));
        assert_eq!(parse_amount("1234,5"), Some(1234.5));
        assert_eq!(parse_amount("1.234.567"), Some(1234567.0));
        assert_eq!(parse_amount("R$\u{a0}10,00"), Some(10.0));
    }

    #[test]
    fn us_grouping_with_decimal_point() {
        assert_eq!(parse_amount("1,234.56"), Some(1234.56));
        assert_eq!(parse_amount("1,234,567"), Some(1234567.0));
    }

    #[test]
    fn rejects_garbage_and_non_finite() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("12,34,5.6.7x"), None);
    }

    #[test]
    fn non_negative_cells() {
        assert_eq!(
            parse_non_negative_amount(&CellValue::Text("10,126".to_string())),
            Ok(10.13)
        );
        assert_eq!(parse_non_negative_amount(&CellValue::Number(0.0)), Ok(0.0));
        assert!(matches!(
            parse_non_negative_amount(&CellValue::Text("-5".to_string())),
            Err(NormalizationError::NegativeAmount { .. })
        ));
        assert_eq!(
            parse_non_negative_amount(&CellValue::Empty),
            Err(NormalizationError::Empty)
        );
        assert!(matches!(
            parse_non_negative_amount(&CellValue::Number(f64::NAN)),
            Err(NormalizationError::NotANumber { .. })
        ));
    }

    #[test]
    fn huge_amounts_are_rejected_not_overflowed() {
        for raw in ["1e307", "1.7e308", "10000000000000.01"] {
            assert!(matches!(
                parse_non_negative_amount(&CellValue::Text(raw.to_string())),
                Err(NormalizationError::AmountTooLarge { .. })
            ));
        }
        assert!(matches!(
            parse_non_negative_amount(&CellValue::Number(1e300)),
            Err(NormalizationError::AmountTooLarge { .. })
        ));
        let largest = parse_non_negative_amount(&CellValue::Number(MAX_AMOUNT)).unwrap();
        assert!(largest.is_finite());
        assert_eq!(largest, MAX_AMOUNT);
    }
}
