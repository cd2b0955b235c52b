//! Calendar date parsing.
//!
//! Formats are chrono format strings tried in the configured order; the first
//! one that matches wins. Datetime formats are accepted and truncated to the
//! date part.

use chrono::{NaiveDate, NaiveDateTime};
use gastos_model::CellValue;

use crate::error::{NormalizationError, Result};

/// Parse a date string against `formats`, in order.
pub fn parse_date<S: AsRef<str>>(value: &str, formats: &[S]) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    formats.iter().find_map(|format| {
        let format = format.as_ref();
        NaiveDate::parse_from_str(trimmed, format)
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(trimmed, format)
                    .ok()
                    .map(|dt| dt.date())
            })
    })
}

/// Parse a cell into a calendar date.
///
/// `Date` cells pass through; numbers are not interpreted as dates.
pub fn parse_date_cell<S: AsRef<str>>(cell: &CellValue, formats: &[S]) -> Result<NaiveDate> {
    match cell {
        CellValue::Date(date) => Ok(*date),
        CellValue::Empty => Err(NormalizationError::Empty),
        CellValue::Text(text) if text.trim().is_empty() => Err(NormalizationError::Empty),
        CellValue::Text(text) => {
            parse_date(text, formats).ok_or_else(|| NormalizationError::UnparseableDate {
                value: text.trim().to_string(),
            })
        }
        CellValue::Number(_) => Err(NormalizationError::UnparseableDate {
            value: cell.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use gastos_model::DEFAULT_DATE_FORMATS;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_and_day_first() {
        assert_eq!(
            parse_date("2025-01-05", DEFAULT_DATE_FORMATS),
            Some(ymd(2025, 1, 5))
        );
        assert_eq!(
            parse_date("05/01/2025", DEFAULT_DATE_FORMATS),
            Some(ymd(2025, 1, 5))
        );
        assert_eq!(
            parse_date("31.12.2024", DEFAULT_DATE_FORMATS),
            Some(ymd(2024, 12, 31))
        );
    }

    #[test]
    fn datetime_truncates_to_date() {
        assert_eq!(
            parse_date("2025-01-05 13:45:00", DEFAULT_DATE_FORMATS),
            Some(ymd(2025, 1, 5))
        );
        assert_eq!(
            parse_date("05/01/2025 08:30", DEFAULT_DATE_FORMATS),
            Some(ymd(2025, 1, 5))
        );
    }

    #[test]
    fn invalid_calendar_dates_are_rejected() {
        assert_eq!(parse_date("2025-02-30", DEFAULT_DATE_FORMATS), None);
        assert_eq!(parse_date("13/13/2025", DEFAULT_DATE_FORMATS), None);
        assert_eq!(parse_date("ontem", DEFAULT_DATE_FORMATS), None);
    }

    #[test]
    fn formats_restrict_what_is_accepted() {
        assert_eq!(parse_date("05/01/2025", &["%Y-%m-%d"]), None);
        assert_eq!(parse_date("01/05/2025", &["%m/%d/%Y"]), Some(ymd(2025, 1, 5)));
    }

    #[test]
    fn cells() {
        let formats = DEFAULT_DATE_FORMATS;
        assert_eq!(
            parse_date_cell(&CellValue::Date(ymd(2024, 3, 1)), formats),
            Ok(ymd(2024, 3, 1))
        );
        assert_eq!(
            parse_date_cell(&CellValue::Empty, formats),
            Err(NormalizationError::Empty)
        );
        assert!(matches!(
            parse_date_cell(&CellValue::Number(45000.0), formats),
            Err(NormalizationError::UnparseableDate { .. })
        ));
    }
}
