//! Display formatting for amounts, dates and PDF-bound text.

use chrono::NaiveDate;

/// Format an amount as Brazilian reais: `R$ 1.234,56`.
///
/// Negative values keep the sign after the currency symbol (`R$ -10,00`).
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return format!("R$ {value}");
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = value < 0.0 && fixed != "0.00";

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, digit) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    let sign = if negative { "-" } else { "" };
    format!("R$ {sign}{grouped},{frac_part}")
}

/// Format a date as `dd/mm/yyyy`.
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Reduce text to what a Latin-1 PDF font can render.
///
/// Typographic dashes, quotes and bullets become ASCII, non-breaking spaces
/// become spaces, zero-width and bidi control characters are removed, and
/// anything else outside Latin-1 is dropped.
pub fn to_latin1_text(text: &str) -> String {
    text.chars()
        .filter_map(|ch| match ch {
            '\u{2014}' | '\u{2013}' | '\u{2012}' | '\u{2015}' | '\u{2022}' => Some('-'),
            '\u{201c}' | '\u{201d}' => Some('"'),
            '\u{2018}' | '\u{2019}' => Some('\''),
            '\u{00a0}' => Some(' '),
            '\u{200b}'..='\u{200f}' | '\u{202a}'..='\u{202e}' => None,
            other if u32::from(other) <= 0xff => Some(other),
            _ => None,
        })
        .collect()
}
