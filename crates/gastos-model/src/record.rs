use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A validated débito row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    /// Zero-based index of the source row.
    pub row: usize,
    pub date: NaiveDate,
    /// Non-negative, rounded to cents.
    pub amount: f64,
    /// Exactly 14 ASCII digits.
    pub cnpj: String,
    pub secretaria: String,
    /// Empty when the upload has no fornecedor column mapped.
    pub fornecedor: String,
    /// Source rows collapsed into this record by deduplication.
    pub occurrences: usize,
    pub is_outlier: bool,
}

impl CleanRecord {
    /// Amount in integer cents, used for exact comparisons.
    pub fn amount_cents(&self) -> i64 {
        (self.amount * 100.0).round() as i64
    }
}
