//! Configuration options for the débitos pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{GastosError, Result};

/// Percentile above which a record is marked as an outlier in its secretaria.
pub const DEFAULT_OUTLIER_PERCENTILE: f64 = 95.0;

/// Accepted date formats, tried in order. ISO first, then day-first Brazilian
/// layouts; datetime layouts keep only the date part.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y/%m/%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Options controlling débito validation and annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineOptions {
    /// chrono format strings accepted for the date field.
    pub date_formats: Vec<String>,

    /// Percentile (0, 100] used for outlier marking.
    pub outlier_percentile: f64,

    /// Collapse rows with identical (date, amount, cnpj, secretaria).
    pub dedupe: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            date_formats: DEFAULT_DATE_FORMATS
                .iter()
                .map(|format| (*format).to_string())
                .collect(),
            outlier_percentile: DEFAULT_OUTLIER_PERCENTILE,
            dedupe: false,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dedupe(mut self, enable: bool) -> Self {
        self.dedupe = enable;
        self
    }

    #[must_use]
    pub fn with_outlier_percentile(mut self, percentile: f64) -> Self {
        self.outlier_percentile = percentile;
        self
    }

    #[must_use]
    pub fn with_date_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let percentile = self.outlier_percentile;
        if !percentile.is_finite() || percentile <= 0.0 || percentile > 100.0 {
            return Err(GastosError::InvalidOption {
                name: "outlier_percentile",
                reason: format!("{percentile} is outside (0, 100]"),
            });
        }
        if self.date_formats.iter().all(|format| format.trim().is_empty()) {
            return Err(GastosError::InvalidOption {
                name: "date_formats",
                reason: "at least one date format is required".to_string(),
            });
        }
        Ok(())
    }
}
