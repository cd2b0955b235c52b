//! Record filters for the débitos and saldos views.
//!
//! Empty sets mean "no restriction". Ranges are inclusive.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use gastos_model::{CleanRecord, SaldoRecord};
use tracing::debug;

use crate::error::FilterError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebitoFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub secretarias: BTreeSet<String>,
    pub fornecedores: BTreeSet<String>,
    /// Normalized 14-digit CNPJs.
    pub cnpjs: BTreeSet<String>,
    /// Case-insensitive substring of the fornecedor name.
    pub fornecedor_contains: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl DebitoFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    #[must_use]
    pub fn with_secretarias<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secretarias.extend(values.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_fornecedores<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fornecedores.extend(values.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_cnpjs<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cnpjs.extend(values.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_fornecedor_contains(mut self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        self.fornecedor_contains = (!needle.trim().is_empty()).then_some(needle);
        self
    }

    #[must_use]
    pub fn with_amount_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(start), Some(end)) = (self.date_from, self.date_to) {
            if start > end {
                return Err(FilterError::InvertedDateRange { start, end });
            }
        }
        if let (Some(min), Some(max)) = (self.min_amount, self.max_amount) {
            if min > max {
                return Err(FilterError::InvertedAmountRange { min, max });
            }
        }
        Ok(())
    }

    pub fn matches(&self, record: &CleanRecord) -> bool {
        if self.date_from.is_some_and(|from| record.date < from)
            || self.date_to.is_some_and(|to| record.date > to)
        {
            return false;
        }
        if self.min_amount.is_some_and(|min| record.amount < min)
            || self.max_amount.is_some_and(|max| record.amount > max)
        {
            return false;
        }
        if !allows(&self.secretarias, &record.secretaria)
            || !allows(&self.fornecedores, &record.fornecedor)
            || !allows(&self.cnpjs, &record.cnpj)
        {
            return false;
        }
        match &self.fornecedor_contains {
            Some(needle) => record
                .fornecedor
                .to_lowercase()
                .contains(&needle.trim().to_lowercase()),
            None => true,
        }
    }

    /// Records matching the filter, in input order.
    pub fn apply(&self, records: &[CleanRecord]) -> Result<Vec<CleanRecord>, FilterError> {
        self.validate()?;
        let kept: Vec<CleanRecord> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        debug!(before = records.len(), after = kept.len(), "filtered débitos");
        Ok(kept)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaldoFilter {
    pub secretarias: BTreeSet<String>,
    pub bancos: BTreeSet<String>,
    pub tipos_recurso: BTreeSet<String>,
}

impl SaldoFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_secretarias<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secretarias.extend(values.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_bancos<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bancos.extend(values.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_tipos_recurso<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tipos_recurso.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn matches(&self, record: &SaldoRecord) -> bool {
        allows(&self.secretarias, &record.secretaria)
            && allows(&self.bancos, &record.banco)
            && allows(&self.tipos_recurso, &record.tipo_recurso)
    }

    pub fn apply(&self, records: &[SaldoRecord]) -> Vec<SaldoRecord> {
        let kept: Vec<SaldoRecord> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        debug!(before = records.len(), after = kept.len(), "filtered saldos");
        kept
    }
}

fn allows(set: &BTreeSet<String>, value: &str) -> bool {
    set.is_empty() || set.contains(value)
}

/// Distinct values of one record attribute, sorted, for building filter choices.
pub fn distinct_values<'a, T, F>(records: &'a [T], key: F) -> Vec<String>
where
    F: Fn(&'a T) -> &'a str,
{
    records
        .iter()
        .map(key)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32, amount: f64, secretaria: &str, fornecedor: &str) -> CleanRecord {
        CleanRecord {
            row: day as usize,
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            amount,
            cnpj: format!("{day:0>14}"),
            secretaria: secretaria.to_string(),
            fornecedor: fornecedor.to_string(),
            occurrences: 1,
            is_outlier: false,
        }
    }

    fn sample() -> Vec<CleanRecord> {
        vec![
            record(1, 100.0, "SAUDE", "ACME LTDA"),
            record(10, 50.0, "EDUCACAO", "Beta Servicos"),
            record(20, 900.0, "SAUDE", "Gama Obras"),
        ]
    }

    fn rows(records: &[CleanRecord]) -> Vec<usize> {
        records.iter().map(|record| record.row).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let kept = DebitoFilter::new().apply(&sample()).unwrap();
        assert_eq!(rows(&kept), vec![1, 10, 20]);
    }

    #[test]
    fn date_range_is_inclusive() {
        let filter = DebitoFilter::new().with_date_range(
            NaiveDate::from_ymd_opt(2025, 1, 10),
            NaiveDate::from_ymd_opt(2025, 1, 20),
        );
        assert_eq!(rows(&filter.apply(&sample()).unwrap()), vec![10, 20]);
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let filter = DebitoFilter::new().with_date_range(
            NaiveDate::from_ymd_opt(2025, 2, 1),
            NaiveDate::from_ymd_opt(2025, 1, 1),
        );
        assert!(matches!(
            filter.apply(&sample()),
            Err(FilterError::InvertedDateRange { .. })
        ));
    }

    #[test]
    fn sets_and_substring_combine() {
        let filter = DebitoFilter::new()
            .with_secretarias(["SAUDE"])
            .with_fornecedor_contains("acme");
        assert_eq!(rows(&filter.apply(&sample()).unwrap()), vec![1]);
    }

    #[test]
    fn amount_range() {
        let filter = DebitoFilter::new().with_amount_range(Some(50.0), Some(100.0));
        assert_eq!(rows(&filter.apply(&sample()).unwrap()), vec![1, 10]);
    }

    #[test]
    fn saldo_filter_by_banco() {
        let saldo = |banco: &str| SaldoRecord {
            conta: "1".to_string(),
            nome_da_conta: "Movimento".to_string(),
            secretaria: "SAUDE".to_string(),
            banco: banco.to_string(),
            tipo_recurso: "LIVRE".to_string(),
            saldo: 10.0,
        };
        let records = vec![saldo("BB"), saldo("CEF")];
        let kept = SaldoFilter::new().with_bancos(["CEF"]).apply(&records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].banco, "CEF");
    }

    #[test]
    fn distinct_values_are_sorted() {
        let records = sample();
        assert_eq!(
            distinct_values(&records, |record| record.secretaria.as_str()),
            vec!["EDUCACAO", "SAUDE"]
        );
    }
}
