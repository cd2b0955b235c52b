//! Group-by aggregations behind the débitos and saldos charts.

use gastos_model::{CleanRecord, SaldoRecord};
use gastos_transform::round_cents;
use polars::prelude::{DataFrame, IntoLazy, SortMultipleOptions, col};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::frame::{
    CNPJ, FORNECEDOR, SALDO_BANCARIO, SALDO_LIVRE, SECRETARIA, VALOR, debitos_frame, saldos_frame,
};

/// Smallest and largest accepted "top N" sizes.
pub const TOP_N_MIN: usize = 3;
pub const TOP_N_MAX: usize = 50;
pub const TOP_N_DEFAULT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecretariaTotal {
    pub secretaria: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FornecedorTotal {
    pub fornecedor: String,
    pub cnpj: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaldoSecretaria {
    pub secretaria: String,
    pub saldo_livre: f64,
}

/// Débito totals per secretaria, smallest first.
pub fn totals_by_secretaria(records: &[CleanRecord]) -> Result<Vec<SecretariaTotal>> {
    let grouped = debitos_frame(records)?
        .lazy()
        .group_by([col(SECRETARIA)])
        .agg([col(VALOR).sum()])
        .sort_by_exprs(
            [col(VALOR), col(SECRETARIA)],
            SortMultipleOptions::default(),
        )
        .collect()?;
    let secretarias = string_values(&grouped, SECRETARIA)?;
    let totals = float_values(&grouped, VALOR)?;
    debug!(groups = secretarias.len(), "aggregated débitos by secretaria");
    Ok(secretarias
        .into_iter()
        .zip(totals)
        .map(|(secretaria, total)| SecretariaTotal { secretaria, total })
        .collect())
}

/// The `n` largest fornecedores by total, keyed by name and CNPJ.
///
/// `n` is clamped to `TOP_N_MIN..=TOP_N_MAX`.
pub fn top_fornecedores(records: &[CleanRecord], n: usize) -> Result<Vec<FornecedorTotal>> {
    let n = clamp_top_n(n);
    let grouped = debitos_frame(records)?
        .lazy()
        .group_by([col(FORNECEDOR), col(CNPJ)])
        .agg([col(VALOR).sum()])
        .sort_by_exprs(
            [col(VALOR), col(FORNECEDOR), col(CNPJ)],
            SortMultipleOptions::default().with_order_descending_multi([true, false, false]),
        )
        .collect()?
        .head(Some(n));
    let fornecedores = string_values(&grouped, FORNECEDOR)?;
    let cnpjs = string_values(&grouped, CNPJ)?;
    let totals = float_values(&grouped, VALOR)?;
    Ok(fornecedores
        .into_iter()
        .zip(cnpjs)
        .zip(totals)
        .map(|((fornecedor, cnpj), total)| FornecedorTotal {
            fornecedor,
            cnpj,
            total,
        })
        .collect())
}

/// Balance per secretaria as `SALDO_LIVRE`, largest first.
pub fn saldo_by_secretaria(records: &[SaldoRecord]) -> Result<Vec<SaldoSecretaria>> {
    let grouped = saldos_frame(records)?
        .lazy()
        .group_by([col(SECRETARIA)])
        .agg([col(SALDO_BANCARIO).sum().alias(SALDO_LIVRE)])
        .sort_by_exprs(
            [col(SALDO_LIVRE), col(SECRETARIA)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;
    let secretarias = string_values(&grouped, SECRETARIA)?;
    let saldos = float_values(&grouped, SALDO_LIVRE)?;
    Ok(secretarias
        .into_iter()
        .zip(saldos)
        .map(|(secretaria, saldo_livre)| SaldoSecretaria {
            secretaria,
            saldo_livre,
        })
        .collect())
}

pub fn clamp_top_n(n: usize) -> usize {
    n.clamp(TOP_N_MIN, TOP_N_MAX)
}

fn string_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    Ok(df
        .column(name)?
        .str()?
        .into_iter()
        .map(|value| value.unwrap_or_default().to_string())
        .collect())
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(df
        .column(name)?
        .f64()?
        .into_iter()
        .map(|value| round_cents(value.unwrap_or(0.0)))
        .collect())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn debito(secretaria: &str, fornecedor: &str, cnpj: &str, amount: f64) -> CleanRecord {
        CleanRecord {
            row: 0,
            date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            amount,
            cnpj: cnpj.to_string(),
            secretaria: secretaria.to_string(),
            fornecedor: fornecedor.to_string(),
            occurrences: 1,
            is_outlier: false,
        }
    }

    #[test]
    fn secretaria_totals_ascending() {
        let records = vec![
            debito("SAUDE", "A", "1", 100.0),
            debito("OBRAS", "B", "2", 30.0),
            debito("SAUDE", "C", "3", 0.1),
            debito("SAUDE", "C", "3", 0.2),
        ];
        let totals = totals_by_secretaria(&records).unwrap();
        assert_eq!(
            totals,
            vec![
                SecretariaTotal {
                    secretaria: "OBRAS".to_string(),
                    total: 30.0
                },
                SecretariaTotal {
                    secretaria: "SAUDE".to_string(),
                    total: 100.3
                },
            ]
        );
    }

    #[test]
    fn top_n_is_clamped() {
        assert_eq!(clamp_top_n(0), 3);
        assert_eq!(clamp_top_n(10), 10);
        assert_eq!(clamp_top_n(500), 50);
    }

    #[test]
    fn top_fornecedores_split_by_cnpj() {
        let records = vec![
            debito("SAUDE", "ACME", "1", 10.0),
            debito("OBRAS", "ACME", "1", 15.0),
            debito("SAUDE", "ACME", "2", 40.0),
            debito("SAUDE", "BETA", "3", 5.0),
            debito("SAUDE", "GAMA", "4", 1.0),
        ];
        let top = top_fornecedores(&records, 3).unwrap();
        let keys: Vec<_> = top
            .iter()
            .map(|t| (t.fornecedor.as_str(), t.cnpj.as_str(), t.total))
            .collect();
        assert_eq!(
            keys,
            vec![("ACME", "2", 40.0), ("ACME", "1", 25.0), ("BETA", "3", 5.0)]
        );
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(totals_by_secretaria(&[]).unwrap().is_empty());
        assert!(saldo_by_secretaria(&[]).unwrap().is_empty());
    }
}
