use std::collections::BTreeSet;

use gastos_model::{CleanRecord, SaldoRecord};
use gastos_transform::round_cents;
use serde::Serialize;

/// Headline numbers of the débitos view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DebitoKpis {
    pub total: f64,
    pub records: usize,
    pub fornecedores: usize,
    pub secretarias: usize,
    pub outliers: usize,
}

/// Headline numbers of the saldos view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SaldoKpis {
    pub total: f64,
    pub contas: usize,
    pub secretarias: usize,
}

pub fn debito_kpis(records: &[CleanRecord]) -> DebitoKpis {
    DebitoKpis {
        total: round_cents(records.iter().map(|r| r.amount).sum()),
        records: records.len(),
        fornecedores: distinct(records.iter().map(|r| r.fornecedor.as_str())),
        secretarias: distinct(records.iter().map(|r| r.secretaria.as_str())),
        outliers: records.iter().filter(|r| r.is_outlier).count(),
    }
}

pub fn saldo_kpis(records: &[SaldoRecord]) -> SaldoKpis {
    SaldoKpis {
        total: round_cents(records.iter().map(|r| r.saldo).sum()),
        contas: records.len(),
        secretarias: distinct(records.iter().map(|r| r.secretaria.as_str())),
    }
}

/// Distinct non-blank values.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values
        .filter(|value| !value.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .len()
}
