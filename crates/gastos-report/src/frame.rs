//! Polars frames built from validated records.

use gastos_model::{CleanRecord, SaldoRecord};
use polars::prelude::{Column, DataFrame, PolarsResult};

pub const DATA: &str = "DATA";
pub const FORNECEDOR: &str = "FORNECEDOR";
pub const CNPJ: &str = "CNPJ";
pub const VALOR: &str = "VALOR";
pub const SECRETARIA: &str = "SECRETARIA";
pub const OUTLIER: &str = "OUTLIER";
pub const BANCO: &str = "BANCO";
pub const TIPO_DE_RECURSO: &str = "TIPO DE RECURSO";
pub const SALDO_BANCARIO: &str = "SALDO BANCARIO";
pub const SALDO_LIVRE: &str = "SALDO_LIVRE";

/// One row per débito; dates as ISO strings.
pub fn debitos_frame(records: &[CleanRecord]) -> PolarsResult<DataFrame> {
    let dates: Vec<String> = records.iter().map(|r| r.date.to_string()).collect();
    let fornecedores: Vec<&str> = records.iter().map(|r| r.fornecedor.as_str()).collect();
    let cnpjs: Vec<&str> = records.iter().map(|r| r.cnpj.as_str()).collect();
    let valores: Vec<f64> = records.iter().map(|r| r.amount).collect();
    let secretarias: Vec<&str> = records.iter().map(|r| r.secretaria.as_str()).collect();
    let outliers: Vec<bool> = records.iter().map(|r| r.is_outlier).collect();
    DataFrame::new(vec![
        Column::new(DATA.into(), dates),
        Column::new(FORNECEDOR.into(), fornecedores),
        Column::new(CNPJ.into(), cnpjs),
        Column::new(VALOR.into(), valores),
        Column::new(SECRETARIA.into(), secretarias),
        Column::new(OUTLIER.into(), outliers),
    ])
}

pub fn saldos_frame(records: &[SaldoRecord]) -> PolarsResult<DataFrame> {
    let secretarias: Vec<&str> = records.iter().map(|r| r.secretaria.as_str()).collect();
    let bancos: Vec<&str> = records.iter().map(|r| r.banco.as_str()).collect();
    let tipos: Vec<&str> = records.iter().map(|r| r.tipo_recurso.as_str()).collect();
    let saldos: Vec<f64> = records.iter().map(|r| r.saldo).collect();
    DataFrame::new(vec![
        Column::new(SECRETARIA.into(), secretarias),
        Column::new(BANCO.into(), bancos),
        Column::new(TIPO_DE_RECURSO.into(), tipos),
        Column::new(SALDO_BANCARIO.into(), saldos),
    ])
}
