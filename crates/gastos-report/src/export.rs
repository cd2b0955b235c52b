//! CSV export of débitos, saldos and validation issues.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use gastos_model::{CleanRecord, SaldoRecord, ValidationIssue};
use gastos_transform::format_cnpj;
use serde::Serialize;
use tracing::info;

use crate::error::{ReportError, Result};
use crate::format::{format_brl, format_date_br};

/// How values are rendered in exported files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportStyle {
    /// ISO dates, plain decimals, bare CNPJ digits.
    #[default]
    Raw,
    /// `dd/mm/yyyy`, `R$ 1.234,56`, punctuated CNPJ.
    Display,
}

#[derive(Serialize)]
struct DebitoRow<'a> {
    #[serde(rename = "DATA")]
    data: String,
    #[serde(rename = "FORNECEDOR")]
    fornecedor: &'a str,
    #[serde(rename = "CNPJ")]
    cnpj: String,
    #[serde(rename = "VALOR")]
    valor: String,
    #[serde(rename = "SECRETARIA")]
    secretaria: &'a str,
    #[serde(rename = "OCORRENCIAS")]
    ocorrencias: usize,
    #[serde(rename = "OUTLIER")]
    outlier: bool,
}

impl<'a> DebitoRow<'a> {
    fn new(record: &'a CleanRecord, style: ExportStyle) -> Self {
        let (data, cnpj, valor) = match style {
            ExportStyle::Raw => (
                record.date.to_string(),
                record.cnpj.clone(),
                format!("{:.2}", record.amount),
            ),
            ExportStyle::Display => (
                format_date_br(record.date),
                format_cnpj(&record.cnpj),
                format_brl(record.amount),
            ),
        };
        Self {
            data,
            fornecedor: &record.fornecedor,
            cnpj,
            valor,
            secretaria: &record.secretaria,
            ocorrencias: record.occurrences,
            outlier: record.is_outlier,
        }
    }
}

#[derive(Serialize)]
struct SaldoRow<'a> {
    #[serde(rename = "CONTA")]
    conta: &'a str,
    #[serde(rename = "NOME DA CONTA")]
    nome_da_conta: &'a str,
    #[serde(rename = "SECRETARIA")]
    secretaria: &'a str,
    #[serde(rename = "BANCO")]
    banco: &'a str,
    #[serde(rename = "TIPO DE RECURSO")]
    tipo_recurso: &'a str,
    #[serde(rename = "SALDO BANCARIO")]
    saldo: String,
}

#[derive(Serialize)]
struct IssueRow<'a> {
    row: usize,
    field: &'static str,
    kind: &'static str,
    detail: &'a str,
}

pub fn write_debitos_csv<W: Write>(
    writer: W,
    records: &[CleanRecord],
    style: ExportStyle,
) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for record in records {
        csv.serialize(DebitoRow::new(record, style))?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_saldos_csv<W: Write>(
    writer: W,
    records: &[SaldoRecord],
    style: ExportStyle,
) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for record in records {
        let saldo = match style {
            ExportStyle::Raw => format!("{:.2}", record.saldo),
            ExportStyle::Display => format_brl(record.saldo),
        };
        csv.serialize(SaldoRow {
            conta: &record.conta,
            nome_da_conta: &record.nome_da_conta,
            secretaria: &record.secretaria,
            banco: &record.banco,
            tipo_recurso: &record.tipo_recurso,
            saldo,
        })?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_issues_csv<W: Write>(writer: W, issues: &[ValidationIssue]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for issue in issues {
        csv.serialize(IssueRow {
            row: issue.row,
            field: issue.field.as_str(),
            kind: issue.kind.as_str(),
            detail: &issue.detail,
        })?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn debitos_csv_string(records: &[CleanRecord], style: ExportStyle) -> Result<String> {
    let mut buffer = Vec::new();
    write_debitos_csv(&mut buffer, records, style)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn saldos_csv_string(records: &[SaldoRecord], style: ExportStyle) -> Result<String> {
    let mut buffer = Vec::new();
    write_saldos_csv(&mut buffer, records, style)?;
    Ok(String::from_utf8(buffer)?)
}

/// Write débitos to `path`, replacing any existing file.
pub fn export_debitos(path: &Path, records: &[CleanRecord], style: ExportStyle) -> Result<()> {
    let file = create(path)?;
    write_debitos_csv(file, records, style)?;
    info!(path = %path.display(), records = records.len(), "exported débitos");
    Ok(())
}

/// Write saldos to `path`, replacing any existing file.
pub fn export_saldos(path: &Path, records: &[SaldoRecord], style: ExportStyle) -> Result<()> {
    let file = create(path)?;
    write_saldos_csv(file, records, style)?;
    info!(path = %path.display(), records = records.len(), "exported saldos");
    Ok(())
}

/// Write validation issues to `path`, replacing any existing file.
pub fn export_issues(path: &Path, issues: &[ValidationIssue]) -> Result<()> {
    let file = create(path)?;
    write_issues_csv(file, issues)?;
    info!(path = %path.display(), issues = issues.len(), "exported issues");
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
