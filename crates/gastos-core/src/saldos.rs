//! Saldos (bank balance) preparation.

use gastos_model::{CellValue, RawRow, RawTable, SaldoRecord};
use gastos_transform::parse_amount_cell;
use tracing::{debug, info, trace};

use crate::error::SaldosError;
use crate::redact::redact_value;

pub const CONTA: &str = "CONTA";
pub const NOME_DA_CONTA: &str = "NOME DA CONTA";
pub const SECRETARIA: &str = "SECRETARIA";
pub const BANCO: &str = "BANCO";
pub const TIPO_DE_RECURSO: &str = "TIPO DE RECURSO";
pub const SALDO_BANCARIO: &str = "SALDO BANCARIO";

const SALDO_COLUMNS: [&str; 6] = [
    CONTA,
    NOME_DA_CONTA,
    SECRETARIA,
    BANCO,
    TIPO_DE_RECURSO,
    SALDO_BANCARIO,
];

static EMPTY_CELL: CellValue = CellValue::Empty;

const DEBITO_COLUMNS: [&str; 5] = ["DATA", "FORNECEDOR", "CNPJ", "VALOR", "SECRETARIA"];

/// Columns every saldos upload must carry.
pub fn required_saldo_columns() -> &'static [&'static str] {
    &SALDO_COLUMNS
}

/// Columns of the débitos spreadsheet template.
pub fn required_debito_columns() -> &'static [&'static str] {
    &DEBITO_COLUMNS
}

/// Fail with every absent column when `table` lacks any of `required`.
pub fn check_required_columns(table: &RawTable, required: &[&str]) -> Result<(), SaldosError> {
    let missing = table.missing_columns(required);
    if missing.is_empty() {
        return Ok(());
    }
    Err(SaldosError::MissingColumns {
        columns: missing.into_iter().map(str::to_string).collect(),
    })
}

/// Build saldo records from an uploaded table.
///
/// With `only_livre`, rows whose resource type is not `LIVRE` are dropped.
/// Balances may be negative; values that do not parse count as zero.
pub fn prepare_saldos(
    table: &RawTable,
    only_livre: bool,
) -> Result<Vec<SaldoRecord>, SaldosError> {
    check_required_columns(table, &SALDO_COLUMNS)?;
    let mut unparsed = 0usize;
    let records: Vec<SaldoRecord> = table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let cell = row.get(SALDO_BANCARIO).unwrap_or(&EMPTY_CELL);
            let saldo = parse_amount_cell(cell).unwrap_or_else(|_| {
                if !cell.is_empty() {
                    unparsed += 1;
                    trace!(
                        row = idx,
                        value = redact_value(&cell.to_string()),
                        "unparsed saldo"
                    );
                }
                0.0
            });
            SaldoRecord {
                conta: text(row, CONTA),
                nome_da_conta: text(row, NOME_DA_CONTA),
                secretaria: text(row, SECRETARIA),
                banco: text(row, BANCO),
                tipo_recurso: text(row, TIPO_DE_RECURSO),
                saldo,
            }
        })
        .filter(|record| !only_livre || record.is_livre())
        .collect();
    debug!(unparsed, "parsed saldo balances");
    info!(
        rows = table.len(),
        records = records.len(),
        only_livre,
        "saldos prepared"
    );
    Ok(records)
}

fn text(row: &RawRow, column: &str) -> String {
    row.get(column).map(ToString::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saldos_table(rows: &[[&str; 6]]) -> RawTable {
        let mut table = RawTable::new(SALDO_COLUMNS.iter().map(|c| (*c).to_string()).collect());
        for values in rows {
            table.push_row(
                SALDO_COLUMNS
                    .iter()
                    .zip(values)
                    .map(|(column, value)| (*column, CellValue::from_text(value)))
                    .collect::<RawRow>(),
            );
        }
        table
    }

    #[test]
    fn reports_all_missing_columns() {
        let table = RawTable::new(vec!["CONTA".to_string(), "BANCO".to_string()]);
        let err = prepare_saldos(&table, false).unwrap_err();
        assert_eq!(
            err,
            SaldosError::MissingColumns {
                columns: vec![
                    "NOME DA CONTA".to_string(),
                    "SECRETARIA".to_string(),
                    "TIPO DE RECURSO".to_string(),
                    "SALDO BANCARIO".to_string(),
                ],
            }
        );
    }

    #[test]
    fn keeps_only_livre_when_asked() {
        let table = saldos_table(&[
            ["1", "Movimento", "SAUDE", "BB", " livre ", "1.000,50"],
            ["2", "Convenio", "SAUDE", "CEF", "VINCULADO", "200"],
        ]);
        let all = prepare_saldos(&table, false).unwrap();
        assert_eq!(all.len(), 2);
        let livre = prepare_saldos(&table, true).unwrap();
        assert_eq!(livre.len(), 1);
        assert_eq!(livre[0].conta, "1");
        assert_eq!(livre[0].tipo_recurso, "livre");
        assert!((livre[0].saldo - 1000.5).abs() < 1e-9);
    }

    #[test]
    fn negative_and_unparsable_balances() {
        let table = saldos_table(&[
            ["1", "A", "OBRAS", "BB", "LIVRE", "-350,25"],
            ["2", "B", "OBRAS", "BB", "LIVRE", "n/d"],
            ["3", "C", "OBRAS", "BB", "LIVRE", ""],
        ]);
        let records = prepare_saldos(&table, true).unwrap();
        assert!((records[0].saldo + 350.25).abs() < 1e-9);
        assert_eq!(records[1].saldo, 0.0);
        assert_eq!(records[2].saldo, 0.0);
    }

    #[test]
    fn debito_template_columns() {
        let table = RawTable::new(vec!["DATA".to_string(), "VALOR".to_string()]);
        let err = check_required_columns(&table, required_debito_columns()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required columns: FORNECEDOR, CNPJ, SECRETARIA"
        );
    }
}
