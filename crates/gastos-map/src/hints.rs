use std::collections::BTreeMap;

use gastos_model::{DEFAULT_DATE_FORMATS, RawTable};
use gastos_transform::{parse_amount_cell, parse_date_cell};

use crate::score::ColumnHint;

/// Rows sampled per column when building hints.
const HINT_SAMPLE_ROWS: usize = 200;

/// Build per-column value hints from the first rows of a table.
pub fn build_column_hints(table: &RawTable) -> BTreeMap<String, ColumnHint> {
    let sample = &table.rows[..table.rows.len().min(HINT_SAMPLE_ROWS)];
    let mut hints = BTreeMap::new();
    for header in &table.headers {
        let mut filled = 0usize;
        let mut numeric = 0usize;
        let mut dates = 0usize;
        for row in sample {
            let Some(cell) = row.get(header) else {
                continue;
            };
            if cell.is_empty() {
                continue;
            }
            filled += 1;
            if parse_amount_cell(cell).is_ok() {
                numeric += 1;
            }
            if parse_date_cell(cell, DEFAULT_DATE_FORMATS).is_ok() {
                dates += 1;
            }
        }
        let hint = if sample.is_empty() {
            ColumnHint {
                null_ratio: 1.0,
                ..ColumnHint::default()
            }
        } else {
            ColumnHint {
                numeric_ratio: ratio(numeric, filled),
                date_ratio: ratio(dates, filled),
                null_ratio: 1.0 - ratio(filled, sample.len()),
            }
        };
        hints.insert(header.clone(), hint);
    }
    hints
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use gastos_model::{CellValue, RawRow};

    use super::*;

    #[test]
    fn ratios_reflect_sampled_values() {
        let mut table = RawTable::new(vec!["DATA".to_string(), "VALOR".to_string()]);
        for (date, value) in [("05/01/2025", "1.234,56"), ("xx", "10"), ("", "abc")] {
            table.push_row(RawRow::from_iter([
                ("DATA", CellValue::from_text(date)),
                ("VALOR", CellValue::from_text(value)),
            ]));
        }
        let hints = build_column_hints(&table);
        let data = &hints["DATA"];
        assert!((data.date_ratio - 0.5).abs() < 1e-9);
        assert!((data.null_ratio - 1.0 / 3.0).abs() < 1e-9);
        let valor = &hints["VALOR"];
        assert!((valor.numeric_ratio - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_table_has_neutral_hints() {
        let table = RawTable::new(vec!["DATA".to_string()]);
        let hints = build_column_hints(&table);
        assert!((hints["DATA"].null_ratio - 1.0).abs() < 1e-9);
    }
}
