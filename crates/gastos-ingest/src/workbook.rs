//! Excel/ODS workbook reading via calamine.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use gastos_model::{CellValue, RawTable};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::table::table_from_grid;

/// List sheet names in workbook order.
pub fn list_sheets(path: &Path) -> Result<Vec<String>> {
    let workbook = open_workbook_auto(path).map_err(|err| IngestError::Workbook {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(workbook.sheet_names())
}

/// Read one sheet (the first when `sheet` is None) into a raw table.
///
/// Sheet names match case-insensitively.
pub fn read_workbook_table(path: &Path, sheet: Option<&str>) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).map_err(|err| IngestError::Workbook {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let names = workbook.sheet_names();
    let selected = match sheet {
        Some(wanted) => names
            .iter()
            .find(|name| name.trim().eq_ignore_ascii_case(wanted.trim()))
            .cloned()
            .ok_or_else(|| IngestError::SheetNotFound {
                sheet: wanted.to_string(),
                path: path.to_path_buf(),
                available: names.clone(),
            })?,
        None => names.first().cloned().ok_or_else(|| IngestError::Workbook {
            path: path.to_path_buf(),
            message: "workbook has no sheets".to_string(),
        })?,
    };
    debug!(path = %path.display(), sheet = %selected, "reading sheet");
    let range = workbook
        .worksheet_range(&selected)
        .map_err(|err| IngestError::Workbook {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    let mut error_cells = 0usize;
    let grid: Vec<Vec<CellValue>> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    if matches!(cell, Data::Error(_)) {
                        error_cells += 1;
                    }
                    cell_from_data(cell)
                })
                .collect()
        })
        .collect();
    if error_cells > 0 {
        warn!(sheet = %selected, error_cells, "formula error cells read as empty");
    }
    Ok(table_from_grid(grid))
}

/// Convert a calamine cell into a loosely-typed cell.
pub fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::String(text) => CellValue::from_text(text),
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Bool(value) => CellValue::Text(value.to_string()),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) => CellValue::Date(datetime.date()),
            None => CellValue::Number(value.as_f64()),
        },
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::from_text(text),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_cells() {
        assert_eq!(
            cell_from_data(&Data::String("  Saúde ".to_string())),
            CellValue::Text("Saúde".to_string())
        );
        assert_eq!(cell_from_data(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(cell_from_data(&Data::Float(1.5)), CellValue::Number(1.5));
        assert_eq!(cell_from_data(&Data::Empty), CellValue::Empty);
        assert_eq!(
            cell_from_data(&Data::DateTimeIso("2025-01-05T00:00:00".to_string())),
            CellValue::Text("2025-01-05T00:00:00".to_string())
        );
    }
}
