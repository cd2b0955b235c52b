//! Building `RawTable`s from parsed cell grids.

use std::collections::BTreeMap;

use gastos_model::{CellValue, RawRow, RawTable};

/// Trim, drop BOM, collapse inner whitespace and upper-case a header.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Make header names unique by suffixing repeats with `.1`, `.2`, ...
/// Blank headers become `UNNAMED: <index>`.
fn unique_headers(raw: &[String]) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    raw.iter()
        .enumerate()
        .map(|(idx, header)| {
            let base = if header.is_empty() {
                format!("UNNAMED: {idx}")
            } else {
                header.clone()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

/// Build a table from a grid: the first non-blank row is the header, fully
/// blank data rows are skipped and short rows are padded with `Empty`.
pub fn table_from_grid(grid: Vec<Vec<CellValue>>) -> RawTable {
    let mut rows = grid
        .into_iter()
        .filter(|row| !row.iter().all(CellValue::is_empty));
    let Some(header_row) = rows.next() else {
        return RawTable::default();
    };
    let raw_headers: Vec<String> = header_row
        .iter()
        .map(|cell| normalize_header(&cell.to_string()))
        .collect();
    let headers = unique_headers(&raw_headers);
    let mut table = RawTable::new(headers.clone());
    for cells in rows {
        let mut row = RawRow::new();
        let mut cells = cells.into_iter();
        for header in &headers {
            row.insert(header.clone(), cells.next().unwrap_or(CellValue::Empty));
        }
        table.push_row(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::from_text(value)
    }

    #[test]
    fn headers_are_trimmed_and_uppercased() {
        assert_eq!(normalize_header("  nome   da conta "), "NOME DA CONTA");
        assert_eq!(normalize_header("\u{feff}Data"), "DATA");
    }

    #[test]
    fn duplicate_and_blank_headers_are_disambiguated() {
        let table = table_from_grid(vec![vec![
            text("valor"),
            text("Valor"),
            CellValue::Empty,
            text("x"),
        ]]);
        assert_eq!(table.headers, vec!["VALOR", "VALOR.1", "UNNAMED: 2", "X"]);
    }

    #[test]
    fn skips_blank_rows_and_pads_short_rows() {
        let table = table_from_grid(vec![
            vec![CellValue::Empty, CellValue::Empty],
            vec![text("A"), text("B")],
            vec![text("1")],
            vec![CellValue::Empty, text("  ")],
            vec![text("2"), text("3")],
        ]);
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get("B"), Some(&CellValue::Empty));
        assert_eq!(table.rows[1].text("B"), "3");
    }

    #[test]
    fn empty_grid_gives_empty_table() {
        let table = table_from_grid(Vec::new());
        assert!(table.headers.is_empty());
        assert!(table.is_empty());
    }
}
