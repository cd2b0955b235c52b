//! CSV file reading with delimiter sniffing.

use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1252;
use gastos_model::{CellValue, RawTable};
use tracing::debug;

use super::delimiter::sniff_delimiter;
use crate::error::{IngestError, Result};
use crate::read_file_bytes;
use crate::table::table_from_grid;

/// Bytes inspected when sniffing the delimiter.
const SNIFF_BYTES: usize = 64 * 1024;

/// Read a CSV file into a raw table, guessing the delimiter.
///
/// Fields that are not valid UTF-8 are decoded as Windows-1252, the Latin-1
/// superset used by Excel exports on Brazilian Windows installs.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let bytes = read_file_bytes(path)?;
    let delimiter = sniff_delimiter(&bytes[..bytes.len().min(SNIFF_BYTES)]);
    debug!(path = %path.display(), delimiter = %char::from(delimiter), "sniffed delimiter");
    parse_csv_bytes(path, &bytes, delimiter)
}

/// Read a CSV file with an explicit delimiter.
pub fn read_csv_table_with_delimiter(path: &Path, delimiter: u8) -> Result<RawTable> {
    let bytes = read_file_bytes(path)?;
    parse_csv_bytes(path, &bytes, delimiter)
}

fn parse_csv_bytes(path: &Path, bytes: &[u8], delimiter: u8) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);
    let mut grid = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<CellValue> = record
            .iter()
            .map(|field| CellValue::from_text(&decode_field(field)))
            .collect();
        grid.push(row);
    }
    Ok(table_from_grid(grid))
}

fn decode_field(field: &[u8]) -> String {
    match std::str::from_utf8(field) {
        Ok(text) => text.to_string(),
        Err(_) => WINDOWS_1252.decode_without_bom_handling(field).0.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_fields_are_decoded() {
        assert_eq!(decode_field(b"Sa\xfade"), "Saúde");
        assert_eq!(decode_field("Educação".as_bytes()), "Educação");
        assert_eq!(decode_field(b"\x93Obras\x94"), "\u{201c}Obras\u{201d}");
    }
}
