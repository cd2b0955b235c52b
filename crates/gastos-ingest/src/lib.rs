//! Spreadsheet ingestion for the débitos and saldos flows.
//!
//! Loads `.csv` files (delimiter sniffed, Latin-1 tolerant) and workbook
//! sheets (`.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods`) into [`RawTable`]s with
//! normalized, upper-cased headers.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use gastos_ingest::read_table;
//!
//! let table = read_table(Path::new("debitos.xlsx"), None)?;
//! println!("{} rows", table.len());
//! ```

mod delimited;
mod error;
mod table;
mod workbook;

use std::path::Path;

use gastos_model::RawTable;
use tracing::info;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use delimited::{read_csv_table, read_csv_table_with_delimiter, sniff_delimiter};
pub use table::{normalize_header, table_from_grid};
pub use workbook::{cell_from_data, list_sheets, read_workbook_table};

/// Maximum accepted input size (200 MB).
pub const MAX_FILE_SIZE: u64 = 200 * 1024 * 1024;

/// Input file kinds recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Workbook,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(Self::Workbook),
            _ => None,
        }
    }
}

/// Load a table from a CSV file or a workbook sheet.
///
/// `sheet` is ignored for CSV input.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<RawTable> {
    let format = TableFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let table = match format {
        TableFormat::Csv => read_csv_table(path)?,
        TableFormat::Workbook => {
            check_file_size(path, MAX_FILE_SIZE)?;
            read_workbook_table(path, sheet)?
        }
    };
    info!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.len(),
        "loaded table"
    );
    Ok(table)
}

/// Check that `path` exists and is at most `max_size` bytes.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

pub(crate) fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    check_file_size(path, MAX_FILE_SIZE)?;
    std::fs::read(path).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}
