//! Delimited text (CSV) reading.

mod delimiter;
mod reader;

pub use delimiter::sniff_delimiter;
pub use reader::{read_csv_table, read_csv_table_with_delimiter};
