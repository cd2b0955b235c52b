//! Shared data model for the débitos and saldos reporting flows.
//!
//! - **cell**: loosely-typed spreadsheet cells and raw tables
//! - **field**: canonical débito fields
//! - **mapping**: canonical field to source column mapping
//! - **record**: validated débito records
//! - **issue**: validation issues collected by the pipeline
//! - **options**: pipeline configuration
//! - **saldo**: bank balance records

pub mod cell;
pub mod error;
pub mod field;
pub mod issue;
pub mod mapping;
pub mod options;
pub mod record;
pub mod saldo;

pub use cell::{CellValue, RawRow, RawTable};
pub use error::{GastosError, Result};
pub use field::CanonicalField;
pub use issue::{IssueKind, IssueSummary, ValidationIssue};
pub use mapping::ColumnMapping;
pub use options::{DEFAULT_DATE_FORMATS, DEFAULT_OUTLIER_PERCENTILE, PipelineOptions};
pub use record::CleanRecord;
pub use saldo::SaldoRecord;
