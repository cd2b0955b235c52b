//! Débitos ingest pipeline and the saldos/filter logic around it.
//!
//! - **pipeline**: validation, normalization, dedup and outlier marking
//! - **dedupe**: collapse of identical débito rows
//! - **outlier**: per-secretaria percentile thresholds
//! - **saldos**: required columns and balance records
//! - **filter**: débito and saldo filters

pub mod dedupe;
mod error;
pub mod filter;
pub mod outlier;
pub mod pipeline;
mod redact;
pub mod saldos;

pub use dedupe::dedupe_records;
pub use error::{FilterError, PipelineError, Result, SaldosError};
pub use filter::{DebitoFilter, SaldoFilter, distinct_values};
pub use outlier::{MIN_GROUP_SIZE, group_thresholds, mark_outliers, percentile_linear};
pub use pipeline::{PipelineOutcome, run_pipeline};
pub use redact::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data};
pub use saldos::{
    check_required_columns, prepare_saldos, required_debito_columns, required_saldo_columns,
};
