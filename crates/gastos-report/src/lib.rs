//! Reporting for the débitos and saldos flows.
//!
//! - **KPIs**: headline totals and distinct counts
//! - **Aggregations**: polars group-bys per secretaria and fornecedor
//! - **Formatting**: BRL amounts, Brazilian dates, Latin-1 safe text
//! - **Export**: CSV files in raw or display style

mod aggregate;
mod error;
mod export;
pub mod format;
pub mod frame;
mod kpi;

pub use aggregate::{
    FornecedorTotal, SaldoSecretaria, SecretariaTotal, TOP_N_DEFAULT, TOP_N_MAX, TOP_N_MIN,
    clamp_top_n, saldo_by_secretaria, top_fornecedores, totals_by_secretaria,
};
pub use error::{ReportError, Result};
pub use export::{
    ExportStyle, debitos_csv_string, export_debitos, export_issues, export_saldos,
    saldos_csv_string, write_debitos_csv, write_issues_csv, write_saldos_csv,
};
pub use format::{format_brl, format_date_br, to_latin1_text};
pub use frame::{debitos_frame, saldos_frame};
pub use kpi::{DebitoKpis, SaldoKpis, debito_kpis, saldo_kpis};
