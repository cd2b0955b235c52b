//! CLI argument definitions for the gastos reporter.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use gastos_model::DEFAULT_DATE_FORMATS;
use gastos_report::{ExportStyle, TOP_N_DEFAULT};
use gastos_transform::parse_date;

#[derive(Parser)]
#[command(
    name = "gastos",
    version,
    about = "Municipal débitos and saldos reporting",
    long_about = "Validate, summarize and export municipal spending spreadsheets.\n\n\
                  Débitos uploads are mapped to DATA, VALOR, CNPJ, SECRETARIA and\n\
                  FORNECEDOR, validated, deduplicated and annotated with outliers.\n\
                  Saldos uploads are summed per secretaria."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include cell values in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// TOML file with [pipeline] and [mapping] tables.
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a débitos spreadsheet and report totals.
    Debitos(DebitosArgs),

    /// Summarize a saldos spreadsheet per secretaria.
    Saldos(SaldosArgs),

    /// Show the column mapping inferred for a débitos spreadsheet.
    Map(MapArgs),

    /// List the sheets of a workbook.
    Sheets(SheetsArgs),
}

#[derive(Parser)]
pub struct InputArgs {
    /// Spreadsheet to read (.csv, .xlsx, .xls, .xlsm, .xlsb, .ods).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Workbook sheet to read (default: first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,
}

#[derive(Parser)]
pub struct MappingArgs {
    /// Map a canonical field to a source column, e.g. `--map valor="VALOR PAGO"`.
    #[arg(long = "map", value_name = "FIELD=COLUMN")]
    pub map: Vec<String>,

    /// Use only explicit mappings; do not infer the remaining fields.
    #[arg(long = "no-infer")]
    pub no_infer: bool,

    /// Minimum score for a fuzzy header match.
    #[arg(long = "min-confidence", value_name = "SCORE", default_value_t = 0.80)]
    pub min_confidence: f32,
}

#[derive(Parser)]
pub struct DebitosArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Accepted date format (chrono syntax); repeat to accept several.
    #[arg(long = "date-format", value_name = "FORMAT")]
    pub date_formats: Vec<String>,

    /// Percentile above which a débito is an outlier within its secretaria.
    #[arg(long = "percentile", value_name = "P")]
    pub percentile: Option<f64>,

    /// Collapse identical (date, amount, cnpj, secretaria) rows.
    #[arg(long = "dedupe")]
    pub dedupe: bool,

    /// Keep débitos on or after this date.
    #[arg(long = "from", value_name = "DATE", value_parser = parse_date_arg)]
    pub from: Option<NaiveDate>,

    /// Keep débitos on or before this date.
    #[arg(long = "to", value_name = "DATE", value_parser = parse_date_arg)]
    pub to: Option<NaiveDate>,

    /// Keep only these secretarias; repeatable.
    #[arg(long = "secretaria", value_name = "NAME")]
    pub secretarias: Vec<String>,

    /// Keep only these fornecedores; repeatable.
    #[arg(long = "fornecedor", value_name = "NAME")]
    pub fornecedores: Vec<String>,

    /// Keep only these CNPJs (any punctuation); repeatable.
    #[arg(long = "cnpj", value_name = "CNPJ")]
    pub cnpjs: Vec<String>,

    /// Keep fornecedores whose name contains this text (case-insensitive).
    #[arg(long = "busca", value_name = "TEXT")]
    pub fornecedor_contains: Option<String>,

    /// Minimum amount.
    #[arg(long = "min-valor", value_name = "AMOUNT")]
    pub min_amount: Option<f64>,

    /// Maximum amount.
    #[arg(long = "max-valor", value_name = "AMOUNT")]
    pub max_amount: Option<f64>,

    /// Number of fornecedores in the ranking (3 to 50).
    #[arg(long = "top", value_name = "N", default_value_t = TOP_N_DEFAULT)]
    pub top: usize,

    /// Write the filtered débitos to a CSV file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write validation issues to a CSV file.
    #[arg(long = "issues-output", value_name = "PATH")]
    pub issues_output: Option<PathBuf>,

    /// Value rendering in exported files.
    #[arg(long = "style", value_enum, default_value = "raw")]
    pub style: ExportStyleArg,

    /// Exit with status 2 when any validation issue is found.
    #[arg(long = "fail-on-issues")]
    pub fail_on_issues: bool,
}

#[derive(Parser)]
pub struct SaldosArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Include every resource type, not only LIVRE.
    #[arg(long = "all-resources")]
    pub all_resources: bool,

    /// Keep only these secretarias; repeatable.
    #[arg(long = "secretaria", value_name = "NAME")]
    pub secretarias: Vec<String>,

    /// Keep only these banks; repeatable.
    #[arg(long = "banco", value_name = "NAME")]
    pub bancos: Vec<String>,

    /// Keep only these resource types; repeatable.
    #[arg(long = "tipo", value_name = "TYPE")]
    pub tipos: Vec<String>,

    /// Write the filtered saldos to a CSV file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Value rendering in exported files.
    #[arg(long = "style", value_enum, default_value = "raw")]
    pub style: ExportStyleArg,
}

#[derive(Parser)]
pub struct MapArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Print the mapping as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct SheetsArgs {
    /// Workbook to inspect.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportStyleArg {
    Raw,
    Display,
}

impl From<ExportStyleArg> for ExportStyle {
    fn from(value: ExportStyleArg) -> Self {
        match value {
            ExportStyleArg::Raw => ExportStyle::Raw,
            ExportStyleArg::Display => ExportStyle::Display,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value, DEFAULT_DATE_FORMATS)
        .ok_or_else(|| format!("'{value}' is not a date (use YYYY-MM-DD or DD/MM/YYYY)"))
}
