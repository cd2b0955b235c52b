//! Débitos ingest pipeline.
//!
//! Turns a [`RawTable`] into validated [`CleanRecord`]s in six ordered steps,
//! each run over every row before the next starts:
//!
//! 1. **Field extraction** - resolve mapped columns, report missing ones
//! 2. **Date validation** - parse under the configured formats
//! 3. **Amount validation** - plain or BRL text, non-negative, cents
//! 4. **CNPJ normalization** - digits only, zero-padded to 14
//! 5. **Deduplication** - optional collapse of identical rows
//! 6. **Outlier marking** - per-secretaria percentile threshold
//!
//! Cell problems become [`ValidationIssue`]s and never abort the run. Every
//! row is checked in steps 2 to 4 even after an earlier step rejected it, so
//! the issue list reports all problems of a row at once.

use chrono::NaiveDate;
use gastos_model::{
    CanonicalField, CellValue, CleanRecord, ColumnMapping, IssueKind, IssueSummary,
    PipelineOptions, RawTable, ValidationIssue,
};
use gastos_transform::{normalize_cnpj_cell, parse_date_cell, parse_non_negative_amount};
use tracing::{debug, info, info_span, trace, warn};

use crate::dedupe::dedupe_records;
use crate::error::{PipelineError, Result};
use crate::outlier::mark_outliers;
use crate::redact::redact_value;

static EMPTY_CELL: CellValue = CellValue::Empty;

const FIELD_COUNT: usize = CanonicalField::ALL.len();

/// Everything produced by one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutcome {
    /// Surviving records in source row order.
    pub records: Vec<CleanRecord>,
    /// Issues ordered by step, then row, then field.
    pub issues: Vec<ValidationIssue>,
    pub input_rows: usize,
    /// Rows excluded by date, amount or CNPJ validation.
    pub rejected_rows: usize,
    /// Rows folded into an earlier identical record.
    pub duplicates_collapsed: usize,
}

impl PipelineOutcome {
    pub fn issue_summary(&self) -> IssueSummary {
        IssueSummary::from_issues(&self.issues)
    }

    pub fn outlier_count(&self) -> usize {
        self.records.iter().filter(|record| record.is_outlier).count()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// A row on its way through validation.
struct Candidate<'a> {
    row: usize,
    cells: [&'a CellValue; FIELD_COUNT],
    date: Option<NaiveDate>,
    amount: Option<f64>,
    cnpj: Option<String>,
    rejected: bool,
}

impl<'a> Candidate<'a> {
    fn cell(&self, field: CanonicalField) -> &'a CellValue {
        self.cells[field as usize]
    }

    fn into_record(self) -> Option<CleanRecord> {
        if self.rejected {
            return None;
        }
        Some(CleanRecord {
            row: self.row,
            date: self.date?,
            amount: self.amount?,
            cnpj: self.cnpj?,
            secretaria: self.cells[CanonicalField::Secretaria as usize].to_string(),
            fornecedor: self.cells[CanonicalField::Fornecedor as usize].to_string(),
            occurrences: 1,
            is_outlier: false,
        })
    }
}

/// Run the débitos pipeline over `table`.
///
/// Fails only on invalid `options` or on an empty `mapping` with rows to
/// process. An empty table yields an empty outcome.
pub fn run_pipeline(
    table: &RawTable,
    mapping: &ColumnMapping,
    options: &PipelineOptions,
) -> Result<PipelineOutcome> {
    options.validate()?;
    let input_rows = table.len();
    let span = info_span!("debitos_pipeline", rows = input_rows);
    let _guard = span.enter();

    if input_rows == 0 {
        debug!("empty input");
        return Ok(PipelineOutcome::default());
    }
    if mapping.is_empty() {
        return Err(PipelineError::EmptyMapping);
    }

    let mut issues = Vec::new();
    let mut candidates = extract_fields(table, mapping, &mut issues);
    validate_dates(&mut candidates, &options.date_formats, &mut issues);
    validate_amounts(&mut candidates, &mut issues);
    normalize_cnpjs(&mut candidates, &mut issues);

    let rejected_rows = candidates.iter().filter(|c| c.rejected).count();
    let mut records: Vec<CleanRecord> = candidates
        .into_iter()
        .filter_map(Candidate::into_record)
        .collect();

    let duplicates_collapsed = if options.dedupe {
        let collapsed = dedupe_records(&mut records);
        debug!(collapsed, "deduplicated records");
        collapsed
    } else {
        0
    };

    let outliers = mark_outliers(&mut records, options.outlier_percentile);
    debug!(
        outliers,
        percentile = options.outlier_percentile,
        "marked outliers"
    );

    info!(
        input_rows,
        records = records.len(),
        rejected_rows,
        duplicates_collapsed,
        issues = issues.len(),
        "pipeline complete"
    );

    Ok(PipelineOutcome {
        records,
        issues,
        input_rows,
        rejected_rows,
        duplicates_collapsed,
    })
}

/// Step 1: look up each field's source column for every row.
fn extract_fields<'a>(
    table: &'a RawTable,
    mapping: &ColumnMapping,
    issues: &mut Vec<ValidationIssue>,
) -> Vec<Candidate<'a>> {
    let mut columns: [Option<&str>; FIELD_COUNT] = [None; FIELD_COUNT];
    let mut missing: Vec<(CanonicalField, String)> = Vec::new();
    for field in CanonicalField::ALL {
        match mapping.get(field) {
            Some(column) if table.has_column(column) => columns[field as usize] = Some(column),
            Some(column) if field.is_required() => {
                missing.push((field, format!("column '{column}' not found")));
            }
            Some(column) => {
                debug!(field = field.as_str(), column, "optional column not found");
            }
            None if field.is_required() => missing.push((field, "field not mapped".to_string())),
            None => {}
        }
    }
    for (field, detail) in &missing {
        warn!(field = field.as_str(), "{detail}");
    }

    let mut candidates = Vec::with_capacity(table.len());
    for (row, raw) in table.rows.iter().enumerate() {
        for (field, detail) in &missing {
            issues.push(ValidationIssue::new(
                row,
                *field,
                IssueKind::MissingColumn,
                detail.as_str(),
            ));
        }
        let mut cells = [&EMPTY_CELL; FIELD_COUNT];
        for (slot, column) in cells.iter_mut().zip(columns) {
            if let Some(cell) = column.and_then(|column| raw.get(column)) {
                *slot = cell;
            }
        }
        candidates.push(Candidate {
            row,
            cells,
            date: None,
            amount: None,
            cnpj: None,
            rejected: false,
        });
    }
    debug!(
        rows = candidates.len(),
        missing_fields = missing.len(),
        "extracted fields"
    );
    candidates
}

/// Step 2.
fn validate_dates(
    candidates: &mut [Candidate<'_>],
    formats: &[String],
    issues: &mut Vec<ValidationIssue>,
) {
    let before = issues.len();
    for candidate in candidates.iter_mut() {
        let cell = candidate.cell(CanonicalField::Date);
        match parse_date_cell(cell, formats) {
            Ok(date) => candidate.date = Some(date),
            Err(error) => reject(
                candidate,
                CanonicalField::Date,
                IssueKind::InvalidDate,
                &error.to_string(),
                issues,
            ),
        }
    }
    debug!(invalid = issues.len() - before, "validated dates");
}

/// Step 3.
fn validate_amounts(candidates: &mut [Candidate<'_>], issues: &mut Vec<ValidationIssue>) {
    let before = issues.len();
    for candidate in candidates.iter_mut() {
        let cell = candidate.cell(CanonicalField::Amount);
        match parse_non_negative_amount(cell) {
            Ok(amount) => candidate.amount = Some(amount),
            Err(error) => reject(
                candidate,
                CanonicalField::Amount,
                IssueKind::InvalidAmount,
                &error.to_string(),
                issues,
            ),
        }
    }
    debug!(invalid = issues.len() - before, "validated amounts");
}

/// Step 4.
fn normalize_cnpjs(candidates: &mut [Candidate<'_>], issues: &mut Vec<ValidationIssue>) {
    let before = issues.len();
    for candidate in candidates.iter_mut() {
        let cell = candidate.cell(CanonicalField::Cnpj);
        match normalize_cnpj_cell(cell) {
            Ok(cnpj) => candidate.cnpj = Some(cnpj),
            Err(error) => reject(
                candidate,
                CanonicalField::Cnpj,
                IssueKind::InvalidCnpj,
                &error.to_string(),
                issues,
            ),
        }
    }
    debug!(invalid = issues.len() - before, "normalized cnpjs");
}

fn reject(
    candidate: &mut Candidate<'_>,
    field: CanonicalField,
    kind: IssueKind,
    detail: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    trace!(
        row = candidate.row,
        field = field.as_str(),
        value = redact_value(&candidate.cell(field).to_string()),
        kind = kind.as_str(),
        "rejected cell"
    );
    candidate.rejected = true;
    issues.push(ValidationIssue::new(candidate.row, field, kind, detail));
}

#[cfg(test)]
mod tests {
    use gastos_model::RawRow;

    use super::*;

    fn table(rows: &[[&str; 4]]) -> RawTable {
        let headers = ["date", "amount", "cnpj", "secretaria"];
        let mut table = RawTable::new(headers.iter().map(|h| (*h).to_string()).collect());
        for values in rows {
            table.push_row(
                headers
                    .iter()
                    .zip(values)
                    .map(|(header, value)| (*header, CellValue::from_text(value)))
                    .collect::<RawRow>(),
            );
        }
        table
    }

    #[test]
    fn every_step_reports_on_every_row() {
        let input = table(&[["nope", "-1", "123456789012345", "SAUDE"]]);
        let outcome =
            run_pipeline(&input, &ColumnMapping::identity(), &PipelineOptions::default()).unwrap();
        let kinds: Vec<_> = outcome.issues.iter().map(|issue| issue.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::InvalidDate,
                IssueKind::InvalidAmount,
                IssueKind::InvalidCnpj
            ]
        );
        assert_eq!(outcome.rejected_rows, 1);
        assert!(outcome.records.is_empty());
    }

    #[test]
    fn detail_names_the_offending_value() {
        let input = table(&[["2025-01-05", "abc", "1", "SAUDE"]]);
        let outcome =
            run_pipeline(&input, &ColumnMapping::identity(), &PipelineOptions::default()).unwrap();
        assert_eq!(outcome.issues[0].detail, "'abc' is not a number");
    }

    #[test]
    fn absent_optional_column_is_not_an_issue() {
        let input = table(&[["2025-01-05", "10", "1", "SAUDE"]]);
        let mut mapping = ColumnMapping::identity();
        mapping.set(CanonicalField::Fornecedor, "FORNECEDOR");
        let outcome = run_pipeline(&input, &mapping, &PipelineOptions::default()).unwrap();
        assert!(outcome.is_clean());
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].fornecedor, "");
    }

    #[test]
    fn invalid_options_are_fatal() {
        let input = table(&[["2025-01-05", "1", "1", "SAUDE"]]);
        let options = PipelineOptions::default().with_outlier_percentile(0.0);
        let err = run_pipeline(&input, &ColumnMapping::identity(), &options).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidOptions(_)));
    }
}
