//! Tests for gastos-model types.

use chrono::NaiveDate;
use gastos_model::{
    CanonicalField, CellValue, CleanRecord, ColumnMapping, IssueKind, PipelineOptions, RawRow,
    ValidationIssue,
};

#[test]
fn cell_value_serializes_tagged() {
    let cell = CellValue::Date(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
    let json = serde_json::to_string(&cell).expect("serialize cell");
    assert_eq!(json, r#"{"kind":"Date","value":"2025-01-05"}"#);
    let round: CellValue = serde_json::from_str(&json).expect("deserialize cell");
    assert_eq!(round, cell);
}

#[test]
fn issue_kind_uses_snake_case_names() {
    let issue = ValidationIssue::new(1, CanonicalField::Amount, IssueKind::InvalidAmount, "-5");
    let json = serde_json::to_value(&issue).expect("serialize issue");
    assert_eq!(json["kind"], "invalid_amount");
    assert_eq!(json["field"], "amount");
    assert_eq!(json["row"], 1);
}

#[test]
fn options_deserialize_with_defaults() {
    let options: PipelineOptions =
        serde_json::from_str(r#"{"dedupe": true}"#).expect("deserialize options");
    assert!(options.dedupe);
    assert_eq!(options.outlier_percentile, 95.0);
    assert!(!options.date_formats.is_empty());
}

#[test]
fn options_reject_unknown_keys() {
    let result: Result<PipelineOptions, _> = serde_json::from_str(r#"{"dedup": true}"#);
    assert!(result.is_err());
}

#[test]
fn mapping_skips_unset_fields_when_serialized() {
    let mapping = ColumnMapping::from_raw([("cnpj", "CNPJ/CPF")]).unwrap();
    let json = serde_json::to_string(&mapping).expect("serialize mapping");
    assert_eq!(json, r#"{"cnpj":"CNPJ/CPF"}"#);
}

#[test]
fn raw_row_text_renders_missing_as_empty() {
    let row: RawRow = [
        ("VALOR", CellValue::Number(10.0)),
        ("SECRETARIA", CellValue::Text("Saúde".to_string())),
    ]
    .into_iter()
    .collect();
    assert_eq!(row.text("VALOR"), "10");
    assert_eq!(row.text("SECRETARIA"), "Saúde");
    assert_eq!(row.text("CNPJ"), "");
}

#[test]
fn amount_cents_rounds() {
    let record = CleanRecord {
        row: 0,
        date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
        amount: 10.1,
        cnpj: "00000000000123".to_string(),
        secretaria: "A".to_string(),
        fornecedor: String::new(),
        occurrences: 1,
        is_outlier: false,
    };
    assert_eq!(record.amount_cents(), 1010);
}
