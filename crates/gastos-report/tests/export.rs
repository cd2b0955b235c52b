use chrono::NaiveDate;
use gastos_model::{
    CanonicalField, CleanRecord, IssueKind, SaldoRecord, ValidationIssue,
};
use gastos_report::{
    ExportStyle, debito_kpis, debitos_csv_string, export_issues, saldo_by_secretaria, saldo_kpis,
    saldos_csv_string,
};
use tempfile::TempDir;

fn debitos() -> Vec<CleanRecord> {
    vec![
        CleanRecord {
            row: 0,
            date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            amount: 1234.56,
            cnpj: "12345678000190".to_string(),
            secretaria: "SAUDE".to_string(),
            fornecedor: "ACME LTDA".to_string(),
            occurrences: 1,
            is_outlier: false,
        },
        CleanRecord {
            row: 3,
            date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            amount: 98_000.0,
            cnpj: "00000000000123".to_string(),
            secretaria: "SAUDE".to_string(),
            fornecedor: String::new(),
            occurrences: 2,
            is_outlier: true,
        },
    ]
}

fn saldos() -> Vec<SaldoRecord> {
    let saldo = |conta: &str, secretaria: &str, saldo: f64| SaldoRecord {
        conta: conta.to_string(),
        nome_da_conta: "Movimento".to_string(),
        secretaria: secretaria.to_string(),
        banco: "BB".to_string(),
        tipo_recurso: "LIVRE".to_string(),
        saldo,
    };
    vec![
        saldo("1", "OBRAS", 500.0),
        saldo("2", "SAUDE", 1500.25),
        saldo("3", "OBRAS", -100.0),
    ]
}

#[test]
fn raw_debitos_csv() {
    let csv = debitos_csv_string(&debitos(), ExportStyle::Raw).unwrap();
    insta::assert_snapshot!(csv, @r"
    DATA,FORNECEDOR,CNPJ,VALOR,SECRETARIA,OCORRENCIAS,OUTLIER
    2025-01-05,ACME LTDA,12345678000190,1234.56,SAUDE,1,false
    2025-02-10,,00000000000123,98000.00,SAUDE,2,true
    ");
}

#[test]
fn display_debitos_csv() {
    let csv = debitos_csv_string(&debitos(), ExportStyle::Display).unwrap();
    insta::assert_snapshot!(csv, @r#"
    DATA,FORNECEDOR,CNPJ,VALOR,SECRETARIA,OCORRENCIAS,OUTLIER
    05/01/2025,ACME LTDA,12.345.678/0001-90,"R$ 1.234,56",SAUDE,1,false
    10/02/2025,,00.000.000/0001-23,"R$ 98.000,00",SAUDE,2,true
    "#);
}

#[test]
fn display_saldos_csv() {
    let csv = saldos_csv_string(&saldos(), ExportStyle::Display).unwrap();
    insta::assert_snapshot!(csv, @r#"
    CONTA,NOME DA CONTA,SECRETARIA,BANCO,TIPO DE RECURSO,SALDO BANCARIO
    1,Movimento,OBRAS,BB,LIVRE,"R$ 500,00"
    2,Movimento,SAUDE,BB,LIVRE,"R$ 1.500,25"
    3,Movimento,OBRAS,BB,LIVRE,"R$ -100,00"
    "#);
}

#[test]
fn kpis_count_distinct_values() {
    let kpis = debito_kpis(&debitos());
    assert_eq!(kpis.total, 99_234.56);
    assert_eq!(kpis.records, 2);
    assert_eq!(kpis.fornecedores, 1);
    assert_eq!(kpis.secretarias, 1);
    assert_eq!(kpis.outliers, 1);

    let saldo = saldo_kpis(&saldos());
    assert_eq!(saldo.total, 1900.25);
    assert_eq!(saldo.contas, 3);
    assert_eq!(saldo.secretarias, 2);
}

#[test]
fn saldo_per_secretaria_descending() {
    let grouped = saldo_by_secretaria(&saldos()).unwrap();
    let pairs: Vec<_> = grouped
        .iter()
        .map(|g| (g.secretaria.as_str(), g.saldo_livre))
        .collect();
    assert_eq!(pairs, vec![("SAUDE", 1500.25), ("OBRAS", 400.0)]);
}

#[test]
fn issues_are_written_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("issues.csv");
    let issues = vec![ValidationIssue::new(
        1,
        CanonicalField::Amount,
        IssueKind::InvalidAmount,
        "negative amount -10",
    )];
    export_issues(&path, &issues).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "row,field,kind,detail\n1,amount,invalid_amount,negative amount -10\n"
    );
}
