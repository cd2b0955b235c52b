use std::collections::BTreeMap;

use chrono::NaiveDate;
use gastos_model::CleanRecord;

type DedupeKey = (NaiveDate, i64, String, String);

fn dedupe_key(record: &CleanRecord) -> DedupeKey {
    (
        record.date,
        record.amount_cents(),
        record.cnpj.clone(),
        record.secretaria.clone(),
    )
}

/// Collapse records with identical `(date, amount, cnpj, secretaria)` into
/// the first occurrence, counting the collapsed rows in `occurrences`.
///
/// Order of the kept records is preserved and amounts are left untouched.
/// Returns the number of records removed.
pub fn dedupe_records(records: &mut Vec<CleanRecord>) -> usize {
    let before = records.len();
    let mut seen: BTreeMap<DedupeKey, usize> = BTreeMap::new();
    let mut kept: Vec<CleanRecord> = Vec::with_capacity(before);
    for record in records.drain(..) {
        let key = dedupe_key(&record);
        if let Some(&position) = seen.get(&key) {
            kept[position].occurrences += record.occurrences;
            continue;
        }
        seen.insert(key, kept.len());
        kept.push(record);
    }
    *records = kept;
    before - records.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(row: usize, amount: f64, cnpj: &str) -> CleanRecord {
        CleanRecord {
            row,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            amount,
            cnpj: cnpj.to_string(),
            secretaria: "SAUDE".to_string(),
            fornecedor: format!("F{row}"),
            occurrences: 1,
            is_outlier: false,
        }
    }

    #[test]
    fn collapses_into_first_occurrence() {
        let mut records = vec![
            record(0, 10.0, "00000000000001"),
            record(1, 20.0, "00000000000001"),
            record(2, 10.0, "00000000000001"),
            record(3, 10.0, "00000000000001"),
        ];
        assert_eq!(dedupe_records(&mut records), 2);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row, 0);
        assert_eq!(records[0].occurrences, 3);
        assert_eq!(records[0].amount, 10.0);
        assert_eq!(records[1].row, 1);
    }

    #[test]
    fn fornecedor_is_not_part_of_the_key() {
        let mut records = vec![
            record(0, 10.0, "00000000000001"),
            record(1, 10.0, "00000000000001"),
        ];
        assert_eq!(dedupe_records(&mut records), 1);
        assert_eq!(records[0].fornecedor, "F0");
    }

    #[test]
    fn distinct_cnpj_is_kept() {
        let mut records = vec![
            record(0, 10.0, "00000000000001"),
            record(1, 10.0, "00000000000002"),
        ];
        assert_eq!(dedupe_records(&mut records), 0);
    }
}
