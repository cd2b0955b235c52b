//! Per-secretaria percentile outlier marking.

use std::collections::BTreeMap;

use gastos_model::CleanRecord;

/// Smallest group that can contain an outlier.
pub const MIN_GROUP_SIZE: usize = 2;

/// Percentile of `values` with linear interpolation between closest ranks.
///
/// The rank is `percentile / 100 * (n - 1)` over the sorted values. Returns
/// `None` for an empty slice.
pub fn percentile_linear(values: &[f64], percentile: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let last = sorted.len() - 1;
    #[allow(clippy::cast_precision_loss)]
    let rank = (percentile / 100.0).clamp(0.0, 1.0) * last as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(last);
    #[allow(clippy::cast_precision_loss)]
    let fraction = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Threshold per secretaria for groups large enough to be marked.
pub fn group_thresholds(records: &[CleanRecord], percentile: f64) -> BTreeMap<String, f64> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.secretaria.as_str())
            .or_default()
            .push(record.amount);
    }
    groups
        .into_iter()
        .filter(|(_, amounts)| amounts.len() >= MIN_GROUP_SIZE)
        .filter_map(|(secretaria, amounts)| {
            percentile_linear(&amounts, percentile)
                .map(|threshold| (secretaria.to_string(), threshold))
        })
        .collect()
}

/// Set `is_outlier` on every record whose amount is strictly above its
/// secretaria's threshold. Returns the number of outliers.
pub fn mark_outliers(records: &mut [CleanRecord], percentile: f64) -> usize {
    let thresholds = group_thresholds(records, percentile);
    let mut marked = 0;
    for record in records.iter_mut() {
        record.is_outlier = thresholds
            .get(&record.secretaria)
            .is_some_and(|threshold| record.amount > *threshold);
        if record.is_outlier {
            marked += 1;
        }
    }
    marked
}
