//! Mapping engine implementation.

use std::collections::{BTreeMap, BTreeSet};

use gastos_model::{CanonicalField, ColumnMapping};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{MappingError, Result};
use crate::score::{ColumnHint, ScoringEngine};

/// Default minimum score for a fuzzy suggestion to be accepted.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.80;

/// Confidence level categories for mapping quality assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely correct",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }
}

/// Configurable thresholds for categorizing mapping confidence.
///
/// - Below `low`: no level
/// - `low` to `medium`: [`ConfidenceLevel::Low`]
/// - `medium` to `high`: [`ConfidenceLevel::Medium`]
/// - At or above `high`: [`ConfidenceLevel::High`]
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceThresholds {
    pub high: f32,
    pub medium: f32,
    pub low: f32,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.95,
            medium: 0.80,
            low: 0.60,
        }
    }
}

impl ConfidenceThresholds {
    #[must_use]
    pub fn categorize(&self, confidence: f32) -> Option<ConfidenceLevel> {
        if confidence >= self.high {
            Some(ConfidenceLevel::High)
        } else if confidence >= self.medium {
            Some(ConfidenceLevel::Medium)
        } else if confidence >= self.low {
            Some(ConfidenceLevel::Low)
        } else {
            None
        }
    }
}

/// How a field's source column was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Given by the user.
    Explicit,
    /// Normalized header equals a known synonym.
    Exact,
    /// Best Jaro-Winkler score above the minimum confidence.
    Fuzzy,
}

/// One field-to-column choice with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingSuggestion {
    pub field: CanonicalField,
    pub source_column: String,
    pub confidence: f32,
    pub kind: MatchKind,
    pub explanation: String,
}

/// Result of a mapping operation.
#[derive(Debug, Clone, Serialize)]
pub struct MappingResult {
    pub mapping: ColumnMapping,
    /// Suggestions in canonical field order.
    pub suggestions: Vec<MappingSuggestion>,
    /// Headers not used by any field, in header order.
    pub unmapped_columns: Vec<String>,
}

impl MappingResult {
    /// Required fields left without a column.
    pub fn missing_required(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.mapping.get(*field).is_none())
            .collect()
    }

    /// Number of suggestions at each confidence level.
    #[must_use]
    pub fn count_by_level(&self, thresholds: &ConfidenceThresholds) -> BTreeMap<ConfidenceLevel, usize> {
        let mut counts = BTreeMap::new();
        for suggestion in &self.suggestions {
            if let Some(level) = thresholds.categorize(suggestion.confidence) {
                *counts.entry(level).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Builds and infers [`ColumnMapping`]s for a set of headers.
#[derive(Debug, Clone)]
pub struct MappingEngine {
    scoring: ScoringEngine,
    min_confidence: f32,
}

impl Default for MappingEngine {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

impl MappingEngine {
    pub fn new(hints: BTreeMap<String, ColumnHint>) -> Self {
        Self {
            scoring: ScoringEngine::new(hints),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }

    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Add extra header spellings for a field.
    #[must_use]
    pub fn with_synonyms<I, S>(mut self, field: CanonicalField, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.scoring = self.scoring.with_synonyms(field, synonyms);
        self
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Build a mapping from `canonical key -> source column` pairs.
    ///
    /// Two fields may not share one source column.
    pub fn build<I, K, V>(raw: I) -> Result<ColumnMapping>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mapping = ColumnMapping::from_raw(raw)?;
        let mut used: BTreeMap<&str, CanonicalField> = BTreeMap::new();
        for (field, column) in mapping.entries() {
            let Some(column) = column else {
                continue;
            };
            if let Some(first) = used.insert(column, field) {
                return Err(MappingError::ColumnAlreadyUsed {
                    column: column.to_string(),
                    first: first.as_str().to_string(),
                    second: field.as_str().to_string(),
                });
            }
        }
        Ok(mapping)
    }

    /// Infer a mapping for `headers` from synonyms alone.
    pub fn infer(&self, headers: &[String]) -> MappingResult {
        self.resolve(headers, &ColumnMapping::default())
    }

    /// Keep every field of `explicit` and infer the rest from the headers it
    /// leaves unused.
    ///
    /// Exact synonym matches are taken first, in canonical field order and
    /// header order; the remaining fields go through greedy fuzzy assignment.
    pub fn resolve(&self, headers: &[String], explicit: &ColumnMapping) -> MappingResult {
        let mut state = Resolution::from_explicit(explicit);

        for field in CanonicalField::ALL {
            if state.mapping.get(field).is_some() {
                continue;
            }
            let exact = headers.iter().find(|header| {
                !state.used.contains(*header) && self.scoring.is_exact(header, field)
            });
            if let Some(header) = exact {
                debug!(field = field.as_str(), column = %header, "exact synonym match");
                state.choose(MappingSuggestion {
                    field,
                    source_column: header.clone(),
                    confidence: 1.0,
                    kind: MatchKind::Exact,
                    explanation: "exact synonym".to_string(),
                });
            }
        }

        let open_fields: Vec<CanonicalField> = CanonicalField::ALL
            .into_iter()
            .filter(|field| state.mapping.get(*field).is_none())
            .collect();
        let open_columns: Vec<String> = headers
            .iter()
            .filter(|header| !state.used.contains(*header))
            .cloned()
            .collect();
        for suggestion in self
            .scoring
            .suggest_all(&open_columns, &open_fields, self.min_confidence)
        {
            debug!(
                field = suggestion.field.as_str(),
                column = %suggestion.source_column,
                score = suggestion.score.score,
                "fuzzy match"
            );
            state.choose(MappingSuggestion {
                field: suggestion.field,
                source_column: suggestion.source_column,
                confidence: suggestion.score.score.min(1.0),
                kind: MatchKind::Fuzzy,
                explanation: suggestion.score.explain(),
            });
        }

        state.finish(headers)
    }

    /// Use `explicit` as is, without inference. Headers it does not name are
    /// reported as unmapped.
    pub fn resolve_explicit(&self, headers: &[String], explicit: &ColumnMapping) -> MappingResult {
        Resolution::from_explicit(explicit).finish(headers)
    }
}

/// Choices made so far while resolving one mapping.
struct Resolution {
    mapping: ColumnMapping,
    chosen: BTreeMap<CanonicalField, MappingSuggestion>,
    used: BTreeSet<String>,
}

impl Resolution {
    fn from_explicit(explicit: &ColumnMapping) -> Self {
        let mut state = Self {
            mapping: ColumnMapping::default(),
            chosen: BTreeMap::new(),
            used: BTreeSet::new(),
        };
        for (field, column) in explicit.entries() {
            let Some(column) = column else {
                continue;
            };
            state.choose(MappingSuggestion {
                field,
                source_column: column.to_string(),
                confidence: 1.0,
                kind: MatchKind::Explicit,
                explanation: "given by user".to_string(),
            });
        }
        state
    }

    fn choose(&mut self, suggestion: MappingSuggestion) {
        self.mapping
            .set(suggestion.field, suggestion.source_column.as_str());
        self.used.insert(suggestion.source_column.clone());
        self.chosen.insert(suggestion.field, suggestion);
    }

    fn finish(self, headers: &[String]) -> MappingResult {
        let unmapped_columns: Vec<String> = headers
            .iter()
            .filter(|header| !self.used.contains(*header))
            .cloned()
            .collect();
        let result = MappingResult {
            mapping: self.mapping,
            suggestions: self.chosen.into_values().collect(),
            unmapped_columns,
        };
        info!(
            mapped = result.suggestions.len(),
            unmapped = result.unmapped_columns.len(),
            missing_required = result.missing_required().len(),
            "column mapping resolved"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn thresholds_categorize() {
        let thresholds = ConfidenceThresholds::default();
        assert_eq!(thresholds.categorize(0.99), Some(ConfidenceLevel::High));
        assert_eq!(thresholds.categorize(0.85), Some(ConfidenceLevel::Medium));
        assert_eq!(thresholds.categorize(0.65), Some(ConfidenceLevel::Low));
        assert_eq!(thresholds.categorize(0.10), None);
    }

    #[test]
    fn build_rejects_shared_column() {
        let err = MappingEngine::build([("date", "DATA"), ("valor", "DATA")]).unwrap_err();
        assert_eq!(
            err,
            MappingError::ColumnAlreadyUsed {
                column: "DATA".to_string(),
                first: "date".to_string(),
                second: "amount".to_string(),
            }
        );
    }

    #[test]
    fn explicit_fields_take_precedence() {
        let engine = MappingEngine::default();
        let mut explicit = ColumnMapping::default();
        explicit.set(CanonicalField::Amount, "VALOR LIQUIDO");
        let result = engine.resolve(&headers(&["VALOR", "VALOR LIQUIDO", "DATA"]), &explicit);
        assert_eq!(result.mapping.amount.as_deref(), Some("VALOR LIQUIDO"));
        assert_eq!(result.mapping.date.as_deref(), Some("DATA"));
        assert_eq!(result.unmapped_columns, vec!["VALOR"]);
        assert_eq!(result.suggestions[1].kind, MatchKind::Explicit);
    }

    #[test]
    fn explicit_only_skips_inference() {
        let engine = MappingEngine::default();
        let mut explicit = ColumnMapping::default();
        explicit.set(CanonicalField::Amount, "VALOR");
        let result = engine.resolve_explicit(&headers(&["VALOR", "DATA"]), &explicit);
        assert_eq!(result.mapping.date, None);
        assert_eq!(result.unmapped_columns, vec!["DATA"]);
        assert_eq!(result.suggestions.len(), 1);
    }
}
