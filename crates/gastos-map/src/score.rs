//! Fuzzy matching and scoring for column-to-field mapping.
//!
//! Uses Jaro-Winkler similarity against every known synonym of a field as the
//! base, with a penalty when sampled cell values do not look like the field's
//! type.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use gastos_model::CanonicalField;
use rapidfuzz::distance::jaro_winkler;
use serde::{Deserialize, Serialize};

use crate::patterns::build_field_patterns;
use crate::utils::normalize_text;

const TYPE_MISMATCH_PENALTY: f32 = 0.85;
const TYPE_RATIO_MIN: f64 = 0.5;

/// Observed characteristics of a source column's values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnHint {
    /// Share of non-empty cells that parse as amounts.
    pub numeric_ratio: f64,
    /// Share of non-empty cells that parse as dates.
    pub date_ratio: f64,
    /// Share of empty cells.
    pub null_ratio: f64,
}

/// Score for a single column-field pair.
#[derive(Debug, Clone)]
pub struct ColumnScore {
    /// Final confidence score (0.0 to 1.0).
    pub score: f32,
    /// Breakdown of score components.
    pub explanation: Vec<ScoreComponent>,
}

impl ColumnScore {
    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        self.explanation
            .iter()
            .map(|c| format!("{}: {:.0}%", c.name, c.value * 100.0))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A component contributing to the final score.
#[derive(Debug, Clone)]
pub struct ScoreComponent {
    pub name: &'static str,
    /// Component value (negative for penalties).
    pub value: f32,
    pub description: String,
}

/// A suggested mapping from column to field.
#[derive(Debug, Clone)]
pub struct Suggestion {
    pub source_column: String,
    pub field: CanonicalField,
    pub score: ColumnScore,
}

/// Engine for scoring column-to-field matches.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    patterns: BTreeMap<CanonicalField, Vec<String>>,
    hints: BTreeMap<String, ColumnHint>,
}

impl ScoringEngine {
    pub fn new(hints: BTreeMap<String, ColumnHint>) -> Self {
        Self {
            patterns: build_field_patterns(),
            hints,
        }
    }

    /// Add extra header spellings for a field.
    pub fn with_synonyms<I, S>(mut self, field: CanonicalField, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.patterns.entry(field).or_default();
        for synonym in synonyms {
            let normalized = normalize_text(synonym.as_ref());
            if !normalized.is_empty() && !entry.contains(&normalized) {
                entry.push(normalized);
            }
        }
        self
    }

    /// Whether the column's normalized header equals a known synonym of `field`.
    pub fn is_exact(&self, column: &str, field: CanonicalField) -> bool {
        let normalized = normalize_text(column);
        self.patterns
            .get(&field)
            .is_some_and(|values| values.contains(&normalized))
    }

    /// Score a single column against a field.
    pub fn score(&self, column: &str, field: CanonicalField) -> ColumnScore {
        let mut components = Vec::new();
        let normalized = normalize_text(column);

        let (base, best) = self
            .patterns
            .get(&field)
            .into_iter()
            .flatten()
            .map(|synonym| {
                let sim = jaro_winkler::similarity(normalized.chars(), synonym.chars()) as f32;
                (sim, synonym.as_str())
            })
            .fold((0.0_f32, ""), |acc, item| if item.0 > acc.0 { item } else { acc });

        components.push(ScoreComponent {
            name: "Name similarity",
            value: base,
            description: format!("'{column}' vs '{best}'"),
        });

        let mut score = base;
        if let Some(hint) = self.hints.get(column) {
            let mismatch = match field {
                CanonicalField::Amount => hint.numeric_ratio < TYPE_RATIO_MIN,
                CanonicalField::Date => hint.date_ratio < TYPE_RATIO_MIN,
                _ => false,
            };
            if mismatch && hint.null_ratio < 1.0 {
                score *= TYPE_MISMATCH_PENALTY;
                components.push(ScoreComponent {
                    name: "Type mismatch",
                    value: TYPE_MISMATCH_PENALTY - 1.0,
                    description: format!("values do not look like {}", field.as_str()),
                });
            }
        }

        ColumnScore {
            score,
            explanation: components,
        }
    }

    /// Suggest best one-to-one mappings for the given fields.
    ///
    /// Greedy assignment by descending score; each column and field is
    /// assigned at most once. Ties go to the earlier field, then the earlier
    /// column.
    pub fn suggest_all(
        &self,
        columns: &[String],
        fields: &[CanonicalField],
        min_confidence: f32,
    ) -> Vec<Suggestion> {
        let mut candidates: Vec<(usize, usize, ColumnScore)> = Vec::new();
        for (field_idx, field) in fields.iter().enumerate() {
            for (col_idx, column) in columns.iter().enumerate() {
                let score = self.score(column, *field);
                if score.score >= min_confidence {
                    candidates.push((field_idx, col_idx, score));
                }
            }
        }

        candidates.sort_by(|a, b| {
            b.2.score
                .partial_cmp(&a.2.score)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
                .then(a.1.cmp(&b.1))
        });

        let mut assigned_columns = BTreeSet::new();
        let mut assigned_fields = BTreeSet::new();
        let mut suggestions = Vec::new();
        for (field_idx, col_idx, score) in candidates {
            if assigned_columns.contains(&col_idx) || assigned_fields.contains(&field_idx) {
                continue;
            }
            assigned_columns.insert(col_idx);
            assigned_fields.insert(field_idx);
            suggestions.push(Suggestion {
                source_column: columns[col_idx].clone(),
                field: fields[field_idx],
                score,
            });
        }
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_synonym_scores_one() {
        let engine = ScoringEngine::new(BTreeMap::new());
        let score = engine.score("Órgão", CanonicalField::Secretaria);
        assert!((score.score - 1.0).abs() < 1e-6);
        assert!(engine.is_exact("Órgão", CanonicalField::Secretaria));
    }

    #[test]
    fn test_similar_names() {
        let engine = ScoringEngine::new(BTreeMap::new());
        let score = engine.score("VALOR PAGO (R$)", CanonicalField::Amount);
        assert!(score.score > 0.9, "got {}", score.score);
    }

    #[test]
    fn test_type_mismatch_penalty() {
        let mut hints = BTreeMap::new();
        hints.insert(
            "VALOR".to_string(),
            ColumnHint {
                numeric_ratio: 0.0,
                date_ratio: 0.0,
                null_ratio: 0.0,
            },
        );
        let engine = ScoringEngine::new(hints);
        let score = engine.score("VALOR", CanonicalField::Amount);
        assert!(score.score < 0.9);
        assert!(score.explain().contains("Type mismatch"));
    }

    #[test]
    fn test_suggest_all_one_to_one() {
        let engine = ScoringEngine::new(BTreeMap::new());
        let columns = vec!["DATA".to_string(), "DATA PAGAMENTO".to_string()];
        let suggestions = engine.suggest_all(&columns, &[CanonicalField::Date], 0.5);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].source_column, "DATA");
    }

    #[test]
    fn test_extra_synonyms() {
        let engine = ScoringEngine::new(BTreeMap::new())
            .with_synonyms(CanonicalField::Fornecedor, ["Empresa Contratada"]);
        assert!(engine.is_exact("EMPRESA CONTRATADA", CanonicalField::Fornecedor));
    }

    #[test]
    fn test_explainability() {
        let engine = ScoringEngine::new(BTreeMap::new());
        let explanation = engine.score("CNPJ", CanonicalField::Cnpj).explain();
        assert!(explanation.contains("Name similarity"));
    }
}
