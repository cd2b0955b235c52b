//! Column mapping for débito uploads.
//!
//! Maps the source headers of an uploaded table onto the canonical fields
//! (`date`, `amount`, `cnpj`, `secretaria`, `fornecedor`), either from an
//! explicit user map or by inference over known header synonyms.
//!
//! # Example
//!
//! ```ignore
//! use gastos_map::{MappingEngine, build_column_hints};
//!
//! let engine = MappingEngine::new(build_column_hints(&table));
//! let result = engine.infer(&table.headers);
//! for suggestion in &result.suggestions {
//!     println!("{} <- {} ({:.2})", suggestion.field, suggestion.source_column, suggestion.confidence);
//! }
//! ```

mod engine;
mod error;
mod hints;
mod patterns;
mod score;
mod utils;

pub use engine::{
    ConfidenceLevel, ConfidenceThresholds, DEFAULT_MIN_CONFIDENCE, MappingEngine, MappingResult,
    MappingSuggestion, MatchKind,
};
pub use error::{MappingError, Result};
pub use hints::build_column_hints;
pub use score::{ColumnHint, ColumnScore, ScoreComponent, ScoringEngine, Suggestion};
pub use utils::normalize_text;
