//! Canonical field to source column mapping.

use serde::{Deserialize, Serialize};

use crate::error::{GastosError, Result};
use crate::field::CanonicalField;

/// Source column chosen for each canonical field.
///
/// Built once per upload and not modified by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMapping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secretaria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fornecedor: Option<String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mapping from free-form `canonical key -> source column` pairs.
    ///
    /// Unknown canonical keys are rejected, as is the same field given twice
    /// (e.g. `valor` and `amount`). Blank source columns are ignored.
    pub fn from_raw<I, K, V>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut mapping = Self::default();
        for (key, column) in raw {
            let field: CanonicalField = key.as_ref().parse()?;
            let column = column.as_ref().trim();
            if column.is_empty() {
                continue;
            }
            if mapping.get(field).is_some() {
                return Err(GastosError::DuplicateField {
                    field: field.as_str().to_string(),
                });
            }
            mapping.set(field, column);
        }
        Ok(mapping)
    }

    /// Maps every required field to a column of the same canonical name.
    /// The optional `fornecedor` stays unmapped.
    pub fn identity() -> Self {
        let mut mapping = Self::default();
        for field in CanonicalField::ALL {
            if field.is_required() {
                mapping.set(field, field.as_str());
            }
        }
        mapping
    }

    /// Maps every field to the débitos template header (`DATA`, `VALOR`, ...).
    pub fn template() -> Self {
        let mut mapping = Self::default();
        for field in CanonicalField::ALL {
            mapping.set(field, field.source_label());
        }
        mapping
    }

    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: CanonicalField, column: impl Into<String>) {
        *self.slot_mut(field) = Some(column.into());
    }

    /// Fills fields absent here from `other`.
    pub fn merged_with(mut self, other: &ColumnMapping) -> Self {
        for field in CanonicalField::ALL {
            if self.get(field).is_none() {
                if let Some(column) = other.get(field) {
                    self.set(field, column);
                }
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        CanonicalField::ALL
            .iter()
            .all(|field| self.get(*field).is_none())
    }

    pub fn entries(&self) -> impl Iterator<Item = (CanonicalField, Option<&str>)> + '_ {
        CanonicalField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    fn slot(&self, field: CanonicalField) -> &Option<String> {
        match field {
            CanonicalField::Date => &self.date,
            CanonicalField::Amount => &self.amount,
            CanonicalField::Cnpj => &self.cnpj,
            CanonicalField::Secretaria => &self.secretaria,
            CanonicalField::Fornecedor => &self.fornecedor,
        }
    }

    fn slot_mut(&mut self, field: CanonicalField) -> &mut Option<String> {
        match field {
            CanonicalField::Date => &mut self.date,
            CanonicalField::Amount => &mut self.amount,
            CanonicalField::Cnpj => &mut self.cnpj,
            CanonicalField::Secretaria => &mut self.secretaria,
            CanonicalField::Fornecedor => &mut self.fornecedor,
        }
    }
}
