//! Canonical débito fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GastosError;

/// A canonical field of a débito row.
///
/// `Fornecedor` is optional: an unmapped fornecedor is not an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Date,
    Amount,
    Cnpj,
    Secretaria,
    Fornecedor,
}

impl CanonicalField {
    /// All fields in extraction order.
    pub const ALL: [CanonicalField; 5] = [
        Self::Date,
        Self::Amount,
        Self::Cnpj,
        Self::Secretaria,
        Self::Fornecedor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Cnpj => "cnpj",
            Self::Secretaria => "secretaria",
            Self::Fornecedor => "fornecedor",
        }
    }

    /// Column header used by the débitos spreadsheet template.
    pub fn source_label(self) -> &'static str {
        match self {
            Self::Date => "DATA",
            Self::Amount => "VALOR",
            Self::Cnpj => "CNPJ",
            Self::Secretaria => "SECRETARIA",
            Self::Fornecedor => "FORNECEDOR",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, Self::Fornecedor)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = GastosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" | "data" => Ok(Self::Date),
            "amount" | "valor" => Ok(Self::Amount),
            "cnpj" => Ok(Self::Cnpj),
            "secretaria" => Ok(Self::Secretaria),
            "fornecedor" | "supplier" => Ok(Self::Fornecedor),
            _ => Err(GastosError::UnknownField { key: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_english_and_portuguese_keys() {
        assert_eq!("date".parse::<CanonicalField>(), Ok(CanonicalField::Date));
        assert_eq!("VALOR".parse::<CanonicalField>(), Ok(CanonicalField::Amount));
        assert_eq!(
            " Fornecedor ".parse::<CanonicalField>(),
            Ok(CanonicalField::Fornecedor)
        );
        assert!(matches!(
            "banco".parse::<CanonicalField>(),
            Err(GastosError::UnknownField { .. })
        ));
    }

    #[test]
    fn only_fornecedor_is_optional() {
        let optional: Vec<_> = CanonicalField::ALL
            .iter()
            .filter(|field| !field.is_required())
            .collect();
        assert_eq!(optional, vec![&CanonicalField::Fornecedor]);
    }
}
