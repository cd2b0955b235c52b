use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::CanonicalField;

/// Why a row failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingColumn,
    InvalidDate,
    InvalidAmount,
    InvalidCnpj,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingColumn => "missing_column",
            Self::InvalidDate => "invalid_date",
            Self::InvalidAmount => "invalid_amount",
            Self::InvalidCnpj => "invalid_cnpj",
        }
    }

    /// Whether a row carrying this issue is excluded from the output.
    pub fn excludes_row(self) -> bool {
        !matches!(self, Self::MissingColumn)
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding, addressed by input row index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Zero-based index into the input rows.
    pub row: usize,
    pub field: CanonicalField,
    pub kind: IssueKind,
    /// Rejection reason with the offending value, or the missing column.
    pub detail: String,
}

impl ValidationIssue {
    pub fn new(
        row: usize,
        field: CanonicalField,
        kind: IssueKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            row,
            field,
            kind,
            detail: detail.into(),
        }
    }
}

/// Issue counts by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub total: usize,
    pub by_kind: BTreeMap<IssueKind, usize>,
}

impl IssueSummary {
    pub fn from_issues(issues: &[ValidationIssue]) -> Self {
        let mut by_kind = BTreeMap::new();
        for issue in issues {
            *by_kind.entry(issue.kind).or_insert(0) += 1;
        }
        Self {
            total: issues.len(),
            by_kind,
        }
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_by_kind() {
        let issues = vec![
            ValidationIssue::new(0, CanonicalField::Amount, IssueKind::InvalidAmount, "-5"),
            ValidationIssue::new(3, CanonicalField::Amount, IssueKind::InvalidAmount, "x"),
            ValidationIssue::new(3, CanonicalField::Date, IssueKind::InvalidDate, ""),
        ];
        let summary = IssueSummary::from_issues(&issues);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.count(IssueKind::InvalidAmount), 2);
        assert_eq!(summary.count(IssueKind::InvalidCnpj), 0);
    }

    #[test]
    fn missing_column_does_not_exclude() {
        assert!(!IssueKind::MissingColumn.excludes_row());
        assert!(IssueKind::InvalidCnpj.excludes_row());
    }
}
