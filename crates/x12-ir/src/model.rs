//! Bound transaction model.

use crate::delimiters::Delimiters;
use crate::diagnostic::{Diagnostic, Severity};
use crate::record::LoopRecord;
use serde::{Deserialize, Serialize};

/// A bound and validated transaction set (one ST..SE window).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionModel {
    /// Transaction set code from ST01, e.g. `270`.
    pub transaction_code: String,
    /// Implementation convention from ST03 (or GS08), e.g. `005010X279A1`.
    pub implementation_version: String,
    /// Transaction set control number from ST02.
    pub control_number: String,
    /// Functional group control number from the enclosing GS.
    pub group_control_number: Option<String>,
    /// Interchange usage indicator from ISA15 (`P` production, `T` test).
    pub usage_indicator: Option<String>,
    /// Delimiters the transaction arrived with; reused for rendering.
    pub delimiters: Delimiters,
    /// The nested loop record tree (header, loops, footer).
    pub root: LoopRecord,
    /// Diagnostics in observation order.
    pub diagnostics: Vec<Diagnostic>,
}

impl TransactionModel {
    /// True when no diagnostic carries error severity.
    pub fn valid(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{DiagnosticKind, SourceLocation};

    fn model() -> TransactionModel {
        TransactionModel {
            transaction_code: "270".to_string(),
            implementation_version: "005010X279A1".to_string(),
            control_number: "0001".to_string(),
            group_control_number: Some("1".to_string()),
            usage_indicator: Some("T".to_string()),
            delimiters: Delimiters::default(),
            root: LoopRecord::new("transaction"),
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_valid_without_diagnostics() {
        assert!(model().valid());
    }

    #[test]
    fn test_valid_with_warnings_only() {
        let mut m = model();
        m.diagnostics.push(Diagnostic::warning(
            DiagnosticKind::Structure,
            SourceLocation::default(),
            "unexpected segment order",
        ));
        assert!(m.valid());
        assert_eq!(m.warnings().count(), 1);
        assert_eq!(m.errors().count(), 0);
    }

    #[test]
    fn test_invalid_with_error() {
        let mut m = model();
        m.diagnostics.push(Diagnostic::error(
            DiagnosticKind::TransactionSemantic,
            SourceLocation::default(),
            "segment count mismatch",
        ));
        assert!(!m.valid());
        assert_eq!(m.errors().count(), 1);
    }
}
