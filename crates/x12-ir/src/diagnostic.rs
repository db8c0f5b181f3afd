//! Structured validation findings.

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// The validation tier that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Field/segment shape: lengths, patterns, types, code tables.
    Shape,
    /// Cross-field constraint within one segment.
    SegmentSemantic,
    /// Cross-segment constraint within one loop.
    LoopSemantic,
    /// Transaction-wide constraint.
    TransactionSemantic,
    /// Structural finding from the loop engine.
    Structure,
}

/// Where in the interchange a diagnostic was observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// 1-based interchange ordinal.
    pub interchange: usize,
    /// 1-based functional group ordinal within the interchange.
    pub group: usize,
    /// 1-based transaction ordinal within the group.
    pub transaction: usize,
    /// 1-based segment ordinal within the transaction, when known.
    pub segment: Option<usize>,
    /// 0-based field index within the segment, when known.
    pub field: Option<usize>,
}

impl SourceLocation {
    /// Location narrowed to a segment ordinal.
    pub fn at_segment(mut self, segment: usize) -> Self {
        self.segment = Some(segment);
        self
    }

    /// Location narrowed to a field index.
    pub fn at_field(mut self, field: usize) -> Self {
        self.field = Some(field);
        self
    }
}

/// A validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub location: SourceLocation,
    pub message: String,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(kind: DiagnosticKind, location: SourceLocation, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            location,
            message: message.into(),
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(
        kind: DiagnosticKind,
        location: SourceLocation,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            location,
            message: message.into(),
        }
    }

    /// True for error severity.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(
            f,
            "{severity}: {} (interchange {}, group {}, transaction {}",
            self.message, self.location.interchange, self.location.group, self.location.transaction
        )?;
        if let Some(segment) = self.location.segment {
            write!(f, ", segment {segment}")?;
        }
        if let Some(field) = self.location.field {
            write!(f, ", field {field}")?;
        }
        write!(f, ")")
    }
}
