//! Diagnostic Collection
//!
//! Ordered accumulation of validation findings. Rules append errors and
//! warnings as they fire; nothing is deduplicated or reordered, so the log
//! reads back in the exact order the rule passes produced it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Severity;

/// A single validation finding tied to a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// File the finding refers to (as given to the validator)
    pub file: String,
    /// Human-readable message
    pub message: String,
    /// 1-based line number, when the rule can point at one
    pub line: Option<usize>,
    /// Error or warning
    pub severity: Severity,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.file, line, self.message),
            None => write!(f, "{}: {}", self.file, self.message),
        }
    }
}

/// Ordered collector for one validation run
///
/// Owned by the validator for the lifetime of a batch; every per-document
/// rule pass appends into the same log. Both record operations are pure
/// appends and never fail.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DiagnosticLog {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error
    pub fn error(&mut self, file: impl Into<String>, message: impl Into<String>, line: Option<usize>) {
        self.errors.push(Diagnostic {
            file: file.into(),
            message: message.into(),
            line,
            severity: Severity::Error,
        });
    }

    /// Record a warning
    pub fn warning(
        &mut self,
        file: impl Into<String>,
        message: impl Into<String>,
        line: Option<usize>,
    ) {
        self.warnings.push(Diagnostic {
            file: file.into(),
            message: message.into(),
            line,
            severity: Severity::Warning,
        });
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// A run passes iff no errors were recorded; warnings do not count
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the log into its (errors, warnings) lists
    pub fn into_parts(self) -> (Vec<Diagnostic>, Vec<Diagnostic>) {
        (self.errors, self.warnings)
    }
}
