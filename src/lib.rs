//! Blueprint Validation for Home Assistant
//!
//! This crate validates Home Assistant blueprint YAML documents against:
//! - Required structure (top-level `blueprint`, `trigger`, `action` keys)
//! - Blueprint metadata (name, description, valid domain)
//! - Input definitions (required properties, reserved names, defaults)
//! - Trigger and action shape
//! - Common authoring mistakes (tabs, `choose`/`default` misalignment,
//!   unclosed template expressions, `!input` in condition lists)
//!
//! Diagnostics are accumulated rather than raised: every rule pass appends
//! to a [`DiagnosticLog`] and the final verdict is derived from the error
//! count. Warnings never fail a run.
//!
//! ```ignore
//! use blueprint_validate::{BlueprintValidator, Reporter, ValidatorConfig};
//!
//! let config = ValidatorConfig::new("blueprints");
//! let mut validator = BlueprintValidator::with_config(config);
//! let report = validator.validate_all()?;
//! println!("{}", Reporter::to_text(&report));
//! ```

pub mod diagnostics;
pub mod heuristics;
pub mod linters;
pub mod loader;
pub mod reporter;
pub mod validator;

use std::path::PathBuf;
use thiserror::Error;

pub use diagnostics::{Diagnostic, DiagnosticLog};
pub use linters::YamlLinter;
pub use loader::{BlueprintTag, TaggedScalar};
pub use reporter::{Reporter, ValidationReport};
pub use validator::BlueprintValidator;

/// Result type for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Validation error types
///
/// These cover failures of the tool itself. Problems found *inside* a
/// blueprint document never surface here; they become [`Diagnostic`]
/// entries and stay within the per-document boundary.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("linter '{0}' not found on PATH")]
    LinterMissing(String),
}

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

/// Configuration for a validation run
///
/// # Example
///
/// ```ignore
/// let config = ValidatorConfig::new("custom/blueprints");
/// ```
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Directory scanned for blueprint documents (not recursive)
    pub blueprints_dir: PathBuf,
}

impl ValidatorConfig {
    /// Create a config scanning the given directory
    pub fn new(blueprints_dir: impl Into<PathBuf>) -> Self {
        Self {
            blueprints_dir: blueprints_dir.into(),
        }
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::new("blueprints")
    }
}
