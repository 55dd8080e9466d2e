//! Validation Report Generation
//!
//! Renders a batch's accumulated diagnostics as terminal text (warnings
//! first, then errors, then a summary) or as JSON for CI integration.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, DiagnosticLog};

const BANNER_WIDTH: usize = 60;

/// Outcome of one batch validation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Number of blueprint files discovered and checked
    pub files_checked: usize,
    /// All warnings, in the order the rules produced them
    pub warnings: Vec<Diagnostic>,
    /// All errors, in the order the rules produced them
    pub errors: Vec<Diagnostic>,
    /// True iff no errors were recorded
    pub passed: bool,
}

impl ValidationReport {
    /// Build a report by draining a diagnostic log
    pub fn from_log(files_checked: usize, log: DiagnosticLog) -> Self {
        let passed = log.passed();
        let (errors, warnings) = log.into_parts();
        Self {
            files_checked,
            warnings,
            errors,
            passed,
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

/// Report generator
pub struct Reporter;

impl Reporter {
    /// Section banner used around each phase of terminal output
    pub fn banner() -> String {
        "=".repeat(BANNER_WIDTH)
    }

    /// Header printed before blueprint validation starts
    pub fn validation_header() -> String {
        format!(
            "\n{banner}\nValidating Home Assistant Blueprints\n{banner}\n",
            banner = Self::banner()
        )
    }

    /// Generate the human-readable report
    ///
    /// Warnings always precede errors, regardless of which files they came
    /// from; the summary line carries both counts.
    pub fn to_text(report: &ValidationReport) -> String {
        let mut output = String::new();

        if report.files_checked == 0 && report.errors.is_empty() {
            output.push_str("[WARN] No blueprint files found\n");
            return output;
        }
        output.push_str(&format!(
            "Found {} blueprint file(s)\n",
            report.files_checked
        ));

        output.push('\n');
        output.push_str(&Self::banner());
        output.push('\n');

        if !report.warnings.is_empty() {
            output.push_str("\n[WARNINGS]\n\n");
            for warning in &report.warnings {
                output.push_str(&format!("  {warning}\n"));
            }
        }

        if !report.errors.is_empty() {
            output.push_str("\n[ERRORS]\n\n");
            for error in &report.errors {
                output.push_str(&format!("  {error}\n"));
            }
        }

        output.push('\n');
        output.push_str(&Self::banner());
        output.push('\n');

        if report.errors.is_empty() && report.warnings.is_empty() {
            output.push_str("\n[PASS] All blueprints are valid!\n");
        } else {
            output.push_str(&format!(
                "\nResults: {} error(s), {} warning(s)\n",
                report.error_count(),
                report.warning_count()
            ));
        }

        output
    }

    /// Generate the JSON report
    pub fn to_json(report: &ValidationReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }
}
