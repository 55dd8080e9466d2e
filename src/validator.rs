//! Blueprint Rule Engine
//!
//! Per-document validation plus the batch runner. Each rule pass is a
//! separate method guarding only its own precondition key, so a failed rule
//! never short-circuits its siblings; the one exception is a document that
//! fails to parse, which records a single error and skips the rest of its
//! own passes. Other documents in the batch are unaffected.

use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::diagnostics::DiagnosticLog;
use crate::heuristics;
use crate::loader;
use crate::reporter::ValidationReport;
use crate::{Result, ValidatorConfig};

/// Top-level keys every blueprint document must carry
pub const REQUIRED_BLUEPRINT_KEYS: [&str; 3] = ["blueprint", "trigger", "action"];
/// Keys required in the `blueprint` metadata mapping
pub const REQUIRED_BLUEPRINT_META: [&str; 3] = ["name", "description", "domain"];
/// Allowed values for `blueprint.domain`
pub const VALID_DOMAINS: [&str; 2] = ["automation", "script"];
/// Input names that would shadow a top-level section
pub const RESERVED_INPUT_NAMES: [&str; 4] = ["blueprint", "trigger", "condition", "action"];

const BLUEPRINT_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Rule-based validator for blueprint documents
///
/// Owns the [`DiagnosticLog`] for one batch: create, run
/// [`validate_all`](Self::validate_all) (or the per-document entry points),
/// read the resulting report once, discard.
#[derive(Debug, Default)]
pub struct BlueprintValidator {
    config: ValidatorConfig,
    log: DiagnosticLog,
}

impl BlueprintValidator {
    /// Create a validator scanning the default `blueprints/` directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with a custom configuration
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            log: DiagnosticLog::new(),
        }
    }

    /// Validate every blueprint in the configured directory
    ///
    /// A missing directory is an error; an empty one is not. Documents are
    /// processed in sorted filename order so repeated runs over an
    /// unchanged tree produce identical reports.
    pub fn validate_all(&mut self) -> Result<ValidationReport> {
        let dir = self.config.blueprints_dir.clone();

        if !dir.exists() {
            self.log.error(
                format!("{}/", dir.display()),
                "Blueprints directory not found",
                None,
            );
            return Ok(self.finish(0));
        }

        let files = discover_blueprints(&dir)?;
        tracing::info!(count = files.len(), dir = %dir.display(), "validating blueprints");

        for file in &files {
            self.validate_file(file);
        }

        Ok(self.finish(files.len()))
    }

    /// Validate a single blueprint file
    pub fn validate_file(&mut self, path: &Path) {
        let file = path.display().to_string();
        tracing::debug!(file = %file, "validating blueprint");

        match fs::read_to_string(path) {
            Ok(text) => self.validate_source(&file, &text),
            Err(err) => {
                self.log
                    .error(&file, format!("Failed to read or parse file: {err}"), None);
            }
        }
    }

    /// Validate blueprint text already in memory
    ///
    /// Entry point for the fixed rule sequence: structure, metadata, inputs,
    /// triggers, actions, then the textual heuristics. A parse failure
    /// records one error and skips everything else for this document.
    pub fn validate_source(&mut self, file: &str, text: &str) {
        let doc = match loader::parse_document(text) {
            Ok(doc) => doc,
            Err(err) => {
                self.log.error(file, err.message, err.line);
                return;
            }
        };

        self.check_structure(file, &doc);
        if let Some(meta) = doc.get("blueprint") {
            self.check_metadata(file, meta);
            if let Some(inputs) = meta.get("input") {
                self.check_inputs(file, inputs);
            }
        }
        if let Some(triggers) = doc.get("trigger") {
            self.check_triggers(file, triggers);
        }
        if let Some(actions) = doc.get("action") {
            self.check_actions(file, actions);
        }
        heuristics::scan(file, text, &doc, &mut self.log);
    }

    /// Borrow the accumulated diagnostics
    pub fn log(&self) -> &DiagnosticLog {
        &self.log
    }

    fn finish(&mut self, files_checked: usize) -> ValidationReport {
        let log = std::mem::take(&mut self.log);
        ValidationReport::from_log(files_checked, log)
    }

    /// Rule 1: the root must be a non-empty mapping with the required keys
    fn check_structure(&mut self, file: &str, doc: &Value) {
        let non_empty = doc.as_mapping().is_some_and(|m| !m.is_empty());
        if !non_empty {
            self.log
                .error(file, "Blueprint must be a valid YAML object", None);
            return;
        }

        for key in REQUIRED_BLUEPRINT_KEYS {
            if doc.get(key).is_none() {
                self.log
                    .error(file, format!("Missing required top-level key: '{key}'"), None);
            }
        }
    }

    /// Rule 2: metadata keys, domain enumeration, description length
    fn check_metadata(&mut self, file: &str, meta: &Value) {
        for key in REQUIRED_BLUEPRINT_META {
            if meta.get(key).is_none() {
                self.log.error(
                    file,
                    format!("Missing required blueprint metadata: '{key}'"),
                    None,
                );
            }
        }

        if let Some(domain) = meta.get("domain") {
            let valid = domain
                .as_str()
                .is_some_and(|d| VALID_DOMAINS.contains(&d));
            if !valid {
                self.log.error(
                    file,
                    format!(
                        "Invalid domain: '{}'. Must be one of: {}",
                        scalar_text(domain),
                        VALID_DOMAINS.join(", ")
                    ),
                    None,
                );
            }
        }

        if let Some(description) = meta.get("description").and_then(Value::as_str) {
            if description.chars().count() < 10 {
                self.log.warning(
                    file,
                    "Blueprint description is very short (< 10 characters)",
                    None,
                );
            }
        }
    }

    /// Rule 3: input definitions and reserved-name collisions
    ///
    /// The reserved-name check applies to every entry regardless of its
    /// definition shape; inputs are referenced by name in template
    /// expressions that also recognize the top-level section names.
    fn check_inputs(&mut self, file: &str, inputs: &Value) {
        let Some(mapping) = inputs.as_mapping() else {
            self.log
                .error(file, "Blueprint inputs must be an object", None);
            return;
        };

        for (name, definition) in mapping {
            let name = scalar_text(name);

            if RESERVED_INPUT_NAMES.contains(&name.as_str()) {
                self.log.error(
                    file,
                    format!("Input name '{name}' is a reserved keyword"),
                    None,
                );
            }

            if definition.is_mapping() {
                if definition.get("name").is_none() {
                    self.log
                        .warning(file, format!("Input '{name}' missing 'name' property"), None);
                }
                if definition.get("selector").is_none() {
                    self.log.warning(
                        file,
                        format!("Input '{name}' missing 'selector' property"),
                        None,
                    );
                }
            }
        }
    }

    /// Rule 4: triggers must be a sequence of platform-bearing mappings
    fn check_triggers(&mut self, file: &str, triggers: &Value) {
        let Some(sequence) = triggers.as_sequence() else {
            self.log.error(file, "Triggers must be an array", None);
            return;
        };

        if sequence.is_empty() {
            // Not an error: a script blueprint may be manual-only
            self.log.warning(file, "No triggers defined", None);
            return;
        }

        for trigger in sequence {
            if trigger.is_mapping() && trigger.get("platform").is_none() {
                self.log
                    .error(file, "Trigger missing required \"platform\" key", None);
            }
        }
    }

    /// Rule 5: actions must be a sequence; empty is a warning
    fn check_actions(&mut self, file: &str, actions: &Value) {
        let Some(sequence) = actions.as_sequence() else {
            self.log.error(file, "Actions must be an array", None);
            return;
        };

        if sequence.is_empty() {
            self.log.warning(file, "No actions defined", None);
        }
    }
}

/// Collect `.yaml`/`.yml` files directly under the blueprints directory
fn discover_blueprints(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_blueprint = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| BLUEPRINT_EXTENSIONS.contains(&ext));
        if is_blueprint {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Render a YAML scalar for use inside a message
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .unwrap_or_default()
            .trim_end()
            .to_string(),
    }
}
