//! End-to-end validation tests over real directories

use std::fs;
use std::path::Path;

use blueprint_validate::{BlueprintValidator, Reporter, ValidationReport, ValidatorConfig};
use tempfile::TempDir;

const VALID_BLUEPRINT: &str = "\
blueprint:
  name: Motion Light
  description: Turn on a light when motion is detected
  domain: automation
  input: {}
trigger:
  - platform: state
action:
  - service: light.turn_on
mode: single
";

fn write_blueprint(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write fixture");
}

fn run(dir: &Path) -> ValidationReport {
    let mut validator = BlueprintValidator::with_config(ValidatorConfig::new(dir));
    validator.validate_all().expect("validation run")
}

#[test]
fn valid_directory_passes_with_no_diagnostics() {
    let tmp = TempDir::new().unwrap();
    write_blueprint(tmp.path(), "motion.yaml", VALID_BLUEPRINT);

    let report = run(tmp.path());
    assert!(report.passed);
    assert_eq!(report.files_checked, 1);
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
    assert!(Reporter::to_text(&report).contains("[PASS] All blueprints are valid!"));
}

#[test]
fn empty_directory_is_success() {
    let tmp = TempDir::new().unwrap();
    let report = run(tmp.path());
    assert!(report.passed);
    assert_eq!(report.files_checked, 0);
}

#[test]
fn missing_directory_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let report = run(&tmp.path().join("does-not-exist"));
    assert!(!report.passed);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].message.contains("directory not found"));
}

#[test]
fn non_yaml_files_are_ignored() {
    let tmp = TempDir::new().unwrap();
    write_blueprint(tmp.path(), "motion.yaml", VALID_BLUEPRINT);
    write_blueprint(tmp.path(), "notes.txt", "not yaml at all {{");
    write_blueprint(tmp.path(), "README.md", "# docs");

    let report = run(tmp.path());
    assert_eq!(report.files_checked, 1);
    assert!(report.passed);
}

#[test]
fn yml_extension_is_discovered_too() {
    let tmp = TempDir::new().unwrap();
    write_blueprint(tmp.path(), "motion.yml", VALID_BLUEPRINT);

    let report = run(tmp.path());
    assert_eq!(report.files_checked, 1);
}

#[test]
fn malformed_file_does_not_block_the_rest_of_the_batch() {
    let tmp = TempDir::new().unwrap();
    write_blueprint(tmp.path(), "a_broken.yaml", "blueprint:\n  name: [unclosed\n");
    write_blueprint(tmp.path(), "b_valid.yaml", VALID_BLUEPRINT);
    write_blueprint(tmp.path(), "c_incomplete.yaml", "blueprint:\n  name: X\n");

    let report = run(tmp.path());
    assert_eq!(report.files_checked, 3);
    assert!(!report.passed);

    // The broken file contributes exactly one syntax error
    let broken: Vec<_> = report
        .errors
        .iter()
        .filter(|e| e.file.ends_with("a_broken.yaml"))
        .collect();
    assert_eq!(broken.len(), 1);
    assert!(broken[0].message.contains("YAML syntax error"));
    assert!(broken[0].line.is_some());

    // The incomplete file was still fully rule-checked
    assert!(report
        .errors
        .iter()
        .any(|e| e.file.ends_with("c_incomplete.yaml")
            && e.message == "Missing required top-level key: 'trigger'"));
}

#[test]
fn diagnostics_follow_sorted_file_order() {
    let tmp = TempDir::new().unwrap();
    write_blueprint(tmp.path(), "z_last.yaml", "- a list, not a blueprint\n");
    write_blueprint(tmp.path(), "a_first.yaml", "- a list, not a blueprint\n");

    let report = run(tmp.path());
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors[0].file.ends_with("a_first.yaml"));
    assert!(report.errors[1].file.ends_with("z_last.yaml"));
}

#[test]
fn repeated_runs_are_idempotent() {
    let tmp = TempDir::new().unwrap();
    write_blueprint(tmp.path(), "a.yaml", "blueprint:\n  name: X\ntrigger: []\naction: []\n");
    write_blueprint(tmp.path(), "b.yaml", "\tkey: value\n");

    let first = run(tmp.path());
    let second = run(tmp.path());

    assert_eq!(first.errors, second.errors);
    assert_eq!(first.warnings, second.warnings);
    assert_eq!(Reporter::to_text(&first), Reporter::to_text(&second));
}

#[test]
fn report_renders_warnings_before_errors_across_files() {
    let tmp = TempDir::new().unwrap();
    // First file (sorted) produces an error, second produces a warning
    write_blueprint(tmp.path(), "a.yaml", "- list root\n");
    write_blueprint(
        tmp.path(),
        "b.yaml",
        &VALID_BLUEPRINT.replace("mode: single\n", ""),
    );

    let report = run(tmp.path());
    let text = Reporter::to_text(&report);
    let warnings_at = text.find("[WARNINGS]").expect("warnings section");
    let errors_at = text.find("[ERRORS]").expect("errors section");
    assert!(warnings_at < errors_at);
    assert!(text.contains("Results: 1 error(s), 1 warning(s)"));
}

#[test]
fn json_report_round_trips() {
    let tmp = TempDir::new().unwrap();
    write_blueprint(tmp.path(), "a.yaml", VALID_BLUEPRINT);

    let report = run(tmp.path());
    let json = Reporter::to_json(&report);
    let parsed: ValidationReport = serde_json::from_str(&json).expect("valid report JSON");
    assert!(parsed.passed);
    assert_eq!(parsed.files_checked, 1);
}

#[test]
fn unreadable_file_is_recorded_and_skipped() {
    let tmp = TempDir::new().unwrap();
    // Invalid UTF-8 forces a read failure without touching permissions
    fs::write(tmp.path().join("binary.yaml"), [0xff, 0xfe, 0x00, 0x42]).unwrap();
    write_blueprint(tmp.path(), "ok.yaml", VALID_BLUEPRINT);

    let report = run(tmp.path());
    assert_eq!(report.files_checked, 2);
    let unreadable: Vec<_> = report
        .errors
        .iter()
        .filter(|e| e.file.ends_with("binary.yaml"))
        .collect();
    assert_eq!(unreadable.len(), 1);
    assert!(unreadable[0].message.contains("Failed to read or parse file"));
    assert!(unreadable[0].line.is_none());
    assert!(!report.errors.iter().any(|e| e.file.ends_with("ok.yaml")));
}
