//! Common-Mistake Heuristics
//!
//! Textual checks over the raw document plus two tree-level checks. These
//! are approximations, not a YAML-aware indentation parser: the
//! `choose`/`default` scan in particular is a bounded backward search and
//! keeps its blind spot for deeply nested `choose` blocks. Everything here
//! emits warnings only.

use serde_yaml::Value;

use crate::diagnostics::DiagnosticLog;
use crate::validator::scalar_text;

/// How far back a `default:` line searches for its enclosing `choose:`
const CHOOSE_LOOKBACK_LINES: usize = 50;

/// Trimmed-line suffixes that open a YAML block scalar
const BLOCK_SCALAR_SUFFIXES: [&str; 6] = [">", "|", ">-", "|-", ">+", "|+"];

/// Run every heuristic over one document
///
/// Independent of the structural rules: runs even when they failed, and the
/// tree-level checks guard their own preconditions.
pub fn scan(file: &str, text: &str, doc: &Value, log: &mut DiagnosticLog) {
    if text.contains('\t') {
        log.warning(
            file,
            "File contains tabs. YAML should use spaces for indentation",
            None,
        );
    }

    let lines: Vec<&str> = text.split('\n').collect();
    for (index, line) in lines.iter().enumerate() {
        let line_num = index + 1;

        check_default_alignment(file, &lines, index, log);
        check_unclosed_template(file, line, line_num, log);

        if line.contains("  - condition: !input") {
            log.warning(
                file,
                "Possible incorrect !input usage in condition list",
                Some(line_num),
            );
        }
    }

    check_missing_mode(file, doc, log);
    check_inputs_without_defaults(file, doc, log);
}

/// Flag a `default:` whose column disagrees with its nearest `choose:`
///
/// Expected column is the `choose` line's own, plus 2 when that line is not
/// a sequence item. Only the nearest `choose` within the lookback window
/// counts; no match means no diagnostic.
fn check_default_alignment(file: &str, lines: &[&str], index: usize, log: &mut DiagnosticLog) {
    let line = lines[index];
    if !line.trim_start().starts_with("default:") {
        return;
    }
    let default_indent = indent_of(line);

    let window_start = index.saturating_sub(CHOOSE_LOOKBACK_LINES);
    for prev in lines[window_start..index].iter().rev() {
        let stripped = prev.trim();
        if stripped == "choose:" || stripped.contains("- choose:") {
            let choose_indent = indent_of(prev);
            let expected = if stripped.starts_with('-') {
                choose_indent
            } else {
                choose_indent + 2
            };

            if default_indent != expected {
                log.warning(
                    file,
                    format!(
                        "Possible indentation issue: 'default' at column {default_indent} \
                         may be misaligned with 'choose' at column {choose_indent}"
                    ),
                    Some(index + 1),
                );
            }
            break;
        }
    }
}

/// Flag `{{` without `}}` on the same line, unless a block scalar follows
fn check_unclosed_template(file: &str, line: &str, line_num: usize, log: &mut DiagnosticLog) {
    if !line.contains("{{") || line.contains("}}") {
        return;
    }
    let stripped = line.trim();
    if BLOCK_SCALAR_SUFFIXES
        .iter()
        .any(|suffix| stripped.ends_with(suffix))
    {
        return;
    }
    log.warning(file, "Possible unclosed template expression", Some(line_num));
}

/// Suggest an explicit `mode` for automation blueprints
///
/// Absence defaults to single-instance behavior, which surprises authors of
/// retriggering automations.
fn check_missing_mode(file: &str, doc: &Value, log: &mut DiagnosticLog) {
    if !doc.is_mapping() {
        return;
    }
    let domain = doc
        .get("blueprint")
        .and_then(|meta| meta.get("domain"))
        .and_then(Value::as_str);
    if domain == Some("automation") && doc.get("mode").is_none() {
        log.warning(
            file,
            "Consider setting \"mode\" for automation (e.g., restart, single, parallel)",
            None,
        );
    }
}

/// One summary warning listing inputs that declare no `default`
fn check_inputs_without_defaults(file: &str, doc: &Value, log: &mut DiagnosticLog) {
    let Some(inputs) = doc
        .get("blueprint")
        .and_then(|meta| meta.get("input"))
        .and_then(Value::as_mapping)
    else {
        return;
    };

    let missing: Vec<String> = inputs
        .iter()
        .filter(|(_, definition)| definition.is_mapping() && definition.get("default").is_none())
        .map(|(name, _)| scalar_text(name))
        .collect();

    if missing.is_empty() {
        return;
    }

    let mut preview = missing
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if missing.len() > 3 {
        preview.push_str("...");
    }
    log.warning(
        file,
        format!("{} input(s) without default values: {}", missing.len(), preview),
        None,
    );
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}
