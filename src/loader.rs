//! Tagged-Scalar YAML Loading
//!
//! Home Assistant YAML uses three non-standard tags (`!input`, `!include`,
//! `!secret`) that a stock parser either rejects or drops. Documents are
//! loaded through this module so each tagged scalar survives as an inert
//! marker string (`"!input my_value"`). No rule dereferences the tags; they
//! only need to remain detectable in the tree and the raw text.

use serde_yaml::value::TaggedValue;
use serde_yaml::Value;
use thiserror::Error;

/// Failure to turn file text into a usable YAML tree
///
/// Carries the 1-based line of the offending construct when the parser
/// exposes one.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LoadError {
    pub message: String,
    pub line: Option<usize>,
}

/// The non-standard tags recognized in blueprint documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlueprintTag {
    /// `!input` - substituted from a blueprint input at instantiation
    Input,
    /// `!include` - inlined from another file
    Include,
    /// `!secret` - resolved from the secret store
    Secret,
}

impl BlueprintTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "!input",
            Self::Include => "!include",
            Self::Secret => "!secret",
        }
    }

    fn from_tag(tag: &serde_yaml::value::Tag) -> Option<Self> {
        if *tag == "input" {
            Some(Self::Input)
        } else if *tag == "include" {
            Some(Self::Include)
        } else if *tag == "secret" {
            Some(Self::Secret)
        } else {
            None
        }
    }
}

/// A scalar carrying one of the recognized tags
///
/// Tag and content are kept as separate fields; flattening to the marker
/// string happens only at the point the value re-enters the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedScalar {
    pub tag: BlueprintTag,
    pub value: String,
}

impl TaggedScalar {
    /// Render the marker string placed into the parsed tree
    pub fn marker(&self) -> String {
        format!("{} {}", self.tag.as_str(), self.value)
    }
}

impl std::fmt::Display for TaggedScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.tag.as_str(), self.value)
    }
}

/// Parse blueprint YAML into a tree with the three custom tags resolved
///
/// Any other non-standard tag is a parse error, matching the behavior of a
/// safe loader with only these constructors registered.
pub fn parse_document(text: &str) -> Result<Value, LoadError> {
    let value: Value = serde_yaml::from_str(text).map_err(|err| LoadError {
        line: err.location().map(|loc| loc.line()),
        message: format!("YAML syntax error: {err}"),
    })?;
    resolve_tags(value)
}

fn resolve_tags(value: Value) -> Result<Value, LoadError> {
    match value {
        Value::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            let Some(tag) = BlueprintTag::from_tag(&tag) else {
                return Err(LoadError {
                    message: format!("YAML syntax error: could not determine a constructor for the tag '{tag}'"),
                    line: None,
                });
            };
            let scalar = TaggedScalar {
                value: scalar_content(&tag, value)?,
                tag,
            };
            Ok(Value::String(scalar.marker()))
        }
        Value::Mapping(mapping) => {
            let mut resolved = serde_yaml::Mapping::with_capacity(mapping.len());
            for (key, val) in mapping {
                resolved.insert(resolve_tags(key)?, resolve_tags(val)?);
            }
            Ok(Value::Mapping(resolved))
        }
        Value::Sequence(sequence) => {
            let resolved = sequence
                .into_iter()
                .map(resolve_tags)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Sequence(resolved))
        }
        other => Ok(other),
    }
}

fn scalar_content(tag: &BlueprintTag, value: Value) -> Result<String, LoadError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        _ => Err(LoadError {
            message: format!(
                "YAML syntax error: expected a scalar node for the tag '{}'",
                tag.as_str()
            ),
            line: None,
        }),
    }
}
