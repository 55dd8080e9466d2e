//! External Linter Delegation
//!
//! Generic YAML style checking is delegated to `yamllint` as a subprocess.
//! Its stdout/stderr pass straight through to the terminal; the exit code
//! is the only signal consumed. A missing binary is an environment problem,
//! reported distinctly from document diagnostics.

use std::io;
use std::path::Path;
use std::process::Command;

use crate::{Result, ValidationError};

/// yamllint subprocess wrapper
pub struct YamlLinter;

impl YamlLinter {
    pub const COMMAND: &'static str = "yamllint";

    /// Run yamllint against a path, inheriting the standard streams
    ///
    /// Returns `Ok(true)` when the linter exits zero, `Ok(false)` on any
    /// lint finding, and [`ValidationError::LinterMissing`] when the binary
    /// is not on `PATH`.
    pub fn check_path(path: &Path) -> Result<bool> {
        tracing::debug!(path = %path.display(), "running yamllint");

        let status = Command::new(Self::COMMAND).arg(path).status();
        match status {
            Ok(status) => Ok(status.success()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(ValidationError::LinterMissing(Self::COMMAND.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}
