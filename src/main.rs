//! Blueprint Validation - Entry Point
//!
//! Dispatches the requested phase(s):
//! - no subcommand: YAML lint + blueprint validation
//! - `lint`: yamllint only
//! - `validate`: blueprint structure validation only
//!
//! Exit code is 0 when every requested phase passed, 1 otherwise. Warnings
//! never fail a run; only errors (and a missing linter) do.

use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use blueprint_validate::{
    BlueprintValidator, Reporter, ValidationError, ValidatorConfig, YamlLinter,
};

/// Command line interface for blueprint validation
#[derive(Parser, Debug)]
#[command(name = "blueprint-validate")]
#[command(about = "Validate Home Assistant blueprint YAML files")]
#[command(version)]
struct Cli {
    /// Directory containing blueprint YAML files
    #[arg(short, long, default_value = "blueprints")]
    dir: std::path::PathBuf,

    /// Emit the validation report as JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Phase>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Run only YAML style linting (yamllint)
    Lint,
    /// Run only blueprint structure validation
    Validate,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Help and version exit 0; anything else (unknown verb, bad flag) is a
    // usage failure and exits 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    ExitCode::SUCCESS
                }
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let run_lint = matches!(cli.command, None | Some(Phase::Lint));
    let run_validate = matches!(cli.command, None | Some(Phase::Validate));
    let run_all = cli.command.is_none();

    let mut success = true;

    if run_lint && !lint_phase(&cli.dir) {
        success = false;
    }

    if run_validate && !validate_phase(cli)? {
        success = false;
    }

    if run_all {
        let banner = Reporter::banner();
        println!("\n{banner}");
        if success {
            println!("[PASS] All validations passed!");
        } else {
            println!("[FAIL] Some validations failed. See above for details.");
        }
        println!("{banner}\n");
    }

    Ok(success)
}

/// Delegate to yamllint; a missing binary is a failed phase, not a crash
fn lint_phase(dir: &Path) -> bool {
    let banner = Reporter::banner();
    println!("\n{banner}\nRunning YAML Linter (yamllint)\n{banner}");

    match YamlLinter::check_path(dir) {
        Ok(true) => {
            println!("\n[PASS] YAML linting passed!");
            true
        }
        Ok(false) => {
            println!("\n[FAIL] YAML linting failed!");
            false
        }
        Err(ValidationError::LinterMissing(name)) => {
            println!("\n[ERROR] {name} not found!");
            println!("Install it with: pip install yamllint");
            false
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to run yamllint");
            println!("\n[ERROR] Failed to run yamllint: {err}");
            false
        }
    }
}

fn validate_phase(cli: &Cli) -> anyhow::Result<bool> {
    if !cli.json {
        println!("{}", Reporter::validation_header());
    }

    let config = ValidatorConfig::new(&cli.dir);
    let mut validator = BlueprintValidator::with_config(config);
    let report = validator.validate_all()?;

    if cli.json {
        println!("{}", Reporter::to_json(&report));
    } else {
        print!("{}", Reporter::to_text(&report));
    }

    Ok(report.passed)
}
