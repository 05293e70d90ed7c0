//! CLI module for diaggen
//!
//! This module provides the command-line interface for the generator.
//!
//! ## Commands
//!
//! Every subcommand is one output artifact and takes the same arguments:
//!
//! - `defs <input>` - `DIAG(...)` definition rows
//! - `enums <input>` - `DIAG_ENUM` listings
//! - `compat-ids <input>` - `DIAG_COMPAT_ID` rows
//! - `iface <input> --component NAME` - per-component interface header
//! - `groups <input>` - group arrays, descriptor rows and category table
//! - `index-name <input>` - `DIAG_NAME_INDEX` rows
//! - `docs <input>` - reStructuredText reference
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::backend::Action;
use crate::config::GenConfig;
use crate::version::DIAGGEN_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create an error with a custom exit code.
    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self::new(message, ExitCode(code))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate diagnostic tables and documentation from a diagnostic record database
#[derive(Parser, Debug)]
#[command(name = "diaggen")]
#[command(version = DIAGGEN_VERSION)]
#[command(about = "Generate diagnostic tables and documentation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Emit DIAG(...) definition rows
    Defs(GenerateArgs),
    /// Emit DIAG_ENUM listings for %enum_select
    Enums(GenerateArgs),
    /// Emit DIAG_COMPAT_ID rows
    CompatIds(GenerateArgs),
    /// Emit the interface header of one component (requires --component)
    Iface(GenerateArgs),
    /// Emit group arrays, group descriptors and the category table
    Groups(GenerateArgs),
    /// Emit DIAG_NAME_INDEX rows
    IndexName(GenerateArgs),
    /// Emit the reStructuredText reference of every diagnostic group
    Docs(GenerateArgs),
}

impl Command {
    pub fn action(&self) -> Action {
        match self {
            Command::Defs(_) => Action::Defs,
            Command::Enums(_) => Action::Enums,
            Command::CompatIds(_) => Action::CompatIds,
            Command::Iface(_) => Action::Iface,
            Command::Groups(_) => Action::Groups,
            Command::IndexName(_) => Action::IndexName,
            Command::Docs(_) => Action::Docs,
        }
    }

    pub fn args(&self) -> &GenerateArgs {
        match self {
            Command::Defs(args)
            | Command::Enums(args)
            | Command::CompatIds(args)
            | Command::Iface(args)
            | Command::Groups(args)
            | Command::IndexName(args)
            | Command::Docs(args) => args,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Record database (JSON)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the output to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only emit diagnostics of this component
    #[arg(long, value_name = "NAME")]
    pub component: Option<String>,

    /// Skip the summary wording checks
    #[arg(long)]
    pub no_verify_wording: bool,

    /// Do not prefix the output with the generated-file banner
    #[arg(long)]
    pub no_header: bool,
}

impl GenerateArgs {
    pub fn config(&self) -> GenConfig {
        let mut config = GenConfig::new()
            .with_verify_wording(!self.no_verify_wording)
            .with_header(!self.no_header);
        if let Some(component) = &self.component {
            config = config.with_component(component.clone());
        }
        config
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let action = cli.command.action();
    let args = cli.command.args();
    commands::generate_file(action, &args.input, args.output.as_deref(), &args.config())
}

// ============================================================================
// Tests
// ============================================================================
