//! CLI module for the rexcheck conformance oracle
//!
//! ## Commands
//!
//! - `run <FILE>...` - Run JSON case files against the bundled engine
//! - `vocab` - List syntax options, match flags and error classes with their numeric values
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `runner` - Case-file execution and unit reporting
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
pub mod runner;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use crate::recorder::{ConsoleReporter, Reporter, SilentReporter, TracingReporter};
use crate::version::REXCHECK_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// At least one unit failed.
    pub const FAILURE: ExitCode = ExitCode(1);
    /// A case file could not be loaded or a unit could not be set up.
    pub const SETUP_ERROR: ExitCode = ExitCode(2);
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
    /// Create an error with an explicit exit code. An empty message prints nothing.
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

    /// Create a setup error (exit code 2).
    pub fn setup(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::SETUP_ERROR)
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

/// Conformance oracle for regular-expression engines
#[derive(Parser, Debug)]
#[command(name = "rexcheck")]
#[command(version = REXCHECK_VERSION)]
#[command(about = "Conformance oracle for regular-expression engines", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run JSON case files
    Run {
        /// Case files to run
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
        /// Stop on first failing unit
        #[arg(short = 'x', long = "exitfirst")]
        stop_on_fail: bool,
        /// Only run units whose name contains EXPR
        #[arg(short = 'k', value_name = "EXPR")]
        filter: Option<String>,
        /// Where failure diagnostics go
        #[arg(long, value_enum, default_value_t = ReporterKind::Console)]
        reporter: ReporterKind,
    },

    /// List syntax options, match flags and error classes
    Vocab,
}

/// Diagnostic reporter selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReporterKind {
    /// Print diagnostics to stdout
    #[default]
    Console,
    /// Emit diagnostics as tracing events
    Tracing,
    /// Keep diagnostics in the run summary only
    Silent,
}

impl ReporterKind {
    pub fn build(self, verbose: bool) -> Box<dyn Reporter> {
        match self {
            ReporterKind::Console => Box::new(ConsoleReporter::new(verbose)),
            ReporterKind::Tracing => Box::new(TracingReporter),
            ReporterKind::Silent => Box::new(SilentReporter),
        }
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
    match cli.command {
        Command::Run {
            files,
            verbose,
            stop_on_fail,
            filter,
            reporter,
        } => runner::run_case_files(
            &files,
            &runner::RunOptions {
                verbose,
                stop_on_fail,
                filter,
                reporter,
            },
        ),
        Command::Vocab => commands::print_vocab(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::try_parse_from(["rexcheck", "run", "a.json", "b.json"]).unwrap();
        if let Command::Run { files, reporter, .. } = cli.command {
            assert_eq!(files, [PathBuf::from("a.json"), PathBuf::from("b.json")]);
            assert_eq!(reporter, ReporterKind::Console);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_parse_run_flags() {
        let cli = Cli::try_parse_from(["rexcheck", "run", "-v", "-x", "-k", "dates", "--reporter", "silent", "a.json"])
            .unwrap();
        if let Command::Run {
            verbose,
            stop_on_fail,
            filter,
            reporter,
            ..
        } = cli.command
        {
            assert!(verbose);
            assert!(stop_on_fail);
            assert_eq!(filter.as_deref(), Some("dates"));
            assert_eq!(reporter, ReporterKind::Silent);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_run_requires_files() {
        assert!(Cli::try_parse_from(["rexcheck", "run"]).is_err());
    }

    #[test]
    fn test_cli_error_exit_codes() {
        assert_eq!(CliError::setup("bad file").exit_code, ExitCode::SETUP_ERROR);
        assert_eq!(CliError::failure("1 failed").exit_code, ExitCode::FAILURE);
        let silent = CliError::new("", ExitCode::FAILURE);
        assert!(silent.message.is_empty());
        assert_eq!(silent.to_string(), "");
    }

    #[test]
    fn test_cli_parse_vocab() {
        let cli = Cli::try_parse_from(["rexcheck", "vocab"]).unwrap();
        assert!(matches!(cli.command, Command::Vocab));
    }

    #[test]
    fn test_cli_rejects_unknown_reporter() {
        assert!(Cli::try_parse_from(["rexcheck", "run", "--reporter", "json", "a.json"]).is_err());
    }
}
