//! Case-file runner
//!
//! ## RunReporter Trait
//!
//! The runner uses a `RunReporter` trait to separate unit-level reporting from
//! execution. Failure diagnostics inside a unit go through the recorder's own
//! `Reporter`; this trait only sees unit verdicts and the final summary.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::cases::{self, CaseFile};
use crate::fixture::Fixture;

use super::{CliError, CliResult, ExitCode, ReporterKind};

/// Options for `rexcheck run`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub verbose: bool,
    pub stop_on_fail: bool,
    pub filter: Option<String>,
    pub reporter: ReporterKind,
}

// ============================================================================
// Run Reporter Trait
// ============================================================================

/// Trait for reporting unit verdicts.
pub trait RunReporter {
    /// Called when a case file has been loaded
    fn on_file_loaded(&mut self, _path: &Path, _units: usize) {}

    /// Called when a unit begins
    fn on_unit_start(&mut self, name: &str);

    /// Called when a unit completes
    fn on_unit_complete(&mut self, name: &str, result: &UnitResult);

    /// Called when all units have completed
    fn on_run_complete(&mut self, summary: &RunSummary);
}

/// Verdict of one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitResult {
    Passed(Duration),
    /// Failed, with the number of recorded diagnostics.
    Failed(Duration, usize),
    /// The unit could not be set up; its remaining checks did not run.
    SetupError(String),
}

/// Summary of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub duration: Duration,
}

impl RunSummary {
    fn add(&mut self, result: &UnitResult) {
        self.total += 1;
        match result {
            UnitResult::Passed(_) => self.passed += 1,
            UnitResult::Failed(_, _) => self.failed += 1,
            UnitResult::SetupError(_) => self.errors += 1,
        }
    }

    /// Exit status for the run.
    pub fn exit_code(&self) -> ExitCode {
        if self.errors > 0 {
            ExitCode::SETUP_ERROR
        } else if self.failed > 0 {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Default console reporter (pytest-style)
#[derive(Debug, Default)]
pub struct ConsoleRunReporter {
    pub verbose: bool,
}

impl ConsoleRunReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl RunReporter for ConsoleRunReporter {
    fn on_file_loaded(&mut self, path: &Path, units: usize) {
        if self.verbose {
            eprintln!("{}: {} unit(s)", path.display(), units);
        }
    }

    fn on_unit_start(&mut self, name: &str) {
        if self.verbose {
            eprint!("{} ... ", name);
        }
    }

    fn on_unit_complete(&mut self, name: &str, result: &UnitResult) {
        let status = match result {
            UnitResult::Passed(d) => {
                if self.verbose {
                    format!("\x1b[32mPASSED\x1b[0m ({:.0}ms)", d.as_millis())
                } else {
                    "\x1b[32m.\x1b[0m".to_string()
                }
            }
            UnitResult::Failed(d, count) => {
                if self.verbose {
                    format!("\x1b[31mFAILED\x1b[0m ({} failure(s), {:.0}ms)", count, d.as_millis())
                } else {
                    "\x1b[31mF\x1b[0m".to_string()
                }
            }
            UnitResult::SetupError(_) => {
                if self.verbose {
                    "\x1b[31mERROR\x1b[0m".to_string()
                } else {
                    "\x1b[31mE\x1b[0m".to_string()
                }
            }
        };

        if self.verbose {
            eprintln!("{}", status);
        } else {
            eprint!("{}", status);
        }

        if let UnitResult::SetupError(message) = result {
            eprintln!("\n\x1b[31m{}\x1b[0m: {}", name, message);
        }
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        if !self.verbose {
            eprintln!();
        }

        let mut parts = Vec::new();
        if summary.passed > 0 {
            parts.push(format!("\x1b[32m{} passed\x1b[0m", summary.passed));
        }
        if summary.failed > 0 {
            parts.push(format!("\x1b[31m{} failed\x1b[0m", summary.failed));
        }
        if summary.errors > 0 {
            parts.push(format!("\x1b[31m{} error(s)\x1b[0m", summary.errors));
        }
        if parts.is_empty() {
            parts.push("no units collected".to_string());
        }

        eprintln!("====== {} in {:.2}s ======", parts.join(", "), summary.duration.as_secs_f64());
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Load and run every case file, reporting to the console.
pub fn run_case_files(files: &[PathBuf], options: &RunOptions) -> CliResult<ExitCode> {
    let mut reporter = ConsoleRunReporter::new(options.verbose);
    let summary = run_with_reporter(files, options, &mut reporter)?;
    match summary.exit_code() {
        ExitCode::SUCCESS => Ok(ExitCode::SUCCESS),
        // Summary already printed.
        code => Err(CliError::new("", code)),
    }
}

/// Load every file first, then run the selected units in order.
///
/// A file that fails to load aborts the run before any unit executes.
pub fn run_with_reporter(
    files: &[PathBuf],
    options: &RunOptions,
    reporter: &mut dyn RunReporter,
) -> CliResult<RunSummary> {
    let start_time = Instant::now();

    let mut loaded = Vec::with_capacity(files.len());
    for path in files {
        let file = CaseFile::load(path).map_err(|e| CliError::setup(format!("{:?}", miette::Report::new(e))))?;
        reporter.on_file_loaded(path, file.units.len());
        loaded.push(file);
    }

    let mut summary = RunSummary::default();
    'files: for file in &loaded {
        for unit in file.selected(options.filter.as_deref()) {
            reporter.on_unit_start(&unit.name);

            let unit_start = Instant::now();
            let fixture = Fixture::new().with_reporter(options.reporter.build(options.verbose));
            let result = match cases::run_unit(&fixture, unit) {
                Ok(0) => UnitResult::Passed(unit_start.elapsed()),
                Ok(_) => UnitResult::Failed(unit_start.elapsed(), fixture.failure_count()),
                Err(err) => UnitResult::SetupError(err.to_string()),
            };

            reporter.on_unit_complete(&unit.name, &result);
            summary.add(&result);

            if options.stop_on_fail && !matches!(result, UnitResult::Passed(_)) {
                break 'files;
            }
        }
    }

    summary.duration = start_time.elapsed();
    reporter.on_run_complete(&summary);
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_prefers_setup_errors() {
        let mut summary = RunSummary::default();
        assert_eq!(summary.exit_code(), ExitCode::SUCCESS);
        summary.add(&UnitResult::Failed(Duration::ZERO, 1));
        assert_eq!(summary.exit_code(), ExitCode::FAILURE);
        summary.add(&UnitResult::SetupError("bad pattern".to_string()));
        assert_eq!(summary.exit_code(), ExitCode::SETUP_ERROR);
        assert_eq!(summary.total, 2);
    }

    #[test]
    fn missing_file_is_a_setup_error() {
        let mut reporter = ConsoleRunReporter::default();
        let err = run_with_reporter(
            &[PathBuf::from("does/not/exist.json")],
            &RunOptions::default(),
            &mut reporter,
        )
        .unwrap_err();
        assert_eq!(err.exit_code, ExitCode::SETUP_ERROR);
    }
}
