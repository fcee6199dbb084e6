//! Outcome recorder.
//!
//! A [`Recorder`] holds the verdict of one test unit. The verdict is monotonic: once a failure is recorded it never
//! reverts to passed. Every failure is also sent to a [`Reporter`], the observation channel for diagnostics. Reporting
//! is advisory and never affects the verdict.
//!
//! ## Reporter Trait
//!
//! Reporting is separated from recording so output formats can change without touching the oracles:
//!
//! - [`ConsoleReporter`] prints each diagnostic to stdout (the default).
//! - [`TracingReporter`] emits each diagnostic as a structured `tracing` event.
//! - [`SilentReporter`] drops them; the recorder still retains every diagnostic.
//!
//! ## Notes
//!
//! - The recorder uses `Cell`/`RefCell` and is not `Sync`. One recorder belongs to one test unit on one thread.

use std::cell::{Cell, RefCell};
use std::fmt;

use crate::diagnostics::Diagnostic;

// ============================================================================
// Reporter Trait
// ============================================================================

/// Observation channel for recorded failures.
pub trait Reporter {
    /// Called once for every recorded diagnostic, in recording order.
    fn report(&mut self, diagnostic: &Diagnostic);
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Prints diagnostics to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    /// Prefix each message with its failure kind and operation.
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, diagnostic: &Diagnostic) {
        if self.verbose {
            println!(
                "\x1b[31m[{}]\x1b[0m {}: {}",
                diagnostic.kind, diagnostic.operation, diagnostic.message
            );
        } else {
            println!("{}", diagnostic.message);
        }
    }
}

/// Emits diagnostics as `tracing` warnings with structured fields.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, diagnostic: &Diagnostic) {
        tracing::warn!(
            kind = %diagnostic.kind,
            operation = diagnostic.operation,
            "{}",
            diagnostic.message
        );
    }
}

/// Discards diagnostics.
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&mut self, _diagnostic: &Diagnostic) {}
}

// ============================================================================
// Recorder
// ============================================================================

/// Aggregate verdict and diagnostics for one test unit.
pub struct Recorder {
    failed: Cell<bool>,
    diagnostics: RefCell<Vec<Diagnostic>>,
    reporter: RefCell<Box<dyn Reporter>>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::with_reporter(ConsoleReporter::default())
    }
}

impl fmt::Debug for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("failed", &self.failed.get())
            .field("diagnostics", &self.diagnostics.borrow().len())
            .finish_non_exhaustive()
    }
}

impl Recorder {
    /// A passing recorder that reports to the console.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reporter(reporter: impl Reporter + 'static) -> Self {
        Self {
            failed: Cell::new(false),
            diagnostics: RefCell::new(Vec::new()),
            reporter: RefCell::new(Box::new(reporter)),
        }
    }

    /// Mark the unit failed. Idempotent.
    pub fn fail(&self) {
        self.failed.set(true);
    }

    /// `0` while passed, `1` once failed.
    pub fn result(&self) -> i32 {
        if self.failed.get() { 1 } else { 0 }
    }

    /// Fail when `condition` is false.
    pub fn verify(&self, condition: bool) {
        if !condition {
            self.fail();
        }
    }

    /// Report `diagnostic`, retain it, and fail the unit.
    pub fn record(&self, diagnostic: Diagnostic) {
        tracing::debug!(
            kind = %diagnostic.kind,
            operation = diagnostic.operation,
            "recorded failure"
        );
        self.reporter.borrow_mut().report(&diagnostic);
        self.diagnostics.borrow_mut().push(diagnostic);
        self.fail();
    }

    pub fn passed(&self) -> bool {
        !self.failed.get()
    }

    /// Number of diagnostics recorded so far. Bare `fail()` calls are not counted.
    pub fn failure_count(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// Snapshot of every diagnostic recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    /// Shares reported messages with the test body.
    struct Capture(Rc<RefCell<Vec<String>>>);

    impl Reporter for Capture {
        fn report(&mut self, diagnostic: &Diagnostic) {
            self.0.borrow_mut().push(diagnostic.message.clone());
        }
    }

    #[test]
    fn starts_passed() {
        let recorder = Recorder::with_reporter(SilentReporter);
        assert_eq!(recorder.result(), 0);
        assert!(recorder.passed());
    }

    #[test]
    fn fail_is_idempotent() {
        let recorder = Recorder::with_reporter(SilentReporter);
        recorder.fail();
        recorder.fail();
        assert_eq!(recorder.result(), 1);
        assert_eq!(recorder.failure_count(), 0);
    }

    #[test]
    fn verify_only_fails_on_false() {
        let recorder = Recorder::with_reporter(SilentReporter);
        recorder.verify(true);
        assert!(recorder.passed());
        recorder.verify(false);
        assert!(!recorder.passed());
        recorder.verify(true);
        assert_eq!(recorder.result(), 1);
    }

    #[test]
    fn record_reports_and_retains() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let recorder = Recorder::with_reporter(Capture(Rc::clone(&seen)));
        recorder.record(Diagnostic::mismatch("should_match", "first"));
        recorder.record(Diagnostic::engine_fault("should_search_fail", "second"));

        assert_eq!(*seen.borrow(), ["first", "second"]);
        assert_eq!(recorder.failure_count(), 2);
        assert_eq!(recorder.diagnostics()[1].operation, "should_search_fail");
        assert_eq!(recorder.result(), 1);
    }

    #[test]
    fn boxed_reporters_forward() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let boxed: Box<dyn Reporter> = Box::new(Capture(Rc::clone(&seen)));
        let recorder = Recorder::with_reporter(boxed);
        recorder.record(Diagnostic::mismatch("should_throw", "boxed"));
        assert_eq!(*seen.borrow(), ["boxed"]);
    }
}
