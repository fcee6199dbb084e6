//! Whole-subject match oracle.

use rexcheck_core::{CompileFailure, Engine, SyntaxOptions, Text, TextUnit};

use crate::diagnostics::{Diagnostic, quoted, regex_call};
use crate::fixture::Fixture;

use super::match_checked;

impl<E: Engine> Fixture<E> {
    /// Compile `pattern` under `syntax` and require it to match the whole of `subject`.
    pub fn should_match<S, P>(&self, subject: &S, pattern: &P, syntax: SyntaxOptions)
    where
        S: Text + ?Sized,
        P: Text<Unit = S::Unit> + ?Sized,
    {
        self.check_match("should_match", subject.units(), pattern.units(), syntax, true);
    }

    /// Compile `pattern` under `syntax` and require it not to match the whole of `subject`.
    pub fn should_not_match<S, P>(&self, subject: &S, pattern: &P, syntax: SyntaxOptions)
    where
        S: Text + ?Sized,
        P: Text<Unit = S::Unit> + ?Sized,
    {
        self.check_match("should_not_match", subject.units(), pattern.units(), syntax, false);
    }

    /// Like [`Fixture::should_match`], reusing a pattern built by [`Fixture::compile`].
    ///
    /// `pattern` and `syntax` are only used in diagnostics.
    pub fn should_match_compiled<S, P>(
        &self,
        subject: &S,
        pattern: &P,
        compiled: &E::Pattern<S::Unit>,
        syntax: SyntaxOptions,
    ) where
        S: Text + ?Sized,
        P: Text<Unit = S::Unit> + ?Sized,
    {
        self.check_compiled_match("should_match", subject.units(), pattern.units(), compiled, syntax, true);
    }

    /// Like [`Fixture::should_not_match`], reusing a pattern built by [`Fixture::compile`].
    pub fn should_not_match_compiled<S, P>(
        &self,
        subject: &S,
        pattern: &P,
        compiled: &E::Pattern<S::Unit>,
        syntax: SyntaxOptions,
    ) where
        S: Text + ?Sized,
        P: Text<Unit = S::Unit> + ?Sized,
    {
        self.check_compiled_match("should_not_match", subject.units(), pattern.units(), compiled, syntax, false);
    }

    /// Require an ECMAScript `pattern` with exactly one capture group to match all of `subject`, capturing `group`.
    ///
    /// Group 0 and group 1 are checked independently; one call may record both.
    pub fn should_capture<S, P, G>(&self, subject: &S, pattern: &P, group: &G)
    where
        S: Text + ?Sized,
        P: Text<Unit = S::Unit> + ?Sized,
        G: Text<Unit = S::Unit> + ?Sized,
    {
        const OP: &str = "should_capture";
        let (subject, pattern, group) = (subject.units(), pattern.units(), group.units());
        let call = format!("{OP}({}, {}, {})", quoted(subject), quoted(pattern), quoted(group));

        let compiled = match self.compile_units(pattern, SyntaxOptions::ECMASCRIPT) {
            Ok(compiled) => compiled,
            Err(failure) => {
                let message = format!("{call}: failed to compile: {failure}");
                self.record(compile_failure(OP, &failure, message));
                return;
            }
        };

        let result = match match_checked(self.engine(), subject, &compiled) {
            Ok(Some(result)) => result,
            Ok(None) => {
                self.record(Diagnostic::mismatch(
                    OP,
                    format!("Expected {} to match {}.", regex_call(pattern, SyntaxOptions::ECMASCRIPT), quoted(subject)),
                ));
                return;
            }
            Err(fault) => {
                self.record(Diagnostic::engine_fault(OP, format!("{call}: engine fault: {fault}")));
                return;
            }
        };

        if result.len() != 2 {
            self.record(Diagnostic::mismatch(OP, format!("{call}: bad group count ({})", result.len())));
            return;
        }

        let whole = result.whole_text(subject).unwrap_or_default();
        if whole != subject {
            self.record(Diagnostic::mismatch(OP, format!("{call}: m[0] == {}", quoted(whole))));
        }

        let captured = result.get(1).and_then(|g| g.text(subject)).unwrap_or_default();
        if captured != group {
            self.record(Diagnostic::mismatch(OP, format!("{call}: m[1] == {}", quoted(captured))));
        }
    }

    fn check_match<U: TextUnit>(
        &self,
        op: &'static str,
        subject: &[U],
        pattern: &[U],
        syntax: SyntaxOptions,
        expected: bool,
    ) {
        match self.compile_units(pattern, syntax) {
            Ok(compiled) => self.check_compiled_match(op, subject, pattern, &compiled, syntax, expected),
            Err(failure) => {
                let message = format!("Failed to construct {}: {failure}", regex_call(pattern, syntax));
                self.record(compile_failure(op, &failure, message));
            }
        }
    }

    fn check_compiled_match<U: TextUnit>(
        &self,
        op: &'static str,
        subject: &[U],
        pattern: &[U],
        compiled: &E::Pattern<U>,
        syntax: SyntaxOptions,
        expected: bool,
    ) {
        let call = format!("regex_match({}, {})", quoted(subject), regex_call(pattern, syntax));
        match match_checked(self.engine(), subject, compiled) {
            Ok(outcome) if outcome.is_some() == expected => {}
            Ok(_) => self.record(Diagnostic::mismatch(op, format!("Expected {call} to be {expected}."))),
            Err(fault) => self.record(Diagnostic::engine_fault(op, format!("Failed to {call}: engine fault: {fault}"))),
        }
    }
}

/// Rejections are compile errors; anything else the engine raised while compiling is a fault.
pub(super) fn compile_failure(op: &'static str, failure: &CompileFailure, message: String) -> Diagnostic {
    match failure {
        CompileFailure::Rejected(_) => Diagnostic::compile_error(op, message),
        CompileFailure::Fault(_) => Diagnostic::engine_fault(op, message),
    }
}
