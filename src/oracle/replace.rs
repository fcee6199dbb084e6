//! Replacement oracle.

use rexcheck_core::{Engine, MatchFlags, SyntaxOptions, Text, TextUnit};

use crate::diagnostics::{Diagnostic, quoted};
use crate::fixture::Fixture;

use super::matching::compile_failure;
use super::substitute_guarded;

impl<E: Engine> Fixture<E> {
    /// Substitute `template` for every non-overlapping match of the ECMAScript `pattern` in `subject`, and require the
    /// output to equal `expected` unit for unit.
    pub fn should_replace_to<S, P, T, X>(&self, subject: &S, pattern: &P, template: &T, flags: MatchFlags, expected: &X)
    where
        S: Text + ?Sized,
        P: Text<Unit = S::Unit> + ?Sized,
        T: Text<Unit = S::Unit> + ?Sized,
        X: Text<Unit = S::Unit> + ?Sized,
    {
        const OP: &str = "should_replace_to";
        let (subject, pattern, template, expected) = (subject.units(), pattern.units(), template.units(), expected.units());
        let header = replace_header(subject, pattern, template, flags, expected);

        let compiled = match self.compile_units(pattern, SyntaxOptions::ECMASCRIPT) {
            Ok(compiled) => compiled,
            Err(failure) => {
                let message = format!("{header}): failed to compile: {failure}");
                self.record(compile_failure(OP, &failure, message));
                return;
            }
        };

        match substitute_guarded(self.engine(), subject, &compiled, template, flags) {
            Ok(output) if output == expected => {}
            Ok(output) => self.record(Diagnostic::mismatch(
                OP,
                format!("{header}): bad answer, returned: {}", quoted(output.as_slice())),
            )),
            Err(fault) => self.record(Diagnostic::engine_fault(
                OP,
                format!("{header}): substitution failed: engine fault: {fault}"),
            )),
        }
    }
}

fn replace_header<U: TextUnit>(
    subject: &[U],
    pattern: &[U],
    template: &[U],
    flags: MatchFlags,
    expected: &[U],
) -> String {
    format!(
        "should_replace_to(\nsubject:     {}\npattern:     {}\nfmt:         {}\nmatch_flags: 0x{:X}\nexpected:    {}\n",
        quoted(subject),
        quoted(pattern),
        quoted(template),
        flags.bits(),
        quoted(expected)
    )
}
