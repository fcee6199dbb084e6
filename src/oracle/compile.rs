//! Compilation-failure oracle.

use rexcheck_core::{CompileFailure, Engine, ErrorClass, SyntaxOptions, Text};

use crate::diagnostics::{Diagnostic, quoted, regex_type};
use crate::fixture::Fixture;

impl<E: Engine> Fixture<E> {
    /// Require `pattern` to be rejected under `syntax` with exactly `expected` as its error class.
    ///
    /// A pattern that compiles, a different class, and an engine fault are all failures.
    pub fn should_throw<P>(&self, pattern: &P, expected: ErrorClass, syntax: SyntaxOptions)
    where
        P: Text + ?Sized,
    {
        const OP: &str = "should_throw";
        let units = pattern.units();
        let call = format!("{} r({}, 0x{:X})", regex_type::<P::Unit>(), quoted(units), syntax.bits());

        match self.compile_units(units, syntax) {
            Ok(_) => self.record(Diagnostic::mismatch(OP, format!("{call} succeeded (which is bad)."))),
            Err(CompileFailure::Rejected(err)) if err.class == expected => {
                tracing::trace!(class = %err.class, "pattern rejected as expected");
            }
            Err(CompileFailure::Rejected(err)) => self.record(Diagnostic::mismatch(
                OP,
                format!("{call} threw {}; expected {expected}", err.class),
            )),
            Err(CompileFailure::Fault(fault)) => self.record(Diagnostic::engine_fault(
                OP,
                format!("{call} raised an engine fault instead of {expected}: {fault}"),
            )),
        }
    }
}
