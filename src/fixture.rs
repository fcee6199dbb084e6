//! Test units.
//!
//! A [`Fixture`] pairs the engine under test with the [`Recorder`] of one test unit. Oracle operations are methods on
//! the fixture (see [`crate::oracle`]); each one performs a single engine invocation, compares the outcome to the
//! expectation and records any failure. Nothing escapes an oracle call except through the verdict.

use rexcheck_core::{CompileFailure, Engine, SyntaxOptions, Text, TextUnit};
use rexcheck_engine::RegexEngine;
use thiserror::Error;

use crate::diagnostics::{Diagnostic, regex_call};
use crate::oracle::{self, SearchOracle};
use crate::recorder::{Recorder, Reporter};

/// A test unit that could not be set up.
///
/// Unlike assertion failures, setup errors are returned to the caller instead of being recorded.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to construct {call}: {source}")]
    Compile {
        /// The constructor call, e.g. `regex("a(b", 0x1)`.
        call: String,
        #[source]
        source: CompileFailure,
    },
}

/// The engine under test plus the outcome recorder of one test unit.
#[derive(Debug)]
pub struct Fixture<E: Engine = RegexEngine> {
    engine: E,
    recorder: Recorder,
}

impl Fixture<RegexEngine> {
    /// A fixture over the bundled `regex` adapter, reporting to the console.
    pub fn new() -> Self {
        Self::with_engine(RegexEngine::new())
    }
}

impl Default for Fixture<RegexEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Engine> Fixture<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            recorder: Recorder::new(),
        }
    }

    /// Replace the reporter. Call before issuing any oracle operations.
    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.recorder = Recorder::with_reporter(reporter);
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn fail(&self) {
        self.recorder.fail();
    }

    /// `0` when every check passed, `1` otherwise.
    pub fn result(&self) -> i32 {
        self.recorder.result()
    }

    pub fn verify(&self, condition: bool) {
        self.recorder.verify(condition);
    }

    pub fn passed(&self) -> bool {
        self.recorder.passed()
    }

    pub fn failure_count(&self) -> usize {
        self.recorder.failure_count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.recorder.diagnostics()
    }

    pub(crate) fn record(&self, diagnostic: Diagnostic) {
        self.recorder.record(diagnostic);
    }

    /// Compile a pattern for use with the `*_compiled` match operations.
    ///
    /// Engine panics are returned as faults.
    pub fn compile<P>(&self, pattern: &P, syntax: SyntaxOptions) -> Result<E::Pattern<P::Unit>, CompileFailure>
    where
        P: Text + ?Sized,
    {
        oracle::compile_guarded(&self.engine, pattern.units(), syntax)
    }

    /// Build a search oracle around `pattern`.
    ///
    /// The pattern is compiled once, here. A pattern that does not compile is a setup error, not a recorded failure.
    #[tracing::instrument(skip_all, fields(syntax = syntax.bits()))]
    pub fn search<P>(&self, pattern: &P, syntax: SyntaxOptions) -> Result<SearchOracle<'_, P::Unit, E>, SetupError>
    where
        P: Text + ?Sized,
    {
        let units = pattern.units();
        match self.compile(pattern, syntax) {
            Ok(compiled) => Ok(SearchOracle::new(self, units.to_vec(), syntax, compiled)),
            Err(source) => {
                tracing::error!(error = %source, "search pattern failed to compile");
                Err(SetupError::Compile {
                    call: regex_call(units, syntax),
                    source,
                })
            }
        }
    }

    /// Compile narrow or wide units directly.
    pub(crate) fn compile_units<U: TextUnit>(
        &self,
        pattern: &[U],
        syntax: SyntaxOptions,
    ) -> Result<E::Pattern<U>, CompileFailure> {
        oracle::compile_guarded(&self.engine, pattern, syntax)
    }
}
