//! The seam between the harness and the engine under test.
//!
//! Engine outcomes are tagged results. Compilation has three outcomes (a compiled pattern, an expected rejection with an
//! [`ErrorClass`], or an unexpected [`EngineFault`]); matching and substitution have two (a value or a fault).

use thiserror::Error;

use crate::error_class::ErrorClass;
use crate::options::{MatchFlags, SyntaxOptions};
use crate::result::MatchResult;
use crate::text::{TextError, TextUnit};

/// What kind of unexpected failure an engine raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// The grammar or a syntax option is not supported by this engine.
    UnsupportedSyntax,
    /// A match flag is not supported by this engine.
    UnsupportedFlags,
    /// The pattern uses a construct this engine cannot execute.
    UnsupportedFeature,
    /// Input text is ill-formed for its width.
    InvalidText,
    /// The engine panicked; recorded by the harness.
    Panic,
    /// The engine returned a result that breaks the result invariants.
    BrokenInvariant,
    Internal,
}

/// An unexpected engine failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineFault {
    pub kind: FaultKind,
    pub message: String,
}

impl EngineFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<TextError> for EngineFault {
    fn from(err: TextError) -> Self {
        EngineFault::new(FaultKind::InvalidText, err.to_string())
    }
}

/// A classified pattern rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{class}: {message}")]
pub struct CompileError {
    pub class: ErrorClass,
    pub message: String,
}

impl CompileError {
    pub fn new(class: ErrorClass, message: impl Into<String>) -> Self {
        Self {
            class,
            message: message.into(),
        }
    }
}

/// Why a pattern did not compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileFailure {
    /// The pattern is malformed under the chosen syntax.
    #[error("pattern rejected: {0}")]
    Rejected(CompileError),

    /// The engine failed for a reason other than a malformed pattern.
    #[error("engine fault: {0}")]
    Fault(#[from] EngineFault),
}

impl From<CompileError> for CompileFailure {
    fn from(err: CompileError) -> Self {
        CompileFailure::Rejected(err)
    }
}

impl From<TextError> for CompileFailure {
    fn from(err: TextError) -> Self {
        CompileFailure::Fault(err.into())
    }
}

/// A pattern-matching engine the harness can drive.
///
/// Every method is generic over the text unit so one engine serves narrow and wide text. Offsets in results are in
/// units of `U`, measured from the start of the subject.
pub trait Engine {
    /// A compiled pattern. Immutable once built.
    type Pattern<U: TextUnit>;

    /// Short engine name for diagnostics.
    fn name(&self) -> &str;

    /// Compile `pattern` under `syntax`.
    fn compile<U: TextUnit>(&self, pattern: &[U], syntax: SyntaxOptions) -> Result<Self::Pattern<U>, CompileFailure>;

    /// Number of capture groups in `pattern`, excluding group 0.
    fn capture_count<U: TextUnit>(&self, pattern: &Self::Pattern<U>) -> usize;

    /// Match the whole of `subject`. `Some` holds the groups of the full match.
    fn match_whole<U: TextUnit>(
        &self,
        subject: &[U],
        pattern: &Self::Pattern<U>,
    ) -> Result<Option<MatchResult>, EngineFault>;

    /// Find the first match anywhere in `subject`.
    fn search<U: TextUnit>(
        &self,
        subject: &[U],
        pattern: &Self::Pattern<U>,
        flags: MatchFlags,
    ) -> Result<Option<MatchResult>, EngineFault>;

    /// Replace non-overlapping matches in `subject` by expanding `template`.
    fn substitute<U: TextUnit>(
        &self,
        subject: &[U],
        pattern: &Self::Pattern<U>,
        template: &[U],
        flags: MatchFlags,
    ) -> Result<Vec<U>, EngineFault>;
}
