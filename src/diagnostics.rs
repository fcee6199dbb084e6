//! Failure diagnostics.
//!
//! Every recorded failure is a [`Diagnostic`]: the failure kind, the oracle operation that produced it, and a rendered
//! message. Messages always carry the subject, pattern, syntax options and match flags (as hex bitmasks) together with
//! the expected and actual values, so a single line is enough to reproduce the call.
//!
//! ## Notes
//!
//! - Rendering is presentation only; the verdict is decided before a message is built.
//! - Text is rendered lossily (ill-formed units become U+FFFD) so a broken subject never hides the diagnostic.

use std::fmt;

use rexcheck_core::{Group, SyntaxOptions, TextUnit, TextWidth};

/// The three kinds of failure an oracle call can record. They are never conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The pattern was rejected where it should have compiled.
    CompileError,
    /// The engine failed unexpectedly (fault, panic, or a result that breaks the result invariants).
    EngineFault,
    /// The engine returned a well-formed result that differs from the expectation.
    Mismatch,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::CompileError => "compile error",
            FailureKind::EngineFault => "engine fault",
            FailureKind::Mismatch => "mismatch",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: FailureKind,
    /// Oracle operation name, e.g. `should_match`.
    pub operation: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: FailureKind, operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            operation,
            message: message.into(),
        }
    }

    pub fn compile_error(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(FailureKind::CompileError, operation, message)
    }

    pub fn engine_fault(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(FailureKind::EngineFault, operation, message)
    }

    pub fn mismatch(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(FailureKind::Mismatch, operation, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ============================================================================
// Rendering helpers
// ============================================================================

/// `"text"`, rendered lossily.
pub(crate) fn quoted<U: TextUnit>(units: &[U]) -> String {
    format!("\"{}\"", U::render(units))
}

/// Constructor name for a compiled pattern of width `U`.
pub(crate) fn regex_type<U: TextUnit>() -> &'static str {
    match U::WIDTH {
        TextWidth::Narrow => "regex",
        TextWidth::Wide => "wregex",
    }
}

/// `regex("pattern", 0x1)`.
pub(crate) fn regex_call<U: TextUnit>(pattern: &[U], syntax: SyntaxOptions) -> String {
    format!("{}({}, 0x{:X})", regex_type::<U>(), quoted(pattern), syntax.bits())
}

/// `"text" [start end]` for a matched group, `"(unmatched)" [-1 -1]` otherwise.
pub(crate) fn actual_group<U: TextUnit>(subject: &[U], group: Group) -> String {
    match (group.span(), group.text(subject)) {
        (Some(span), Some(text)) => format!("{} [{} {}]", quoted(text), span.start, span.end),
        (Some(span), None) => format!("\"(out of range)\" [{} {}]", span.start, span.end),
        (None, _) => "\"(unmatched)\" [-1 -1]".to_string(),
    }
}

/// An expected pair rendered the same way as [`actual_group`]. Sentinels show their raw offsets.
pub(crate) fn expected_group<U: TextUnit>(subject: &[U], (start, end): (isize, isize)) -> String {
    if start == -1 {
        return format!("\"(unmatched)\" [{start} {end}]");
    }
    let text = usize::try_from(start)
        .ok()
        .zip(usize::try_from(end).ok())
        .and_then(|(s, e)| subject.get(s..e));
    match text {
        Some(text) => format!("{} [{start} {end}]", quoted(text)),
        None => format!("\"(out of range)\" [{start} {end}]"),
    }
}

/// Join rendered groups as `{a, b, c}`.
pub(crate) fn group_list(rendered: impl IntoIterator<Item = String>) -> String {
    format!("{{{}}}", rendered.into_iter().collect::<Vec<_>>().join(", "))
}
