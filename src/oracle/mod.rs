//! Oracle operations.
//!
//! ## Modules
//!
//! - `matching` - whole-subject match / no-match and single-group capture checks
//! - `search` - [`SearchOracle`], unanchored search with per-group span checks
//! - `replace` - templated substitution checks
//! - `compile` - expected compilation failures
//!
//! ## Engine boundary
//!
//! Every engine call goes through the guards in this module. A panic inside the engine becomes an
//! [`EngineFault`] of kind [`FaultKind::Panic`], and every match result is checked against the result invariants
//! (group count is capture count + 1, group 0 is matched, spans lie inside the subject) before any comparison. A
//! violation is reported as a [`FaultKind::BrokenInvariant`] fault instead of a mismatch.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod compile;
mod matching;
mod replace;
pub mod search;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rexcheck_core::{
    CompileFailure, Engine, EngineFault, FaultKind, MatchFlags, MatchResult, SyntaxOptions, TextUnit,
};

pub use search::{SearchOracle, UNMATCHED};

/// Run `call`, converting a panic into a [`FaultKind::Panic`] fault.
pub(crate) fn guarded<T, Err>(call: impl FnOnce() -> Result<T, Err>) -> Result<T, Err>
where
    Err: From<EngineFault>,
{
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(%message, "engine panicked");
            Err(EngineFault::new(FaultKind::Panic, format!("engine panicked: {message}")).into())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}

pub(crate) fn compile_guarded<E: Engine, U: TextUnit>(
    engine: &E,
    pattern: &[U],
    syntax: SyntaxOptions,
) -> Result<E::Pattern<U>, CompileFailure> {
    guarded(|| engine.compile(pattern, syntax))
}

/// Whole-subject match, validated.
pub(crate) fn match_checked<E: Engine, U: TextUnit>(
    engine: &E,
    subject: &[U],
    pattern: &E::Pattern<U>,
) -> Result<Option<MatchResult>, EngineFault> {
    guarded(|| {
        let outcome = engine.match_whole(subject, pattern)?;
        if let Some(result) = &outcome {
            check_result(result, subject.len(), engine.capture_count(pattern))?;
        }
        Ok(outcome)
    })
}

/// Unanchored search, validated.
pub(crate) fn search_checked<E: Engine, U: TextUnit>(
    engine: &E,
    subject: &[U],
    pattern: &E::Pattern<U>,
    flags: MatchFlags,
) -> Result<Option<MatchResult>, EngineFault> {
    guarded(|| {
        let outcome = engine.search(subject, pattern, flags)?;
        if let Some(result) = &outcome {
            check_result(result, subject.len(), engine.capture_count(pattern))?;
        }
        Ok(outcome)
    })
}

pub(crate) fn substitute_guarded<E: Engine, U: TextUnit>(
    engine: &E,
    subject: &[U],
    pattern: &E::Pattern<U>,
    template: &[U],
    flags: MatchFlags,
) -> Result<Vec<U>, EngineFault> {
    guarded(|| engine.substitute(subject, pattern, template, flags))
}

/// Check a match result against the result invariants.
pub(crate) fn check_result(result: &MatchResult, subject_len: usize, captures: usize) -> Result<(), EngineFault> {
    let broken = |message: String| Err(EngineFault::new(FaultKind::BrokenInvariant, message));

    if result.len() != captures + 1 {
        return broken(format!(
            "engine reported {} groups for a pattern with {captures} capture groups",
            result.len()
        ));
    }
    if result.whole().is_none() {
        return broken("engine reported a match whose group 0 is unmatched".to_string());
    }
    let outside = result
        .groups()
        .iter()
        .enumerate()
        .find_map(|(index, group)| group.span().filter(|span| !span.fits(subject_len)).map(|span| (index, span)));
    if let Some((index, span)) = outside {
        return broken(format!(
            "group {index} span {span} does not lie inside a subject of {subject_len} units"
        ));
    }
    Ok(())
}
