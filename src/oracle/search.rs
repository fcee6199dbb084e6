//! Search oracle.
//!
//! A [`SearchOracle`] compiles its pattern once, when built through [`Fixture::search`], and then checks any number
//! of unanchored searches against it. One type serves narrow and wide text; `U` is the text unit.
//!
//! ## Expected capture groups
//!
//! Capture expectations are `(start, end)` pairs in subject units, one per group after group 0. The sentinel
//! [`UNMATCHED`] (`(-1, -1)`) requires the group to be unmatched; any pair whose start is `-1` is treated as the
//! sentinel. Other negative offsets, `start > end`, or `end` past the subject are malformed expectations and are
//! recorded as a mismatch without running the search.
//!
//! Groups are compared by absolute offsets, not by text, so spans are checked even when substrings coincide. The
//! first differing group decides the outcome, but the diagnostic lists every expected and actual group.

use rexcheck_core::{Engine, Group, MatchFlags, MatchResult, SyntaxOptions, Text, TextUnit};
use rexcheck_engine::RegexEngine;

use crate::diagnostics::{Diagnostic, actual_group, expected_group, group_list, quoted, regex_call};
use crate::fixture::Fixture;

use super::search_checked;

/// Expectation that a capture group did not participate in the match.
pub const UNMATCHED: (isize, isize) = (-1, -1);

/// Checks unanchored searches against one pre-compiled pattern.
pub struct SearchOracle<'f, U: TextUnit, E: Engine = RegexEngine> {
    fixture: &'f Fixture<E>,
    pattern: Vec<U>,
    syntax: SyntaxOptions,
    compiled: E::Pattern<U>,
}

impl<'f, U: TextUnit, E: Engine> SearchOracle<'f, U, E> {
    pub(crate) fn new(fixture: &'f Fixture<E>, pattern: Vec<U>, syntax: SyntaxOptions, compiled: E::Pattern<U>) -> Self {
        Self {
            fixture,
            pattern,
            syntax,
            compiled,
        }
    }

    pub fn pattern(&self) -> &[U] {
        &self.pattern
    }

    pub fn syntax(&self) -> SyntaxOptions {
        self.syntax
    }

    /// Require a match whose overall text is exactly `expected`.
    pub fn should_search_match<S, X>(&self, subject: &S, expected: &X, flags: MatchFlags)
    where
        S: Text<Unit = U> + ?Sized,
        X: Text<Unit = U> + ?Sized,
    {
        const OP: &str = "should_search_match";
        let (subject, expected) = (subject.units(), expected.units());
        if let Some(outcome) = self.run(OP, subject, flags) {
            self.check_whole(OP, subject, expected, flags, outcome.as_ref());
        }
    }

    /// Require no match at all.
    pub fn should_search_fail<S>(&self, subject: &S, flags: MatchFlags)
    where
        S: Text<Unit = U> + ?Sized,
    {
        const OP: &str = "should_search_fail";
        let subject = subject.units();
        if let Some(Some(result)) = self.run(OP, subject, flags) {
            let found = result.whole_text(subject).unwrap_or_default();
            self.fixture.record(Diagnostic::mismatch(
                OP,
                format!("Expected {} to not match, but it found {}", self.call(subject, flags), quoted(found)),
            ));
        }
    }

    /// Require a match whose overall text is `expected` and whose capture groups sit exactly at `expected_groups`.
    ///
    /// Records at most one failure per call.
    pub fn should_search_match_capture_groups<S, X>(
        &self,
        subject: &S,
        expected: &X,
        flags: MatchFlags,
        expected_groups: &[(isize, isize)],
    ) where
        S: Text<Unit = U> + ?Sized,
        X: Text<Unit = U> + ?Sized,
    {
        const OP: &str = "should_search_match_capture_groups";
        let (subject, expected) = (subject.units(), expected.units());

        if let Some((index, pair)) = malformed(expected_groups, subject.len()) {
            self.fixture.record(Diagnostic::mismatch(
                OP,
                format!(
                    "Malformed expectation for {}: capture group {} is ({}, {}) in a subject of {} units",
                    self.call(subject, flags),
                    index + 1,
                    pair.0,
                    pair.1,
                    subject.len()
                ),
            ));
            return;
        }

        let Some(outcome) = self.run(OP, subject, flags) else {
            return;
        };
        let result = match outcome {
            Some(result) if result.whole_text(subject) == Some(expected) => result,
            other => {
                self.check_whole(OP, subject, expected, flags, other.as_ref());
                return;
            }
        };

        let wanted = || group_list(expected_groups.iter().map(|&pair| expected_group(subject, pair)));
        let found = || group_list(result.captures().iter().map(|&group| actual_group(subject, group)));

        if result.len() != expected_groups.len() + 1 {
            self.fixture.record(Diagnostic::mismatch(
                OP,
                format!(
                    "Expected {} to match {} capture groups in {}, but it matched {} groups: expected {}, found {}",
                    self.call(subject, flags),
                    expected_groups.len() + 1,
                    quoted(expected),
                    result.len(),
                    wanted(),
                    found()
                ),
            ));
            return;
        }

        let agrees = result
            .captures()
            .iter()
            .zip(expected_groups)
            .all(|(actual, &pair)| group_agrees(*actual, pair));
        if !agrees {
            let (wanted, found) = (wanted(), found());
            self.fixture.record(Diagnostic::mismatch(
                OP,
                format!(
                    "Expected {} to find capture groups {wanted} in {}, but found {found}",
                    self.call(subject, flags),
                    quoted(expected)
                ),
            ));
        }
    }

    /// Run the search. Faults are recorded and yield `None`.
    fn run(&self, op: &'static str, subject: &[U], flags: MatchFlags) -> Option<Option<MatchResult>> {
        match search_checked(self.fixture.engine(), subject, &self.compiled, flags) {
            Ok(outcome) => Some(outcome),
            Err(fault) => {
                self.fixture.record(Diagnostic::engine_fault(
                    op,
                    format!("Failed to {}: engine fault: {fault}", self.call(subject, flags)),
                ));
                None
            }
        }
    }

    fn check_whole(
        &self,
        op: &'static str,
        subject: &[U],
        expected: &[U],
        flags: MatchFlags,
        outcome: Option<&MatchResult>,
    ) {
        let found = outcome.map(|r| r.whole_text(subject).unwrap_or_default());
        if found == Some(expected) {
            return;
        }
        let actual = match found {
            Some(text) => format!("but it matched {}", quoted(text)),
            None => "but it failed to match".to_string(),
        };
        self.fixture.record(Diagnostic::mismatch(
            op,
            format!("Expected {} to find {}, {actual}", self.call(subject, flags), quoted(expected)),
        ));
    }

    /// `regex_search("subject", regex("pattern", 0x1), 0x0)`.
    fn call(&self, subject: &[U], flags: MatchFlags) -> String {
        format!(
            "regex_search({}, {}, 0x{:X})",
            quoted(subject),
            regex_call(&self.pattern, self.syntax),
            flags.bits()
        )
    }
}

/// Sentinel rule plus exact offsets.
fn group_agrees(actual: Group, (start, end): (isize, isize)) -> bool {
    if start == -1 {
        return !actual.is_matched();
    }
    match actual.span() {
        Some(span) => usize::try_from(start) == Ok(span.start) && usize::try_from(end) == Ok(span.end),
        None => false,
    }
}

/// First expected pair that is neither a sentinel nor a valid span of a subject of `len` units.
fn malformed(expected_groups: &[(isize, isize)], len: usize) -> Option<(usize, (isize, isize))> {
    expected_groups.iter().copied().enumerate().find(|&(_, (start, end))| {
        if start == -1 {
            return false;
        }
        match (usize::try_from(start), usize::try_from(end)) {
            (Ok(start), Ok(end)) => start > end || end > len,
            _ => true,
        }
    })
}
