//! `regex`-backed engine adapter for the rexcheck conformance oracle.
//!
//! [`RegexEngine`] exposes the `regex` crate through [`rexcheck_core::Engine`]. It translates syntax options and
//! match flags, classifies malformed patterns into [`rexcheck_core::ErrorClass`] via `regex-syntax`, expands
//! replacement templates, and reports offsets in the caller's text units.
//!
//! ## Notes
//! - Only the ECMAScript grammar is accepted; other grammars are reported as engine faults.
//! - `NOT_BOL`, `NOT_EOL`, `NOT_BOW`, `NOT_EOW` and `PREV_AVAIL` have no `regex` equivalent and are engine faults.
//! - Preference between alternatives follows the `regex` crate (leftmost-first). Under `NOT_NULL` an empty match
//!   is only skipped when no non-empty match starts at the same position; otherwise ECMAScript would backtrack into
//!   an alternative `regex` cannot select, and the search is an engine fault.
//! - The whole-match program is derived from the parsed `Hir`, never by rewriting the pattern text.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod classify;
pub mod template;

use std::marker::PhantomData;

use regex::{Captures, Regex, RegexBuilder};
use regex_automata::{Anchored, Input, MatchKind, meta};
use regex_syntax::hir::{Hir, Look};
use rexcheck_core::{
    CompileFailure, Engine, EngineFault, FaultKind, Grammar, Group, MatchFlags, MatchResult, OffsetMap, Span,
    SyntaxOptions, TextUnit,
};

use crate::template::Format;

/// Match flags with no `regex` equivalent.
const UNSUPPORTED_FLAGS: MatchFlags = MatchFlags::NOT_BOL
    .union(MatchFlags::NOT_EOL)
    .union(MatchFlags::NOT_BOW)
    .union(MatchFlags::NOT_EOW)
    .union(MatchFlags::PREV_AVAIL);

/// Default compiled-program size limit (matches the `regex` crate default).
const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Default nesting limit (matches the `regex-syntax` default).
const DEFAULT_NEST_LIMIT: u32 = 250;

/// Engine adapter over the `regex` crate.
#[derive(Debug, Clone)]
pub struct RegexEngine {
    size_limit: usize,
    nest_limit: u32,
}

impl Default for RegexEngine {
    fn default() -> Self {
        Self {
            size_limit: DEFAULT_SIZE_LIMIT,
            nest_limit: DEFAULT_NEST_LIMIT,
        }
    }
}

impl RegexEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compiled-program size limit; patterns over it are rejected as `error_complexity`.
    pub fn with_size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = bytes;
        self
    }

    /// Set the nesting limit; patterns over it are rejected as `error_stack`.
    pub fn with_nest_limit(mut self, depth: u32) -> Self {
        self.nest_limit = depth;
        self
    }

    fn build(&self, source: &str, syntax: SyntaxOptions) -> Result<Regex, CompileFailure> {
        RegexBuilder::new(source)
            .case_insensitive(syntax.contains(SyntaxOptions::ICASE))
            .multi_line(syntax.contains(SyntaxOptions::MULTILINE))
            .size_limit(self.size_limit)
            .nest_limit(self.nest_limit)
            .build()
            .map_err(classify::classify_build)
    }

    /// Build a program from an already parsed pattern.
    ///
    /// The source compiled and classified cleanly before this runs, so any failure here is the adapter's own fault,
    /// never a rejection of the pattern.
    fn build_derived(&self, hir: &Hir, kind: MatchKind) -> Result<meta::Regex, CompileFailure> {
        meta::Regex::builder()
            .configure(meta::Config::new().match_kind(kind).nfa_size_limit(Some(self.size_limit)))
            .build_from_hir(hir)
            .map_err(|err| {
                CompileFailure::from(EngineFault::new(
                    FaultKind::Internal,
                    format!("failed to build derived program: {err}"),
                ))
            })
    }
}

/// A pattern compiled by [`RegexEngine`].
#[derive(Debug, Clone)]
pub struct CompiledRegex<U> {
    /// Finds matches anywhere.
    search: Regex,
    /// `\A(?:pattern)\z`, matches only the whole subject.
    whole: meta::Regex,
    /// Reports the longest match; used to find non-empty alternatives under `NOT_NULL`.
    longest: meta::Regex,
    captures: usize,
    nosubs: bool,
    _unit: PhantomData<fn() -> U>,
}

impl<U: TextUnit> CompiledRegex<U> {
    /// Convert byte spans, group 0 first, to a result in caller units.
    fn result(&self, spans: impl Iterator<Item = Option<(usize, usize)>>, map: &OffsetMap) -> MatchResult {
        let count = if self.nosubs { 1 } else { usize::MAX };
        spans
            .take(count)
            .map(|span| Group::from(span.map(|(start, end)| Span::new(map.unit(start), map.unit(end)))))
            .collect()
    }

    fn search_result(&self, caps: &Captures<'_>, map: &OffsetMap) -> MatchResult {
        self.result((0..caps.len()).map(|i| caps.get(i).map(|m| (m.start(), m.end()))), map)
    }

    /// First match at or after `start` that satisfies `flags`.
    fn next_match<'t>(
        &self,
        text: &'t str,
        start: usize,
        flags: MatchFlags,
    ) -> Result<Option<Captures<'t>>, EngineFault> {
        let mut pos = start;
        loop {
            let Some(caps) = self.search.captures_at(text, pos) else {
                return Ok(None);
            };
            let Some(m) = caps.get(0) else {
                return Ok(None);
            };
            if flags.contains(MatchFlags::CONTINUOUS) && m.start() != start {
                return Ok(None);
            }
            if !(flags.contains(MatchFlags::NOT_NULL) && m.is_empty()) {
                return Ok(Some(caps));
            }
            if self.has_non_empty_match_at(text, m.start()) {
                return Err(EngineFault::new(
                    FaultKind::UnsupportedFlags,
                    format!(
                        "match_not_null: the empty match at byte {} has a non-empty alternative the regex engine \
                         cannot select",
                        m.start()
                    ),
                ));
            }
            if flags.contains(MatchFlags::CONTINUOUS) {
                return Ok(None);
            }
            match next_boundary(text, m.start()) {
                Some(next) => pos = next,
                None => return Ok(None),
            }
        }
    }

    /// Whether some match of the pattern that starts at `at` is non-empty.
    fn has_non_empty_match_at(&self, text: &str, at: usize) -> bool {
        let input = Input::new(text).range(at..).anchored(Anchored::Yes);
        self.longest.search(&input).is_some_and(|m| m.end() > at)
    }
}

/// Position of the char boundary after `pos`, or `None` at the end of `text`.
fn next_boundary(text: &str, pos: usize) -> Option<usize> {
    text.get(pos..)?.chars().next().map(|c| pos + c.len_utf8())
}

fn check_flags(flags: MatchFlags) -> Result<(), EngineFault> {
    let unsupported = flags & UNSUPPORTED_FLAGS;
    if unsupported.is_empty() {
        Ok(())
    } else {
        Err(EngineFault::new(
            FaultKind::UnsupportedFlags,
            format!("match flags 0x{:X} are not supported by the regex engine", unsupported.bits()),
        ))
    }
}

impl Engine for RegexEngine {
    type Pattern<U: TextUnit> = CompiledRegex<U>;

    fn name(&self) -> &str {
        "regex"
    }

    #[tracing::instrument(skip_all, fields(pattern_len = pattern.len(), syntax = syntax.bits()))]
    fn compile<U: TextUnit>(&self, pattern: &[U], syntax: SyntaxOptions) -> Result<CompiledRegex<U>, CompileFailure> {
        match syntax.grammar() {
            Some(Grammar::EcmaScript) => {}
            Some(other) => {
                return Err(EngineFault::new(
                    FaultKind::UnsupportedSyntax,
                    format!("grammar {other:?} is not supported by the regex engine"),
                )
                .into());
            }
            None => {
                return Err(EngineFault::new(
                    FaultKind::UnsupportedSyntax,
                    format!("syntax options 0x{:X} select more than one grammar", syntax.bits()),
                )
                .into());
            }
        }

        let source = U::decode(pattern)?;

        // Parse first so malformed patterns carry a precise classification.
        let hir = regex_syntax::ParserBuilder::new()
            .case_insensitive(syntax.contains(SyntaxOptions::ICASE))
            .multi_line(syntax.contains(SyntaxOptions::MULTILINE))
            .nest_limit(self.nest_limit)
            .build()
            .parse(&source)
            .map_err(|e| classify::classify(&e))?;
        let captures = hir.properties().explicit_captures_len();

        let search = self.build(&source, syntax)?;
        let anchored = Hir::concat(vec![Hir::look(Look::Start), hir.clone(), Hir::look(Look::End)]);
        let whole = self.build_derived(&anchored, MatchKind::LeftmostFirst)?;
        let longest = self.build_derived(&hir, MatchKind::All)?;
        tracing::debug!(captures, "compiled pattern");

        Ok(CompiledRegex {
            search,
            whole,
            longest,
            captures,
            nosubs: syntax.contains(SyntaxOptions::NOSUBS),
            _unit: PhantomData,
        })
    }

    fn capture_count<U: TextUnit>(&self, pattern: &CompiledRegex<U>) -> usize {
        if pattern.nosubs { 0 } else { pattern.captures }
    }

    fn match_whole<U: TextUnit>(
        &self,
        subject: &[U],
        pattern: &CompiledRegex<U>,
    ) -> Result<Option<MatchResult>, EngineFault> {
        let text = U::decode(subject)?;
        let map = OffsetMap::new::<U>(&text);
        let mut caps = pattern.whole.create_captures();
        pattern.whole.captures(text.as_str(), &mut caps);
        if !caps.is_match() {
            return Ok(None);
        }
        let spans = (0..caps.group_len()).map(|i| caps.get_group(i).map(|span| (span.start, span.end)));
        Ok(Some(pattern.result(spans, &map)))
    }

    fn search<U: TextUnit>(
        &self,
        subject: &[U],
        pattern: &CompiledRegex<U>,
        flags: MatchFlags,
    ) -> Result<Option<MatchResult>, EngineFault> {
        check_flags(flags)?;
        let text = U::decode(subject)?;
        let map = OffsetMap::new::<U>(&text);
        Ok(pattern.next_match(&text, 0, flags)?.map(|caps| pattern.search_result(&caps, &map)))
    }

    fn substitute<U: TextUnit>(
        &self,
        subject: &[U],
        pattern: &CompiledRegex<U>,
        template: &[U],
        flags: MatchFlags,
    ) -> Result<Vec<U>, EngineFault> {
        check_flags(flags)?;
        let text = U::decode(subject)?;
        let template = U::decode(template)?;
        let format = if flags.contains(MatchFlags::FORMAT_SED) {
            Format::Sed
        } else {
            Format::EcmaScript
        };
        let copy = !flags.contains(MatchFlags::FORMAT_NO_COPY);

        let mut out = String::with_capacity(text.len());
        let mut copied_to = 0;
        let mut pos = 0;
        while let Some(caps) = pattern.next_match(&text, pos, flags)? {
            let Some(m) = caps.get(0) else { break };
            if copy {
                out.push_str(&text[copied_to..m.start()]);
            }
            template::expand(format, &template, &caps, &text, &mut out);
            copied_to = m.end();

            if flags.contains(MatchFlags::FORMAT_FIRST_ONLY) {
                break;
            }
            pos = if m.is_empty() {
                match next_boundary(&text, m.end()) {
                    Some(next) => next,
                    None => break,
                }
            } else {
                m.end()
            };
        }
        if copy {
            out.push_str(&text[copied_to..]);
        }
        Ok(U::encode(&out))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
