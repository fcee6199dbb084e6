//! JSON case files.
//!
//! A case file lists test units; each unit is a named sequence of checks run against one fresh [`Fixture`]. Syntax
//! options, match flags and error classes are written by name and resolved through the `rexcheck_core::lang`
//! registries while the file is parsed, so an unknown name is a load error pointing at the offending check.
//!
//! ```json
//! { "units": [ { "name": "dates", "checks": [
//!     { "op": "should_match", "subject": "abc", "pattern": "a.c" },
//!     { "op": "should_throw", "pattern": "a(b", "error": "error_paren", "wide": true },
//!     { "op": "search", "pattern": "(a)(b)?", "cases": [
//!         { "subject": "xa", "expected": "a", "groups": [[1, 2], [-1, -1]] },
//!         { "subject": "zzz", "expected": null } ] }
//! ] } ] }
//! ```

use std::fs;
use std::path::Path;

use miette::{NamedSource, SourceSpan};
use rexcheck_core::lang::{error_classes, match_flags, syntax_options};
use rexcheck_core::{Engine, ErrorClass, MatchFlags, SyntaxOptions, Text, TextUnit};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use thiserror::Error;

use crate::fixture::{Fixture, SetupError};

/// A case file that could not be loaded.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum CaseFileError {
    #[error("failed to read case file `{path}`")]
    #[diagnostic(code(rexcheck::cases::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid case file `{path}`: {message}")]
    #[diagnostic(
        code(rexcheck::cases::invalid),
        help("run `rexcheck vocab` to list the accepted syntax option, match flag and error class names")
    )]
    Invalid {
        path: String,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseFile {
    pub units: Vec<Unit>,
}

/// A named test unit.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Unit {
    pub name: String,
    #[serde(default)]
    pub checks: Vec<Check>,
}

/// One oracle operation, tagged by `op`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Check {
    ShouldMatch(MatchCheck),
    ShouldNotMatch(MatchCheck),
    ShouldCapture(CaptureCheck),
    ShouldReplaceTo(ReplaceCheck),
    ShouldThrow(ThrowCheck),
    Search(SearchCheck),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchCheck {
    pub subject: String,
    pub pattern: String,
    #[serde(default, deserialize_with = "syntax_names")]
    pub syntax: SyntaxOptions,
    #[serde(default)]
    pub wide: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureCheck {
    pub subject: String,
    pub pattern: String,
    pub group: String,
    #[serde(default)]
    pub wide: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplaceCheck {
    pub subject: String,
    pub pattern: String,
    pub template: String,
    pub expected: String,
    #[serde(default, deserialize_with = "flag_names")]
    pub flags: MatchFlags,
    #[serde(default)]
    pub wide: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThrowCheck {
    pub pattern: String,
    #[serde(deserialize_with = "error_class_name")]
    pub error: ErrorClass,
    #[serde(default, deserialize_with = "syntax_names")]
    pub syntax: SyntaxOptions,
    #[serde(default)]
    pub wide: bool,
}

/// A search oracle and the searches run against it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchCheck {
    pub pattern: String,
    #[serde(default, deserialize_with = "syntax_names")]
    pub syntax: SyntaxOptions,
    #[serde(default)]
    pub wide: bool,
    pub cases: Vec<SearchCase>,
}

/// `expected: null` requires no match; `groups` adds per-group span checks.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchCase {
    pub subject: String,
    pub expected: Option<String>,
    #[serde(default, deserialize_with = "flag_names")]
    pub flags: MatchFlags,
    #[serde(default)]
    pub groups: Option<Vec<(isize, isize)>>,
}

impl Check {
    /// Operation name as written in case files.
    pub fn op(&self) -> &'static str {
        match self {
            Check::ShouldMatch(_) => "should_match",
            Check::ShouldNotMatch(_) => "should_not_match",
            Check::ShouldCapture(_) => "should_capture",
            Check::ShouldReplaceTo(_) => "should_replace_to",
            Check::ShouldThrow(_) => "should_throw",
            Check::Search(_) => "search",
        }
    }

    pub fn is_wide(&self) -> bool {
        match self {
            Check::ShouldMatch(c) | Check::ShouldNotMatch(c) => c.wide,
            Check::ShouldCapture(c) => c.wide,
            Check::ShouldReplaceTo(c) => c.wide,
            Check::ShouldThrow(c) => c.wide,
            Check::Search(c) => c.wide,
        }
    }
}

impl CaseFile {
    pub fn load(path: &Path) -> Result<Self, CaseFileError> {
        let name = path.display().to_string();
        let source = fs::read_to_string(path).map_err(|source| CaseFileError::Io {
            path: name.clone(),
            source,
        })?;
        Self::parse(&name, source)
    }

    /// Parse case file text. `name` labels the source in errors.
    pub fn parse(name: &str, source: String) -> Result<Self, CaseFileError> {
        serde_json::from_str(&source).map_err(|err| {
            let offset = byte_offset(&source, err.line(), err.column());
            CaseFileError::Invalid {
                path: name.to_string(),
                message: err.to_string(),
                src: NamedSource::new(name, source.clone()),
                span: (offset, 0).into(),
            }
        })
    }

    /// Units whose name contains `filter`, or all units.
    pub fn selected<'a>(&'a self, filter: Option<&'a str>) -> impl Iterator<Item = &'a Unit> + 'a {
        self.units
            .iter()
            .filter(move |unit| filter.is_none_or(|keyword| unit.name.contains(keyword)))
    }
}

/// Run every check of `unit` against `fixture` and return the unit's result (`0` pass, `1` fail).
///
/// A search pattern that does not compile stops the unit with a [`SetupError`].
#[tracing::instrument(skip_all, fields(unit = %unit.name))]
pub fn run_unit<E: Engine>(fixture: &Fixture<E>, unit: &Unit) -> Result<i32, SetupError> {
    for check in &unit.checks {
        tracing::trace!(op = check.op(), wide = check.is_wide(), "running check");
        if check.is_wide() {
            run_check::<u16, E>(fixture, check)?;
        } else {
            run_check::<u8, E>(fixture, check)?;
        }
    }
    Ok(fixture.result())
}

fn run_check<U, E>(fixture: &Fixture<E>, check: &Check) -> Result<(), SetupError>
where
    U: TextUnit,
    E: Engine,
    [U]: Text<Unit = U>,
{
    let text = |s: &str| U::encode(s);

    match check {
        Check::ShouldMatch(c) => {
            fixture.should_match(text(&c.subject).as_slice(), text(&c.pattern).as_slice(), c.syntax);
        }
        Check::ShouldNotMatch(c) => {
            fixture.should_not_match(text(&c.subject).as_slice(), text(&c.pattern).as_slice(), c.syntax);
        }
        Check::ShouldCapture(c) => {
            fixture.should_capture(
                text(&c.subject).as_slice(),
                text(&c.pattern).as_slice(),
                text(&c.group).as_slice(),
            );
        }
        Check::ShouldReplaceTo(c) => {
            fixture.should_replace_to(
                text(&c.subject).as_slice(),
                text(&c.pattern).as_slice(),
                text(&c.template).as_slice(),
                c.flags,
                text(&c.expected).as_slice(),
            );
        }
        Check::ShouldThrow(c) => {
            fixture.should_throw(text(&c.pattern).as_slice(), c.error, c.syntax);
        }
        Check::Search(c) => {
            let oracle = fixture.search(text(&c.pattern).as_slice(), c.syntax)?;
            for case in &c.cases {
                let subject = text(&case.subject);
                match (&case.expected, &case.groups) {
                    (None, _) => oracle.should_search_fail(subject.as_slice(), case.flags),
                    (Some(expected), None) => {
                        oracle.should_search_match(subject.as_slice(), text(expected).as_slice(), case.flags);
                    }
                    (Some(expected), Some(groups)) => oracle.should_search_match_capture_groups(
                        subject.as_slice(),
                        text(expected).as_slice(),
                        case.flags,
                        groups,
                    ),
                }
            }
        }
    }
    Ok(())
}

// ============================================================================
// Name resolution
// ============================================================================

fn syntax_names<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SyntaxOptions, D::Error> {
    let names = Vec::<String>::deserialize(deserializer)?;
    syntax_options::parse_all(names.iter().map(String::as_str))
        .map_err(|name| de::Error::custom(format!("unknown syntax option `{name}`")))
}

fn flag_names<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MatchFlags, D::Error> {
    let names = Vec::<String>::deserialize(deserializer)?;
    match_flags::parse_all(names.iter().map(String::as_str))
        .map_err(|name| de::Error::custom(format!("unknown match flag `{name}`")))
}

fn error_class_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ErrorClass, D::Error> {
    let name = String::deserialize(deserializer)?;
    error_classes::from_str(&name).ok_or_else(|| de::Error::custom(format!("unknown error class `{name}`")))
}

/// Byte offset of a 1-based line/column position, clamped to the source.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = source.split_inclusive('\n').take(line - 1).map(str::len).sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<CaseFile, CaseFileError> {
        CaseFile::parse("test.json", source.to_string())
    }

    #[test]
    fn parses_every_op() {
        let file = parse(
            r#"{ "units": [ { "name": "all", "checks": [
                { "op": "should_match", "subject": "abc", "pattern": "a.c" },
                { "op": "should_not_match", "subject": "abc", "pattern": "^a$", "syntax": ["ECMAScript", "icase"] },
                { "op": "should_capture", "subject": "foobar", "pattern": "foo(bar)", "group": "bar" },
                { "op": "should_replace_to", "subject": "a", "pattern": "a", "template": "b", "expected": "b",
                  "flags": ["format_first_only"] },
                { "op": "should_throw", "pattern": "a(b", "error": "unbalanced_grouping", "wide": true },
                { "op": "search", "pattern": "(a)", "cases": [ { "subject": "a", "expected": null } ] }
            ] } ] }"#,
        )
        .unwrap();

        let checks = &file.units[0].checks;
        let ops: Vec<_> = checks.iter().map(Check::op).collect();
        assert_eq!(
            ops,
            ["should_match", "should_not_match", "should_capture", "should_replace_to", "should_throw", "search"]
        );
        match &checks[1] {
            Check::ShouldNotMatch(c) => assert_eq!(c.syntax, SyntaxOptions::ECMASCRIPT | SyntaxOptions::ICASE),
            other => panic!("unexpected {other:?}"),
        }
        match &checks[4] {
            Check::ShouldThrow(c) => {
                assert_eq!(c.error, ErrorClass::Paren);
                assert!(c.wide);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn defaults_to_ecmascript_and_default_flags() {
        let file = parse(
            r#"{ "units": [ { "name": "d", "checks": [
                { "op": "search", "pattern": "a", "cases": [ { "subject": "a", "expected": "a" } ] }
            ] } ] }"#,
        )
        .unwrap();
        match &file.units[0].checks[0] {
            Check::Search(c) => {
                assert_eq!(c.syntax, SyntaxOptions::ECMASCRIPT);
                assert_eq!(c.cases[0].flags, MatchFlags::DEFAULT);
                assert!(c.cases[0].groups.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_names_are_load_errors() {
        let err = parse(
            r#"{ "units": [ { "name": "bad", "checks": [
                { "op": "should_throw", "pattern": "a(b", "error": "error_nonsense" }
            ] } ] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown error class `error_nonsense`"));
    }

    #[test]
    fn misspelled_keys_are_load_errors() {
        for check in [
            r#"{ "op": "should_replace_to", "subject": "aaa", "pattern": "a", "template": "b", "expected": "baa",
                 "flag": ["format_first_only"] }"#,
            r#"{ "op": "should_match", "subject": "ABC", "pattern": "abc", "syntx": ["icase"] }"#,
            r#"{ "op": "should_capture", "subject": "ab", "pattern": "a(b)", "group": "b", "wdie": true }"#,
            r#"{ "op": "should_throw", "pattern": "a(b", "error": "error_paren", "syntaxes": ["ECMAScript"] }"#,
            r#"{ "op": "search", "pattern": "a", "flags": ["match_not_null"], "cases": [] }"#,
        ] {
            let source = format!(r#"{{ "units": [ {{ "name": "typo", "checks": [ {check} ] }} ] }}"#);
            let err = parse(&source).unwrap_err();
            assert!(err.to_string().contains("unknown field"), "{check}: {err}");
        }
    }

    #[test]
    fn unknown_ops_are_load_errors() {
        let err = parse(r#"{ "units": [ { "name": "bad", "checks": [ { "op": "should_explode" } ] } ] }"#).unwrap_err();
        assert!(matches!(err, CaseFileError::Invalid { .. }));
    }

    #[test]
    fn selection_filters_by_name() {
        let file = parse(r#"{ "units": [ { "name": "dates" }, { "name": "times" }, { "name": "update" } ] }"#).unwrap();
        let names: Vec<_> = file.selected(Some("date")).map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["dates", "update"]);
        assert_eq!(file.selected(None).count(), 3);
    }

    #[test]
    fn byte_offset_counts_lines_and_columns() {
        let source = "ab\ncde\nf";
        assert_eq!(byte_offset(source, 1, 1), 0);
        assert_eq!(byte_offset(source, 2, 2), 4);
        assert_eq!(byte_offset(source, 3, 1), 7);
        assert_eq!(byte_offset(source, 9, 9), source.len());
        assert_eq!(byte_offset(source, 0, 0), 0);
    }
}
