//! Inline snapshots of diagnostic text
//!
//! Diagnostics are presentation, but their content (subject, pattern, hex syntax and flags, expected and actual
//! values) is what makes a failure reproducible. These snapshots pin that content down.
//!
//! Review changes: `cargo insta review`

use rexcheck::{ErrorClass, Fixture, MatchFlags, SilentReporter, SyntaxOptions, UNMATCHED, wide};

const ECMA: SyntaxOptions = SyntaxOptions::ECMASCRIPT;

/// Run `checks` against a fresh fixture and return the single recorded message.
fn failure(checks: impl FnOnce(&Fixture)) -> String {
    let fx = Fixture::new().with_reporter(SilentReporter);
    checks(&fx);
    let diagnostics = fx.diagnostics();
    assert_eq!(diagnostics.len(), 1, "expected exactly one failure, got {diagnostics:?}");
    diagnostics[0].message.clone()
}

#[test]
fn match_polarity() {
    let message = failure(|fx| fx.should_match("abc", "x", ECMA | SyntaxOptions::ICASE));
    insta::assert_snapshot!(message, @r#"Expected regex_match("abc", regex("x", 0x101)) to be true."#);
}

#[test]
fn search_wrong_text() {
    let message = failure(|fx| {
        let re = fx.search("b+", ECMA).unwrap();
        re.should_search_match("abbc", "b", MatchFlags::DEFAULT);
    });
    insta::assert_snapshot!(message, @r#"Expected regex_search("abbc", regex("b+", 0x1), 0x0) to find "b", but it matched "bb""#);
}

#[test]
fn search_capture_groups() {
    let message = failure(|fx| {
        let re = fx.search("(a)(b)?", ECMA).unwrap();
        re.should_search_match_capture_groups("xa", "a", MatchFlags::DEFAULT, &[(1, 2), (1, 2)]);
    });
    insta::assert_snapshot!(message, @r#"Expected regex_search("xa", regex("(a)(b)?", 0x1), 0x0) to find capture groups {"a" [1 2], "a" [1 2]} in "a", but found {"a" [1 2], "(unmatched)" [-1 -1]}"#);
}

#[test]
fn search_capture_groups_wide() {
    let message = failure(|fx| {
        let re = fx.search(&wide("(é)|(b)"), ECMA).unwrap();
        re.should_search_match_capture_groups(&wide("xé"), &wide("é"), MatchFlags::DEFAULT, &[UNMATCHED, UNMATCHED]);
    });
    insta::assert_snapshot!(message, @r#"Expected regex_search("xé", wregex("(é)|(b)", 0x1), 0x0) to find capture groups {"(unmatched)" [-1 -1], "(unmatched)" [-1 -1]} in "é", but found {"é" [1 2], "(unmatched)" [-1 -1]}"#);
}

#[test]
fn replacement() {
    let message = failure(|fx| fx.should_replace_to("aaa", "a", "b", MatchFlags::FORMAT_FIRST_ONLY, "bbb"));
    insta::assert_snapshot!(message, @r#"
should_replace_to(
subject:     "aaa"
pattern:     "a"
fmt:         "b"
match_flags: 0x1000
expected:    "bbb"
): bad answer, returned: "baa"
"#);
}

#[test]
fn wrong_error_class() {
    let message = failure(|fx| fx.should_throw("[b-a]", ErrorClass::Paren, ECMA));
    insta::assert_snapshot!(message, @r#"regex r("[b-a]", 0x1) threw error_range (0x8); expected error_paren (0x5)"#);
}

#[test]
fn capture_group_text() {
    let message = failure(|fx| fx.should_capture("foobar", "foo(ba)r", "bar"));
    insta::assert_snapshot!(message, @r#"should_capture("foobar", "foo(ba)r", "bar"): m[1] == "ba""#);
}
