use rexcheck_core::{CompileFailure, Engine, ErrorClass, FaultKind, Group, MatchFlags, SyntaxOptions, wide};

use super::*;

fn compile(pattern: &str) -> CompiledRegex<u8> {
    RegexEngine::new()
        .compile(pattern.as_bytes(), SyntaxOptions::ECMASCRIPT)
        .unwrap()
}

fn replace(pattern: &str, subject: &str, template: &str, flags: MatchFlags) -> String {
    let engine = RegexEngine::new();
    let re = compile(pattern);
    let out = engine
        .substitute(subject.as_bytes(), &re, template.as_bytes(), flags)
        .unwrap();
    String::from_utf8(out).unwrap()
}

// ========================================
// Compilation
// ========================================

#[test]
fn compile_counts_capture_groups() {
    let engine = RegexEngine::new();
    let re = compile("(a)(?:b)(c)?");
    assert_eq!(engine.capture_count(&re), 2);
}

#[test]
fn nosubs_hides_capture_groups() {
    let engine = RegexEngine::new();
    let re = engine
        .compile(b"(a)(b)", SyntaxOptions::ECMASCRIPT | SyntaxOptions::NOSUBS)
        .unwrap();
    assert_eq!(engine.capture_count(&re), 0);
    let result = engine.search(b"xab", &re, MatchFlags::DEFAULT).unwrap().unwrap();
    assert_eq!(result.len(), 1);
}

#[test]
fn malformed_pattern_is_classified() {
    let err = RegexEngine::new()
        .compile(b"a(b", SyntaxOptions::ECMASCRIPT)
        .unwrap_err();
    match err {
        CompileFailure::Rejected(e) => assert_eq!(e.class, ErrorClass::Paren),
        CompileFailure::Fault(f) => panic!("unexpected fault {f}"),
    }
}

#[test]
fn size_limit_is_complexity() {
    let err = RegexEngine::new()
        .with_size_limit(16)
        .compile(b"a{100}", SyntaxOptions::ECMASCRIPT)
        .unwrap_err();
    match err {
        CompileFailure::Rejected(e) => assert_eq!(e.class, ErrorClass::Complexity),
        CompileFailure::Fault(f) => panic!("unexpected fault {f}"),
    }
}

#[test]
fn nest_limit_is_stack() {
    let err = RegexEngine::new()
        .with_nest_limit(2)
        .compile(b"((((a))))", SyntaxOptions::ECMASCRIPT)
        .unwrap_err();
    match err {
        CompileFailure::Rejected(e) => assert_eq!(e.class, ErrorClass::Stack),
        CompileFailure::Fault(f) => panic!("unexpected fault {f}"),
    }
}

#[test]
fn other_grammars_are_faults() {
    let err = RegexEngine::new().compile(b"a", SyntaxOptions::BASIC).unwrap_err();
    match err {
        CompileFailure::Fault(f) => assert_eq!(f.kind, FaultKind::UnsupportedSyntax),
        CompileFailure::Rejected(e) => panic!("unexpected rejection {e}"),
    }
}

#[test]
fn icase_option_applies() {
    let engine = RegexEngine::new();
    let re = engine
        .compile(b"abc", SyntaxOptions::ECMASCRIPT | SyntaxOptions::ICASE)
        .unwrap();
    assert!(engine.match_whole(b"ABC", &re).unwrap().is_some());
}

// ========================================
// Matching and searching
// ========================================

#[test]
fn match_whole_requires_full_subject() {
    let engine = RegexEngine::new();
    let re = compile("a.c");
    assert!(engine.match_whole(b"abc", &re).unwrap().is_some());
    assert!(engine.match_whole(b"abcd", &re).unwrap().is_none());
}

#[test]
fn match_whole_tries_later_alternatives() {
    let engine = RegexEngine::new();
    let re = compile("a|ab");
    assert!(engine.match_whole(b"ab", &re).unwrap().is_some());
}

#[test]
fn search_reports_unmatched_groups() {
    let engine = RegexEngine::new();
    let re = compile("(a)(b)?");
    let result = engine.search(b"xa", &re, MatchFlags::DEFAULT).unwrap().unwrap();
    assert_eq!(result.groups(), &[Group::matched(1, 2), Group::matched(1, 2), Group::unmatched()]);
}

#[test]
fn wide_offsets_are_utf16_units() {
    let engine = RegexEngine::new();
    let re = engine.compile(&wide("b+"), SyntaxOptions::ECMASCRIPT).unwrap();
    let result = engine
        .search(&wide("\u{1F600}bb"), &re, MatchFlags::DEFAULT)
        .unwrap()
        .unwrap();
    assert_eq!(result.whole(), Some(Span::new(2, 4)));
}

#[test]
fn continuous_requires_match_at_start() {
    let engine = RegexEngine::new();
    let re = compile("b");
    assert!(engine.search(b"ab", &re, MatchFlags::CONTINUOUS).unwrap().is_none());
    assert!(engine.search(b"ba", &re, MatchFlags::CONTINUOUS).unwrap().is_some());
}

#[test]
fn not_null_skips_empty_matches() {
    let engine = RegexEngine::new();
    let re = compile("a*");
    let result = engine.search(b"bba", &re, MatchFlags::NOT_NULL).unwrap().unwrap();
    assert_eq!(result.whole(), Some(Span::new(2, 3)));
    assert!(engine.search(b"bbb", &re, MatchFlags::NOT_NULL).unwrap().is_none());
}

#[test]
fn not_null_with_a_non_empty_alternative_is_a_fault() {
    let engine = RegexEngine::new();
    let re = compile("(?:|a)");
    let fault = engine.search(b"a", &re, MatchFlags::NOT_NULL).unwrap_err();
    assert_eq!(fault.kind, FaultKind::UnsupportedFlags);
    let fault = engine.search(b"a", &re, MatchFlags::NOT_NULL | MatchFlags::CONTINUOUS).unwrap_err();
    assert_eq!(fault.kind, FaultKind::UnsupportedFlags);
    // Without NOT_NULL the empty alternative is the answer.
    let result = engine.search(b"a", &re, MatchFlags::DEFAULT).unwrap().unwrap();
    assert_eq!(result.whole(), Some(Span::new(0, 0)));
}

#[test]
fn not_null_fault_reaches_substitution() {
    let engine = RegexEngine::new();
    let re = compile("(?:|a)");
    let fault = engine
        .substitute(b"ab", &re, b"X", MatchFlags::NOT_NULL)
        .unwrap_err();
    assert_eq!(fault.kind, FaultKind::UnsupportedFlags);
}

#[test]
fn whole_match_survives_extended_mode_comments() {
    let engine = RegexEngine::new();
    let re = compile("(?x)a # trailing comment");
    assert!(engine.match_whole(b"a", &re).unwrap().is_some());
    assert!(engine.match_whole(b"ab", &re).unwrap().is_none());
}

#[test]
fn whole_match_reports_groups() {
    let engine = RegexEngine::new();
    let re = compile("(a)(x)?(b)");
    let result = engine.match_whole(b"ab", &re).unwrap().unwrap();
    assert_eq!(
        result.groups(),
        [Group::matched(0, 2), Group::matched(0, 1), Group::unmatched(), Group::matched(1, 2)]
    );
}

#[test]
fn unsupported_flags_are_faults() {
    let engine = RegexEngine::new();
    let re = compile("a");
    let fault = engine.search(b"a", &re, MatchFlags::NOT_BOL).unwrap_err();
    assert_eq!(fault.kind, FaultKind::UnsupportedFlags);
}

#[test]
fn invalid_subject_is_a_fault() {
    let engine = RegexEngine::new();
    let re = compile("a");
    let fault = engine.search(&[0xff, b'a'], &re, MatchFlags::DEFAULT).unwrap_err();
    assert_eq!(fault.kind, FaultKind::InvalidText);
}

// ========================================
// Substitution
// ========================================

#[test]
fn substitute_reorders_date() {
    assert_eq!(
        replace(r"(\d+)-(\d+)-(\d+)", "2023-01-02", "$3/$2/$1", MatchFlags::DEFAULT),
        "02/01/2023"
    );
}

#[test]
fn substitute_replaces_every_match() {
    assert_eq!(replace("a", "banana", "o", MatchFlags::DEFAULT), "bonono");
}

#[test]
fn substitute_handles_empty_matches() {
    assert_eq!(replace("a*", "baaac", "X", MatchFlags::DEFAULT), "XbXXcX");
}

#[test]
fn substitute_first_only() {
    assert_eq!(replace("a", "banana", "o", MatchFlags::FORMAT_FIRST_ONLY), "bonana");
}

#[test]
fn substitute_no_copy() {
    assert_eq!(replace("a(n)", "banana", "[$1]", MatchFlags::FORMAT_NO_COPY), "[n][n]");
}

#[test]
fn substitute_sed_format() {
    assert_eq!(replace("(n)(a)", "banana", r"\2\1", MatchFlags::FORMAT_SED), "baanan");
}

#[test]
fn substitute_wide_text() {
    let engine = RegexEngine::new();
    let re = engine.compile(&wide("é"), SyntaxOptions::ECMASCRIPT).unwrap();
    let out = engine
        .substitute(&wide("café"), &re, &wide("e"), MatchFlags::DEFAULT)
        .unwrap();
    assert_eq!(out, wide("cafe"));
}
