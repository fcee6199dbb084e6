#![no_main]

use libfuzzer_sys::fuzz_target;
use rexcheck::{ErrorClass, Fixture, MatchFlags, SilentReporter, SyntaxOptions, wide};

fuzz_target!(|data: &[u8]| {
    // First line is the pattern, the rest is the subject.
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (pattern, subject) = s.split_once('\n').unwrap_or((s, ""));

    // No oracle call may panic, whatever the engine does with the input.
    let fx = Fixture::new().with_reporter(SilentReporter);
    fx.should_match(subject, pattern, SyntaxOptions::ECMASCRIPT);
    fx.should_capture(subject, pattern, subject);
    fx.should_replace_to(subject, pattern, "[$&]", MatchFlags::DEFAULT, subject);
    fx.should_throw(pattern, ErrorClass::Syntax, SyntaxOptions::ECMASCRIPT);
    if let Ok(re) = fx.search(pattern, SyntaxOptions::ECMASCRIPT) {
        re.should_search_match(subject, subject, MatchFlags::NOT_NULL);
        re.should_search_match_capture_groups(subject, subject, MatchFlags::DEFAULT, &[(0, 1), (-1, -1)]);
    }
    if let Ok(re) = fx.search(&wide(pattern), SyntaxOptions::ECMASCRIPT | SyntaxOptions::ICASE) {
        re.should_search_fail(&wide(subject), MatchFlags::CONTINUOUS);
    }
});
