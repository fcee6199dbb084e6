#![forbid(unsafe_code)]
//! rexcheck: a conformance oracle for regular-expression engines
//!
//! rexcheck drives an engine with controlled inputs (subject text, pattern text, syntax options, match flags) and
//! checks its observable behavior against expectations: match or no match, captured spans, replacement output, and
//! the error class of malformed patterns. Failures never abort a unit; every one is recorded and reported.
//!
//! ## Usage
//!
//! ```rust
//! use rexcheck::{ErrorClass, Fixture, MatchFlags, SilentReporter, SyntaxOptions, UNMATCHED};
//!
//! let fx = Fixture::new().with_reporter(SilentReporter);
//! fx.should_match("abc", "a.c", SyntaxOptions::ECMASCRIPT);
//! fx.should_throw("a(b", ErrorClass::Paren, SyntaxOptions::ECMASCRIPT);
//!
//! let re = fx.search("(a)(b)?", SyntaxOptions::ECMASCRIPT).unwrap();
//! re.should_search_match_capture_groups("xa", "a", MatchFlags::DEFAULT, &[(1, 2), UNMATCHED]);
//!
//! assert_eq!(fx.result(), 0);
//! ```
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `oracle` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Engine panics**: A panic raised by the engine under test is caught at the oracle boundary and recorded as an
//!   engine fault. It never unwinds into the caller.

pub mod cases;
pub mod cli;
pub mod diagnostics;
pub mod fixture;
pub mod oracle;
pub mod recorder;
pub mod version;

pub use diagnostics::{Diagnostic, FailureKind};
pub use fixture::{Fixture, SetupError};
pub use oracle::{SearchOracle, UNMATCHED};
pub use recorder::{ConsoleReporter, Recorder, Reporter, SilentReporter, TracingReporter};

pub use rexcheck_core::{
    CompileError, CompileFailure, Engine, EngineFault, ErrorClass, FaultKind, Group, MatchFlags, MatchResult, Span,
    SyntaxOptions, Text, TextUnit, wide,
};
pub use rexcheck_engine::RegexEngine;
