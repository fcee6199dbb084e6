//! Shared vocabulary and the engine seam for the rexcheck conformance oracle.
//!
//! This crate is intentionally small and dependency-light. It contains the types that both sides of the seam agree on:
//! - the harness (`rexcheck`) uses them to state expectations and render diagnostics, and
//! - engine adapters (e.g. `rexcheck_engine`) use them to report results and failures.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global state, and no engine-specific types.
//! - Narrow and wide text are modelled once, generically, through [`TextUnit`] (`u8` and `u16`).
//! - Canonical spellings for options, flags and error classes live in the [`lang`] registries.

#![deny(clippy::unwrap_used)]

pub mod engine;
pub mod error_class;
pub mod lang;
pub mod options;
pub mod result;
pub mod text;

pub use engine::{CompileError, CompileFailure, Engine, EngineFault, FaultKind};
pub use error_class::ErrorClass;
pub use options::{Grammar, MatchFlags, SyntaxOptions};
pub use result::{Group, MatchResult, Span};
pub use text::{Narrow, OffsetMap, Text, TextError, TextUnit, TextWidth, Wide, wide};
