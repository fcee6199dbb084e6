//! Vocabulary registries for syntax options, match flags and error classes.
//!
//! Case files, the CLI and diagnostics refer to options and classes by name. Instead of scattering string matches,
//! callers resolve spellings through these tables and work with the typed ids (`SyntaxOptions`, `MatchFlags`,
//! `ErrorClass`).
//!
//! ## Notes
//! - Registries are intentionally **pure**: no IO, no side effects.
//! - Canonical spellings follow the conventional C++ `<regex>` constant names so expectations written against other
//!   conformance suites read the same here.
//!
//! ## Examples
//! ```rust
//! use rexcheck_core::ErrorClass;
//! use rexcheck_core::lang::error_classes;
//!
//! assert_eq!(error_classes::from_str("error_paren"), Some(ErrorClass::Paren));
//! assert_eq!(error_classes::as_str(ErrorClass::Paren), "error_paren");
//! ```

pub mod error_classes;
pub mod match_flags;
pub mod registry;
pub mod syntax_options;
