//! Syntax options and match flags.
//!
//! Both are plain bitsets handed to the engine unchanged. Numeric values are stable because diagnostics print them as
//! hex bitmasks, and case files may refer to them by registry name (see [`crate::lang`]).

use bitflags::bitflags;

bitflags! {
    /// Grammar selection plus compile-time modifiers for a pattern.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SyntaxOptions: u32 {
        /// ECMAScript-like grammar (the default).
        const ECMASCRIPT = 0x01;
        /// POSIX basic regular expressions.
        const BASIC = 0x02;
        /// POSIX extended regular expressions.
        const EXTENDED = 0x04;
        /// awk dialect of extended expressions.
        const AWK = 0x08;
        /// grep dialect of basic expressions (newline separates alternatives).
        const GREP = 0x10;
        /// egrep dialect of extended expressions (newline separates alternatives).
        const EGREP = 0x20;

        /// Case-insensitive matching.
        const ICASE = 0x0100;
        /// Do not report sub-expression matches.
        const NOSUBS = 0x0200;
        const OPTIMIZE = 0x0400;
        const COLLATE = 0x0800;
        /// `^` and `$` also match at line boundaries.
        const MULTILINE = 0x1000;

        /// All grammar bits.
        const GRAMMARS = Self::ECMASCRIPT.bits()
            | Self::BASIC.bits()
            | Self::EXTENDED.bits()
            | Self::AWK.bits()
            | Self::GREP.bits()
            | Self::EGREP.bits();
    }
}

impl Default for SyntaxOptions {
    fn default() -> Self {
        SyntaxOptions::ECMASCRIPT
    }
}

/// The grammar a [`SyntaxOptions`] value selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    EcmaScript,
    Basic,
    Extended,
    Awk,
    Grep,
    Egrep,
}

impl SyntaxOptions {
    /// Resolve the selected grammar.
    ///
    /// ## Returns
    /// - `Some(grammar)` when exactly one grammar bit is set, or `Some(Grammar::EcmaScript)` when none is.
    /// - `None` when several grammar bits are set.
    pub fn grammar(self) -> Option<Grammar> {
        let selected = self & SyntaxOptions::GRAMMARS;
        if selected.is_empty() {
            return Some(Grammar::EcmaScript);
        }
        if selected.bits().count_ones() != 1 {
            return None;
        }
        Some(if selected == SyntaxOptions::ECMASCRIPT {
            Grammar::EcmaScript
        } else if selected == SyntaxOptions::BASIC {
            Grammar::Basic
        } else if selected == SyntaxOptions::EXTENDED {
            Grammar::Extended
        } else if selected == SyntaxOptions::AWK {
            Grammar::Awk
        } else if selected == SyntaxOptions::GREP {
            Grammar::Grep
        } else {
            Grammar::Egrep
        })
    }
}

bitflags! {
    /// Match-time behavior modifiers, plus replacement format selectors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MatchFlags: u32 {
        /// Default matching and ECMAScript replacement format.
        const DEFAULT = 0x0000;
        /// The first position is not a line start.
        const NOT_BOL = 0x0001;
        /// The last position is not a line end.
        const NOT_EOL = 0x0002;
        /// The first position is not a word start.
        const NOT_BOW = 0x0004;
        /// The last position is not a word end.
        const NOT_EOW = 0x0008;
        /// Any match is acceptable, not necessarily the preferred one.
        const ANY = 0x0010;
        /// Empty matches are rejected.
        const NOT_NULL = 0x0020;
        /// The match must start at the first position.
        const CONTINUOUS = 0x0040;
        /// A character precedes the first position.
        const PREV_AVAIL = 0x0100;
        /// Replacement templates use sed syntax (`&`, `\1`).
        const FORMAT_SED = 0x0400;
        /// Unmatched text is not copied to replacement output.
        const FORMAT_NO_COPY = 0x0800;
        /// Only the first match is replaced.
        const FORMAT_FIRST_ONLY = 0x1000;
    }
}

impl Default for MatchFlags {
    fn default() -> Self {
        MatchFlags::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grammar_selection_means_ecmascript() {
        assert_eq!(SyntaxOptions::ICASE.grammar(), Some(Grammar::EcmaScript));
        assert_eq!(SyntaxOptions::empty().grammar(), Some(Grammar::EcmaScript));
    }

    #[test]
    fn single_grammar_bit_resolves() {
        assert_eq!((SyntaxOptions::EGREP | SyntaxOptions::ICASE).grammar(), Some(Grammar::Egrep));
        assert_eq!(SyntaxOptions::BASIC.grammar(), Some(Grammar::Basic));
    }

    #[test]
    fn conflicting_grammars_do_not_resolve() {
        assert_eq!((SyntaxOptions::BASIC | SyntaxOptions::EXTENDED).grammar(), None);
    }

    #[test]
    fn default_flags_are_zero() {
        assert_eq!(MatchFlags::default().bits(), 0);
        assert!(MatchFlags::default().is_empty());
        assert_eq!(SyntaxOptions::default().bits(), 0x01);
    }
}
