//! Classification of pattern compilation failures.

use std::fmt;

use crate::lang;

/// Why an engine rejected a pattern.
///
/// Codes follow declaration order (`Collate` is 0, `Syntax` is 14) and are printed in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorClass {
    /// Invalid collating element name.
    Collate,
    /// Invalid character class name.
    Ctype,
    /// Invalid escaped character or trailing escape.
    Escape,
    /// Invalid back reference.
    Backref,
    /// Mismatched `[` and `]`.
    Brack,
    /// Mismatched `(` and `)`.
    Paren,
    /// Mismatched `{` and `}`.
    Brace,
    /// Invalid range inside `{}`.
    BadBrace,
    /// Invalid character range such as `[b-a]`.
    Range,
    /// Out of memory while compiling.
    Space,
    /// Repeat operator with nothing to repeat.
    BadRepeat,
    /// Pattern too complex for the engine.
    Complexity,
    /// Nesting too deep for the engine.
    Stack,
    /// Generic parse failure.
    Parse,
    /// Generic syntax failure.
    Syntax,
}

impl ErrorClass {
    /// Numeric code of this class.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Canonical spelling (for example `error_paren`).
    pub fn as_str(self) -> &'static str {
        lang::error_classes::as_str(self)
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:X})", self.as_str(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_declaration_order() {
        assert_eq!(ErrorClass::Collate.code(), 0);
        assert_eq!(ErrorClass::Paren.code(), 5);
        assert_eq!(ErrorClass::Syntax.code(), 14);
    }

    #[test]
    fn display_shows_name_and_code() {
        assert_eq!(ErrorClass::BadRepeat.to_string(), "error_badrepeat (0xA)");
    }
}
