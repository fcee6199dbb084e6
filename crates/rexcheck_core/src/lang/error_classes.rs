//! Error class vocabulary.

use crate::error_class::ErrorClass;

use super::registry::{self, VocabInfo};

/// Metadata for an error class.
pub type ErrorClassInfo = VocabInfo<ErrorClass>;

/// Registry of all error classes, in code order.
pub const ERROR_CLASSES: &[ErrorClassInfo] = &[
    info(ErrorClass::Collate, "error_collate", &["collate"], "Invalid collating element name."),
    info(ErrorClass::Ctype, "error_ctype", &["ctype"], "Invalid character class name."),
    info(ErrorClass::Escape, "error_escape", &["escape"], "Invalid escaped character or trailing escape."),
    info(ErrorClass::Backref, "error_backref", &["backref"], "Invalid back reference."),
    info(ErrorClass::Brack, "error_brack", &["brack"], "Mismatched `[` and `]`."),
    info(ErrorClass::Paren, "error_paren", &["paren", "unbalanced_grouping"], "Mismatched `(` and `)`."),
    info(ErrorClass::Brace, "error_brace", &["brace"], "Mismatched `{` and `}`."),
    info(ErrorClass::BadBrace, "error_badbrace", &["badbrace"], "Invalid range inside `{}`."),
    info(ErrorClass::Range, "error_range", &["range"], "Invalid character range, such as `[b-a]`."),
    info(ErrorClass::Space, "error_space", &["space"], "Insufficient memory to compile the pattern."),
    info(ErrorClass::BadRepeat, "error_badrepeat", &["badrepeat"], "A repeat operator has nothing to repeat."),
    info(ErrorClass::Complexity, "error_complexity", &["complexity"], "The pattern is too complex for the engine."),
    info(ErrorClass::Stack, "error_stack", &["stack"], "The pattern nests too deeply for the engine."),
    info(ErrorClass::Parse, "error_parse", &["parse"], "Generic parse failure."),
    info(ErrorClass::Syntax, "error_syntax", &["syntax"], "Generic syntax failure."),
];

/// Resolve a spelling (canonical or alias) to an [`ErrorClass`].
pub fn from_str(name: &str) -> Option<ErrorClass> {
    registry::lookup(ERROR_CLASSES, name)
}

/// Return the canonical spelling for an error class.
pub fn as_str(class: ErrorClass) -> &'static str {
    info_for(class).canonical
}

/// Resolve a numeric code to an [`ErrorClass`].
pub fn from_code(code: u32) -> Option<ErrorClass> {
    ERROR_CLASSES.get(code as usize).map(|i| i.id)
}

/// Return the full metadata entry for an error class.
///
/// ## Panics
/// - If the registry is missing an entry for `class` (programming error).
#[allow(clippy::expect_used)]
pub fn info_for(class: ErrorClass) -> &'static ErrorClassInfo {
    ERROR_CLASSES
        .iter()
        .find(|i| i.id == class)
        .expect("error class info missing")
}

const fn info(
    id: ErrorClass,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> ErrorClassInfo {
    VocabInfo {
        id,
        canonical,
        aliases,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_in_code_order() {
        for (index, item) in ERROR_CLASSES.iter().enumerate() {
            assert_eq!(item.id.code() as usize, index, "{} out of order", item.canonical);
        }
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(from_str("unbalanced_grouping"), Some(ErrorClass::Paren));
        assert_eq!(from_str("error_badbrace"), Some(ErrorClass::BadBrace));
        assert_eq!(from_str("Error_Paren"), None);
    }

    #[test]
    fn codes_resolve() {
        assert_eq!(from_code(3), Some(ErrorClass::Backref));
        assert_eq!(from_code(15), None);
    }
}
