//! Syntax option vocabulary.

use crate::options::SyntaxOptions;

use super::registry::{self, VocabInfo};

/// Metadata for a syntax option.
pub type SyntaxOptionInfo = VocabInfo<SyntaxOptions>;

/// Registry of all syntax options: grammars first, then modifiers.
pub const SYNTAX_OPTIONS: &[SyntaxOptionInfo] = &[
    info(SyntaxOptions::ECMASCRIPT, "ECMAScript", &["ecmascript"], "ECMAScript-like grammar (default)."),
    info(SyntaxOptions::BASIC, "basic", &[], "POSIX basic regular expression grammar."),
    info(SyntaxOptions::EXTENDED, "extended", &[], "POSIX extended regular expression grammar."),
    info(SyntaxOptions::AWK, "awk", &[], "awk grammar."),
    info(SyntaxOptions::GREP, "grep", &[], "grep grammar; newlines separate alternatives."),
    info(SyntaxOptions::EGREP, "egrep", &[], "egrep grammar; newlines separate alternatives."),
    info(SyntaxOptions::ICASE, "icase", &["case_insensitive"], "Match without regard to case."),
    info(SyntaxOptions::NOSUBS, "nosubs", &[], "Report only the overall match, no sub-expressions."),
    info(SyntaxOptions::OPTIMIZE, "optimize", &[], "Favor matching speed over construction speed."),
    info(SyntaxOptions::COLLATE, "collate", &[], "Character ranges are locale-sensitive."),
    info(SyntaxOptions::MULTILINE, "multiline", &[], "`^` and `$` also match at line boundaries."),
];

/// Resolve a single spelling to its option bit.
pub fn from_str(name: &str) -> Option<SyntaxOptions> {
    registry::lookup(SYNTAX_OPTIONS, name)
}

/// Combine several spellings into one option set.
///
/// ## Returns
/// - `Ok(options)` with the union of all bits (empty input yields ECMAScript).
/// - `Err(name)` with the first unknown spelling.
pub fn parse_all<'a, I>(names: I) -> Result<SyntaxOptions, &'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut options = SyntaxOptions::empty();
    for name in names {
        options |= from_str(name).ok_or(name)?;
    }
    if options.is_empty() {
        options = SyntaxOptions::ECMASCRIPT;
    }
    Ok(options)
}

const fn info(
    id: SyntaxOptions,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> SyntaxOptionInfo {
    VocabInfo {
        id,
        canonical,
        aliases,
        description,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn every_named_bit_is_registered() {
        for (name, flag) in SyntaxOptions::all().iter_names() {
            if name == "GRAMMARS" {
                continue;
            }
            assert!(SYNTAX_OPTIONS.iter().any(|i| i.id == flag), "{name} missing from registry");
        }
    }

    #[test]
    fn parse_all_unions_bits() {
        let options = parse_all(["ECMAScript", "icase"]).unwrap();
        assert_eq!(options, SyntaxOptions::ECMASCRIPT | SyntaxOptions::ICASE);
    }

    #[test]
    fn parse_all_defaults_to_ecmascript() {
        assert_eq!(parse_all([]).unwrap(), SyntaxOptions::ECMASCRIPT);
    }

    #[test]
    fn parse_all_reports_unknown_name() {
        assert_eq!(parse_all(["icase", "perl"]), Err("perl"));
    }
}
