//! Match flag vocabulary.

use crate::options::MatchFlags;

use super::registry::{self, VocabInfo};

/// Metadata for a match flag.
pub type MatchFlagInfo = VocabInfo<MatchFlags>;

/// Registry of all match flags.
pub const MATCH_FLAGS: &[MatchFlagInfo] = &[
    info(MatchFlags::DEFAULT, "match_default", &["format_default", "default"], "Default behavior."),
    info(MatchFlags::NOT_BOL, "match_not_bol", &[], "The first position is not treated as a line start."),
    info(MatchFlags::NOT_EOL, "match_not_eol", &[], "The last position is not treated as a line end."),
    info(MatchFlags::NOT_BOW, "match_not_bow", &[], "The first position is not treated as a word start."),
    info(MatchFlags::NOT_EOW, "match_not_eow", &[], "The last position is not treated as a word end."),
    info(MatchFlags::ANY, "match_any", &[], "Any match is acceptable."),
    info(MatchFlags::NOT_NULL, "match_not_null", &[], "Empty matches are rejected."),
    info(MatchFlags::CONTINUOUS, "match_continuous", &[], "The match must begin at the first position."),
    info(MatchFlags::PREV_AVAIL, "match_prev_avail", &[], "A valid character precedes the first position."),
    info(MatchFlags::FORMAT_SED, "format_sed", &[], "Replacement templates use sed syntax."),
    info(MatchFlags::FORMAT_NO_COPY, "format_no_copy", &[], "Text outside matches is not copied."),
    info(MatchFlags::FORMAT_FIRST_ONLY, "format_first_only", &[], "Only the first match is replaced."),
];

/// Resolve a single spelling to its flag.
pub fn from_str(name: &str) -> Option<MatchFlags> {
    registry::lookup(MATCH_FLAGS, name)
}

/// Combine several spellings into one flag set.
///
/// ## Returns
/// - `Ok(flags)` with the union of all bits (empty input yields `DEFAULT`).
/// - `Err(name)` with the first unknown spelling.
pub fn parse_all<'a, I>(names: I) -> Result<MatchFlags, &'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .try_fold(MatchFlags::DEFAULT, |acc, name| from_str(name).map(|f| acc | f).ok_or(name))
}

const fn info(
    id: MatchFlags,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> MatchFlagInfo {
    VocabInfo {
        id,
        canonical,
        aliases,
        description,
    }
}
