//! Match results reported by engines.

use std::fmt;

/// Half-open `[start, end)` range in subject text units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether the span is well-formed and lies inside a subject of `len` units.
    pub fn fits(&self, len: usize) -> bool {
        self.start <= self.end && self.end <= len
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.start, self.end)
    }
}

/// One capture slot of a match. Unmatched groups carry no offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Group {
    span: Option<Span>,
}

impl Group {
    pub fn matched(start: usize, end: usize) -> Self {
        Self {
            span: Some(Span::new(start, end)),
        }
    }

    pub fn unmatched() -> Self {
        Self { span: None }
    }

    pub fn is_matched(&self) -> bool {
        self.span.is_some()
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// The matched units of `subject`, or `None` for unmatched groups and out-of-range spans.
    pub fn text<'s, U>(&self, subject: &'s [U]) -> Option<&'s [U]> {
        self.span.and_then(|s| subject.get(s.start..s.end))
    }
}

impl From<Option<Span>> for Group {
    fn from(span: Option<Span>) -> Self {
        Self { span }
    }
}

/// Ordered capture groups; group 0 is the overall match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchResult {
    groups: Vec<Group>,
}

impl MatchResult {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// Number of groups, including group 0.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Group> {
        self.groups.get(index).copied()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Span of the overall match.
    pub fn whole(&self) -> Option<Span> {
        self.groups.first().and_then(Group::span)
    }

    /// Text of the overall match within `subject`.
    pub fn whole_text<'s, U>(&self, subject: &'s [U]) -> Option<&'s [U]> {
        self.groups.first().and_then(|g| g.text(subject))
    }

    /// Capture groups after group 0.
    pub fn captures(&self) -> &[Group] {
        self.groups.get(1..).unwrap_or(&[])
    }
}

impl FromIterator<Group> for MatchResult {
    fn from_iter<I: IntoIterator<Item = Group>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_skip_group_zero() {
        let result: MatchResult = [Group::matched(1, 2), Group::matched(1, 2), Group::unmatched()]
            .into_iter()
            .collect();
        assert_eq!(result.len(), 3);
        assert_eq!(result.captures().len(), 2);
        assert!(!result.captures()[1].is_matched());
    }

    #[test]
    fn group_text_slices_subject() {
        let subject = b"xab";
        assert_eq!(Group::matched(1, 3).text(subject), Some(&b"ab"[..]));
        assert_eq!(Group::matched(2, 9).text(subject), None);
        assert_eq!(Group::unmatched().text(subject), None);
    }

    #[test]
    fn span_fit_checks_order_and_bounds() {
        assert!(Span::new(0, 3).fits(3));
        assert!(!Span::new(2, 1).fits(3));
        assert!(!Span::new(1, 4).fits(3));
    }

    #[test]
    fn empty_result_has_no_captures() {
        let result = MatchResult::default();
        assert!(result.captures().is_empty());
        assert_eq!(result.whole(), None);
    }
}
