//! Narrow and wide text.
//!
//! Subjects, patterns and templates are slices of text units. Narrow text is UTF-8 (`u8` units); wide text is
//! UTF-16 (`u16` units). Offsets reported by engines are always measured in units of the caller's width, so a wide
//! subject `"é1"` has its `1` at offset 1, while the narrow spelling has it at offset 2.

use std::fmt;

use thiserror::Error;

/// Narrow text unit.
pub type Narrow = u8;

/// Wide text unit.
pub type Wide = u16;

/// Width of a text unit, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextWidth {
    Narrow,
    Wide,
}

impl fmt::Display for TextWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextWidth::Narrow => write!(f, "narrow"),
            TextWidth::Wide => write!(f, "wide"),
        }
    }
}

/// Ill-formed text for the unit width.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("narrow text is not valid UTF-8 (first bad unit at offset {offset})")]
    InvalidUtf8 { offset: usize },

    #[error("wide text is not valid UTF-16 (unpaired surrogate at offset {offset})")]
    InvalidUtf16 { offset: usize },
}

/// A code unit of narrow or wide text.
pub trait TextUnit: Copy + Eq + fmt::Debug + 'static {
    const WIDTH: TextWidth;

    /// Decode a unit slice into a Rust string.
    fn decode(units: &[Self]) -> Result<String, TextError>;

    /// Encode a Rust string into units of this width.
    fn encode(text: &str) -> Vec<Self>;

    /// Number of units `ch` occupies at this width.
    fn units_in(ch: char) -> usize;

    /// Decode for display; ill-formed sequences become U+FFFD.
    fn render(units: &[Self]) -> String;
}

impl TextUnit for u8 {
    const WIDTH: TextWidth = TextWidth::Narrow;

    fn decode(units: &[u8]) -> Result<String, TextError> {
        std::str::from_utf8(units)
            .map(str::to_owned)
            .map_err(|e| TextError::InvalidUtf8 { offset: e.valid_up_to() })
    }

    fn encode(text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }

    fn units_in(ch: char) -> usize {
        ch.len_utf8()
    }

    fn render(units: &[u8]) -> String {
        String::from_utf8_lossy(units).into_owned()
    }
}

impl TextUnit for u16 {
    const WIDTH: TextWidth = TextWidth::Wide;

    fn decode(units: &[u16]) -> Result<String, TextError> {
        let mut out = String::with_capacity(units.len());
        let mut offset = 0;
        for decoded in char::decode_utf16(units.iter().copied()) {
            match decoded {
                Ok(ch) => {
                    out.push(ch);
                    offset += ch.len_utf16();
                }
                Err(_) => return Err(TextError::InvalidUtf16 { offset }),
            }
        }
        Ok(out)
    }

    fn encode(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    fn units_in(ch: char) -> usize {
        ch.len_utf16()
    }

    fn render(units: &[u16]) -> String {
        String::from_utf16_lossy(units)
    }
}

/// Author-facing text values and the unit slice behind them.
///
/// Lets oracle calls accept `"abc"` for narrow text and `&wide("abc")` for wide text without separate entry points.
pub trait Text {
    type Unit: TextUnit;

    fn units(&self) -> &[Self::Unit];
}

impl Text for str {
    type Unit = u8;

    fn units(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Text for String {
    type Unit = u8;

    fn units(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Text for [u8] {
    type Unit = u8;

    fn units(&self) -> &[u8] {
        self
    }
}

impl Text for [u16] {
    type Unit = u16;

    fn units(&self) -> &[u16] {
        self
    }
}

impl Text for Vec<u16> {
    type Unit = u16;

    fn units(&self) -> &[u16] {
        self
    }
}

/// Build wide text from a string literal.
///
/// ## Examples
/// ```rust
/// use rexcheck_core::wide;
///
/// assert_eq!(wide("ab"), vec![0x61, 0x62]);
/// ```
pub fn wide(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Translate byte offsets of a decoded string back into unit offsets of the original text.
///
/// Engines that work on decoded `str` data use this to report spans in the caller's units.
#[derive(Debug, Clone)]
pub struct OffsetMap {
    /// `None` when bytes and units coincide (narrow text).
    table: Option<Vec<usize>>,
}

impl OffsetMap {
    /// Build the map for `text` decoded from units of width `U`.
    pub fn new<U: TextUnit>(text: &str) -> Self {
        if U::WIDTH == TextWidth::Narrow {
            return Self { table: None };
        }
        let mut table = vec![0; text.len() + 1];
        let mut unit = 0;
        for (byte, ch) in text.char_indices() {
            table[byte] = unit;
            unit += U::units_in(ch);
        }
        table[text.len()] = unit;
        Self { table: Some(table) }
    }

    /// Unit offset of the char boundary at `byte`.
    pub fn unit(&self, byte: usize) -> usize {
        match &self.table {
            None => byte,
            Some(table) => table.get(byte).copied().unwrap_or(byte),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn narrow_decode_rejects_invalid_utf8() {
        let err = u8::decode(&[b'a', 0xff, b'b']).unwrap_err();
        assert_eq!(err, TextError::InvalidUtf8 { offset: 1 });
    }

    #[test]
    fn wide_decode_rejects_unpaired_surrogate() {
        let err = u16::decode(&[0x61, 0xd800, 0x62]).unwrap_err();
        assert_eq!(err, TextError::InvalidUtf16 { offset: 1 });
    }

    #[test]
    fn wide_round_trips_astral_characters() {
        let units = wide("a\u{1F600}b");
        assert_eq!(units.len(), 4);
        assert_eq!(u16::decode(&units).unwrap(), "a\u{1F600}b");
    }

    #[test]
    fn offset_map_counts_utf16_units() {
        let text = "é\u{1F600}x";
        let map = OffsetMap::new::<u16>(text);
        // 'é' is 2 bytes / 1 unit, the emoji 4 bytes / 2 units.
        assert_eq!(map.unit(0), 0);
        assert_eq!(map.unit(2), 1);
        assert_eq!(map.unit(6), 3);
        assert_eq!(map.unit(7), 4);
    }

    #[test]
    fn offset_map_is_identity_for_narrow() {
        let map = OffsetMap::new::<u8>("é\u{1F600}x");
        assert_eq!(map.unit(6), 6);
    }

    #[test]
    fn text_trait_selects_unit_width() {
        fn width<T: Text + ?Sized>(_: &T) -> TextWidth {
            <T::Unit as TextUnit>::WIDTH
        }
        assert_eq!(width("abc"), TextWidth::Narrow);
        assert_eq!(width(&wide("abc")), TextWidth::Wide);
        assert_eq!(width(wide("abc").as_slice()), TextWidth::Wide);
    }
}
