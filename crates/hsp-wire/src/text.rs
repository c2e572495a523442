use crate::error::WireError;

// Titles are counted in UTF-16 code units, the unit the hook gets its
// window text length in. The text itself travels as UTF-8: a code point
// outside the Basic Multilingual Plane is four bytes on the wire and two
// units in the count, everything else is one unit. For the common ASCII
// title units, characters and bytes all agree.

/// How far a run of UTF-16 units extends into a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextExtent {
    /// All requested units are present and occupy `byte_len` bytes.
    Complete { byte_len: usize },

    /// The buffer ends before the last requested unit does.
    Partial,
}

/// Byte length of a UTF-8 sequence, judged from its lead byte.
///
/// Returns `None` for bytes that can never start a sequence:
/// continuation bytes, the overlong leads `0xC0`/`0xC1`, and
/// everything above `0xF4`.
fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// One step of a scan over UTF-8 bytes.
enum Scan {
    /// A valid code point of `len` bytes worth `units` UTF-16 units.
    Char { len: usize, units: usize },
    /// The buffer stops inside a sequence that may still become valid.
    Partial,
    /// The byte at the scan position can never start a valid sequence.
    Invalid,
}

fn scan_at(buf: &[u8], pos: usize) -> Scan {
    let Some(len) = buf.get(pos).copied().and_then(sequence_len) else {
        return Scan::Invalid;
    };

    let Some(sequence) = buf.get(pos..pos + len) else {
        // What we have must still look like continuation bytes.
        if buf[pos + 1..].iter().any(|&b| b & 0xC0 != 0x80) {
            return Scan::Invalid;
        }
        return Scan::Partial;
    };

    if std::str::from_utf8(sequence).is_err() {
        return Scan::Invalid;
    }

    Scan::Char {
        len,
        units: if len == 4 { 2 } else { 1 },
    }
}

/// Measure the first `units` UTF-16 code units of UTF-8 text in `buf`.
///
/// A buffer that stops in the middle of a character (or before `units`
/// units) is [`TextExtent::Partial`]. The caller keeps the bytes and
/// retries once more input arrives.
///
/// # Errors
///
/// - [`WireError::InvalidUtf8`] with the offset of the offending
///   sequence when the bytes cannot become valid UTF-8 no matter what
///   follows.
/// - [`WireError::SplitSurrogatePair`] when the count ends between the
///   two units of a four-byte character.
pub fn measure_utf16(buf: &[u8], units: usize) -> Result<TextExtent, WireError> {
    let mut pos = 0;
    let mut remaining = units;

    while remaining > 0 {
        if pos == buf.len() {
            return Ok(TextExtent::Partial);
        }
        match scan_at(buf, pos) {
            Scan::Char { units: 2, .. } if remaining == 1 => {
                return Err(WireError::SplitSurrogatePair { offset: pos });
            }
            Scan::Char { len, units } => {
                pos += len;
                remaining -= units;
            }
            Scan::Partial => return Ok(TextExtent::Partial),
            Scan::Invalid => return Err(WireError::InvalidUtf8 { offset: pos }),
        }
    }

    Ok(TextExtent::Complete { byte_len: pos })
}

/// Byte extent of `units` UTF-16 units when the text may be damaged.
///
/// Valid characters count as in [`measure_utf16`]; every byte that
/// cannot start a valid sequence counts as one unit, and a four-byte
/// character straddling the end of the count is taken whole. This gives
/// the place the record would have ended had the text been clean.
///
/// Returns `None` while the buffer is too short to tell.
pub fn extent_lossy(buf: &[u8], units: usize) -> Option<usize> {
    let mut pos = 0;
    let mut remaining = units;

    while remaining > 0 {
        if pos == buf.len() {
            return None;
        }
        let (len, counted) = match scan_at(buf, pos) {
            Scan::Char { len, units } => (len, units),
            Scan::Partial => return None,
            Scan::Invalid => (1, 1),
        };
        pos += len;
        remaining = remaining.saturating_sub(counted);
    }

    Some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_counts_bytes() {
        assert_eq!(
            measure_utf16(b"hello world", 5).unwrap(),
            TextExtent::Complete { byte_len: 5 }
        );
    }

    #[test]
    fn zero_units() {
        assert_eq!(
            measure_utf16(b"", 0).unwrap(),
            TextExtent::Complete { byte_len: 0 }
        );
    }

    #[test]
    fn bmp_characters_are_one_unit() {
        // "한글" is two units, three bytes each
        let text = "한글 창".as_bytes();
        assert_eq!(
            measure_utf16(text, 2).unwrap(),
            TextExtent::Complete { byte_len: 6 }
        );
        assert_eq!(
            measure_utf16(text, 4).unwrap(),
            TextExtent::Complete { byte_len: text.len() }
        );
    }

    #[test]
    fn astral_characters_are_two_units() {
        let text = "a😀b".as_bytes();
        assert_eq!(
            measure_utf16(text, 4).unwrap(),
            TextExtent::Complete { byte_len: 6 }
        );
        assert_eq!(
            measure_utf16(text, 3).unwrap(),
            TextExtent::Complete { byte_len: 5 }
        );
    }

    #[test]
    fn count_ending_inside_pair_rejected() {
        let result = measure_utf16("a😀".as_bytes(), 2);
        assert!(matches!(
            result,
            Err(WireError::SplitSurrogatePair { offset: 1 })
        ));
    }

    #[test]
    fn short_buffer_is_partial() {
        assert_eq!(measure_utf16(b"hel", 5).unwrap(), TextExtent::Partial);
    }

    #[test]
    fn split_inside_character_is_partial() {
        let text = "é".as_bytes();
        assert_eq!(measure_utf16(&text[..1], 1).unwrap(), TextExtent::Partial);
        let emoji = "🦀".as_bytes();
        assert_eq!(measure_utf16(&emoji[..3], 2).unwrap(), TextExtent::Partial);
    }

    #[test]
    fn stray_continuation_byte() {
        let result = measure_utf16(&[b'a', 0x80, b'b'], 3);
        assert!(matches!(result, Err(WireError::InvalidUtf8 { offset: 1 })));
    }

    #[test]
    fn truncated_sequence_with_bad_follower() {
        // 0xE4 announces three bytes, but 'x' is not a continuation byte
        let result = measure_utf16(&[0xE4, b'x'], 1);
        assert!(matches!(result, Err(WireError::InvalidUtf8 { offset: 0 })));
    }

    #[test]
    fn overlong_lead_rejected() {
        let result = measure_utf16(&[0xC0, 0xAF], 1);
        assert!(matches!(result, Err(WireError::InvalidUtf8 { offset: 0 })));
    }

    #[test]
    fn surrogate_rejected() {
        // U+D800 encoded directly is not valid UTF-8
        let result = measure_utf16(&[0xED, 0xA0, 0x80], 1);
        assert!(matches!(result, Err(WireError::InvalidUtf8 { offset: 0 })));
    }

    #[test]
    fn trailing_bytes_ignored() {
        assert_eq!(
            measure_utf16(b"ab\xFF\xFF", 2).unwrap(),
            TextExtent::Complete { byte_len: 2 }
        );
    }

    #[test]
    fn lossy_extent_counts_bad_bytes_as_units() {
        assert_eq!(extent_lossy(&[b'o', 0xFF, b'k', b'!'], 3), Some(3));
        assert_eq!(extent_lossy(&[0xE4, b'x', b'y'], 2), Some(2));
    }

    #[test]
    fn lossy_extent_agrees_on_clean_text() {
        let text = "日本 🦀 ok".as_bytes();
        let units = "日本 🦀 ok".encode_utf16().count();
        assert_eq!(extent_lossy(text, units), Some(text.len()));
    }

    #[test]
    fn lossy_extent_takes_straddling_pair_whole() {
        assert_eq!(extent_lossy("a😀b".as_bytes(), 2), Some(5));
    }

    #[test]
    fn lossy_extent_waits_for_more() {
        assert_eq!(extent_lossy(&[0xFF, b'a'], 3), None);
        assert_eq!(extent_lossy(&"é".as_bytes()[..1], 1), None);
    }
}
