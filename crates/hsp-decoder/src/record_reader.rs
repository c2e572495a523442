use hsp_types::{KeyCode, PayloadShape, Point, ScreenSize, SignalKind, SignalRecord};
use hsp_wire::WireError;
use hsp_wire::layout::{read_tag, COORD_WIDTH, KEY_CODE_WIDTH, TAG_WIDTH, TITLE_LENGTH_WIDTH};
use hsp_wire::symbols::read_field;
use hsp_wire::text::{extent_lossy, measure_utf16, TextExtent};

use crate::config::DecoderConfig;
use crate::error::DecodeError;

/// Outcome of one attempt to read a record off the front of a buffer.
#[derive(Debug)]
pub(crate) enum Step {
    /// A full record was present and occupies `consumed` bytes.
    Record {
        record: SignalRecord,
        consumed: usize,
    },

    /// The buffer holds a prefix of a record, or nothing at all. The
    /// buffer must be kept as-is and retried with more input.
    NeedMore,

    /// The record is damaged, but where it ends is known: it occupies
    /// `consumed` bytes and the next record starts right after it.
    Damaged {
        error: DecodeError,
        consumed: usize,
    },
}

/// Read the record that starts at `buf[0]`.
///
/// `base` is the absolute stream offset of `buf[0]`; it is only used to
/// place errors. The buffer is never modified: on `NeedMore` the caller
/// retains every byte, on `Record` and `Damaged` it drops exactly
/// `consumed` bytes. An `Err` means the record's end cannot be known
/// (bad tag, unusable title length), so nothing after it can be trusted.
///
/// ```text
///   buf ──▶ tag (8) ──▶ shape
///                        ├── Empty           → Record, consumed = 8
///                        ├── Fixed(w)        → NeedMore until 8 + w bytes,
///                        │                     then Record or Damaged
///                        └── LengthPrefixed  → NeedMore until 8 + 32 bytes,
///                                              then until N - 1 UTF-16 units
///                                              of text
/// ```
pub(crate) fn read_record(
    buf: &[u8],
    base: u64,
    config: &DecoderConfig,
) -> Result<Step, DecodeError> {
    let tag = match read_tag(buf, 0) {
        Ok(Some(tag)) => tag,
        Ok(None) => return Ok(Step::NeedMore),
        Err(source) => {
            return Err(DecodeError::MalformedTag {
                offset: at(base, &source),
                source,
            });
        }
    };

    let kind = SignalKind::from_wire_id(tag)
        .map_err(|_| DecodeError::UnrecognizedTag { tag, offset: base })?;

    match kind.payload_shape() {
        PayloadShape::Empty => Ok(Step::Record {
            record: empty_record(kind),
            consumed: TAG_WIDTH,
        }),
        PayloadShape::Fixed(width) => {
            let consumed = TAG_WIDTH + width;
            if buf.len() < consumed {
                return Ok(Step::NeedMore);
            }
            Ok(match fixed_record(kind, buf, base) {
                Ok(record) => Step::Record { record, consumed },
                Err(error) => Step::Damaged { error, consumed },
            })
        }
        PayloadShape::LengthPrefixed => read_title(buf, base, config),
    }
}

fn empty_record(kind: SignalKind) -> SignalRecord {
    match kind {
        SignalKind::WindowCreationFailed => SignalRecord::WindowCreationFailed,
        _ => SignalRecord::WindowCreationSucceeded,
    }
}

/// Decode a fixed-width record. The caller has checked the length.
fn fixed_record(kind: SignalKind, buf: &[u8], base: u64) -> Result<SignalRecord, DecodeError> {
    let field = |offset: usize, width: usize, name: &'static str| {
        read_field(buf, offset, width).map_err(|source| DecodeError::MalformedField {
            kind,
            field: name,
            offset: at(base, &source),
            source,
        })
    };

    let y_offset = TAG_WIDTH + COORD_WIDTH;

    let record = match kind {
        SignalKind::HookInstalled => {
            let width = field(TAG_WIDTH, COORD_WIDTH, "screen width")?;
            let height = field(y_offset, COORD_WIDTH, "screen height")?;
            SignalRecord::HookInstalled(ScreenSize::new(width, height))
        }
        SignalKind::MouseMoved | SignalKind::MouseClicked => {
            let x = field(TAG_WIDTH, COORD_WIDTH, "x coordinate")?;
            let y = field(y_offset, COORD_WIDTH, "y coordinate")?;
            let point = Point::from_hook(x, y);
            if kind == SignalKind::MouseMoved {
                SignalRecord::MouseMoved(point)
            } else {
                SignalRecord::MouseClicked(point)
            }
        }
        _ => {
            let code = field(TAG_WIDTH, KEY_CODE_WIDTH, "virtual key code")?;
            #[allow(clippy::cast_possible_truncation)]
            SignalRecord::KeyPressed(KeyCode::from_wire_byte(code as u8))
        }
    };

    Ok(record)
}

/// Decode a window title record: tag, declared length, then text.
///
/// The declared length is one more than the number of UTF-16 code units
/// that follow. The text is UTF-8, so its byte length is only known once
/// it has been scanned.
fn read_title(buf: &[u8], base: u64, config: &DecoderConfig) -> Result<Step, DecodeError> {
    let text_start = TAG_WIDTH + TITLE_LENGTH_WIDTH;
    if buf.len() < text_start {
        return Ok(Step::NeedMore);
    }

    let declared = read_field(buf, TAG_WIDTH, TITLE_LENGTH_WIDTH).map_err(|source| {
        DecodeError::MalformedField {
            kind: SignalKind::WindowTitleChanged,
            field: "title length",
            offset: at(base, &source),
            source,
        }
    })?;

    let length_offset = base + TAG_WIDTH as u64;
    let units = declared
        .checked_sub(1)
        .ok_or(DecodeError::InvalidTitleLength {
            offset: length_offset,
        })?;

    if units > config.max_title_units {
        return Err(DecodeError::TitleTooLong {
            units,
            limit: config.max_title_units,
            offset: length_offset,
        });
    }

    let text = &buf[text_start..];
    let units = units as usize;

    // Every unit takes at least one byte.
    if text.len() < units {
        return Ok(Step::NeedMore);
    }

    let text_base = base + text_start as u64;
    let byte_len = match measure_utf16(text, units) {
        Ok(TextExtent::Complete { byte_len }) => byte_len,
        Ok(TextExtent::Partial) => return Ok(Step::NeedMore),
        Err(source) => {
            // Report once the whole damaged title is buffered, so the
            // decoder can resume right after it.
            return Ok(match extent_lossy(text, units) {
                Some(byte_len) => Step::Damaged {
                    error: DecodeError::InvalidTitleText {
                        offset: at(text_base, &source),
                    },
                    consumed: text_start + byte_len,
                },
                None => Step::NeedMore,
            });
        }
    };

    let consumed = text_start + byte_len;
    Ok(match std::str::from_utf8(&text[..byte_len]) {
        Ok(title) => Step::Record {
            record: SignalRecord::WindowTitleChanged(title.to_owned()),
            consumed,
        },
        Err(_) => Step::Damaged {
            error: DecodeError::InvalidTitleText { offset: text_base },
            consumed,
        },
    })
}

/// Absolute offset of a wire error found in a buffer starting at `base`.
fn at(base: u64, err: &WireError) -> u64 {
    base + err.offset().unwrap_or(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(buf: &[u8]) -> Result<Step, DecodeError> {
        read_record(buf, 0, &DecoderConfig::default())
    }

    fn bits(value: u32, width: usize) -> String {
        format!("{value:0width$b}")
    }

    #[test]
    fn empty_buffer_needs_more() {
        assert!(matches!(read(b"").unwrap(), Step::NeedMore));
    }

    #[test]
    fn tag_only_record() {
        match read(b"00000001").unwrap() {
            Step::Record { record, consumed } => {
                assert_eq!(record, SignalRecord::WindowCreationSucceeded);
                assert_eq!(consumed, 8);
            }
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn fixed_record_waits_for_full_payload() {
        let wire = format!("00000011{}{}", bits(10, 32), bits(20, 32));
        assert!(matches!(read(&wire.as_bytes()[..71]).unwrap(), Step::NeedMore));

        match read(wire.as_bytes()).unwrap() {
            Step::Record { record, consumed } => {
                assert_eq!(record, SignalRecord::MouseMoved(Point::new(10, 20)));
                assert_eq!(consumed, 72);
            }
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn trailing_bytes_not_consumed() {
        let wire = format!("0000010101110000{}", "0000");
        match read(wire.as_bytes()).unwrap() {
            Step::Record { record, consumed } => {
                assert_eq!(record, SignalRecord::KeyPressed(KeyCode::F1));
                assert_eq!(consumed, 16);
            }
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn unknown_tag_reports_base_offset() {
        let err = read_record(b"00000111", 40, &DecoderConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnrecognizedTag { tag: 7, offset: 40 }
        ));
    }

    #[test]
    fn malformed_coordinate_skips_whole_record() {
        let mut wire = format!("00000100{}{}", bits(1, 32), bits(2, 32)).into_bytes();
        wire[50] = b'2';
        match read_record(&wire, 100, &DecoderConfig::default()).unwrap() {
            Step::Damaged {
                error:
                    DecodeError::MalformedField {
                        kind,
                        field,
                        offset,
                        ..
                    },
                consumed,
            } => {
                assert_eq!(kind, SignalKind::MouseClicked);
                assert_eq!(field, "y coordinate");
                assert_eq!(offset, 150);
                assert_eq!(consumed, 72);
            }
            other => panic!("expected a damaged MouseClicked, got {other:?}"),
        }
    }

    #[test]
    fn malformed_title_length_has_no_extent() {
        let mut wire = format!("00000110{}", bits(3, 32)).into_bytes();
        wire[20] = b'x';
        let err = read(&wire).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedField {
                field: "title length",
                offset: 20,
                ..
            }
        ));
    }

    #[test]
    fn title_waits_for_length_then_text() {
        let wire = format!("00000110{}hello", bits(6, 32));
        let bytes = wire.as_bytes();
        assert!(matches!(read(&bytes[..39]).unwrap(), Step::NeedMore));
        assert!(matches!(read(&bytes[..44]).unwrap(), Step::NeedMore));

        match read(bytes).unwrap() {
            Step::Record { record, consumed } => {
                assert_eq!(record, SignalRecord::WindowTitleChanged("hello".to_string()));
                assert_eq!(consumed, 45);
            }
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn zero_title_length_rejected() {
        let wire = format!("00000110{}", bits(0, 32));
        let err = read_record(wire.as_bytes(), 8, &DecoderConfig::default()).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidTitleLength { offset: 16 }));
    }

    #[test]
    fn title_over_cap_rejected_before_text_arrives() {
        let config = DecoderConfig {
            max_title_units: 10,
            ..DecoderConfig::default()
        };
        let wire = format!("00000110{}", bits(12, 32));
        let err = read_record(wire.as_bytes(), 0, &config).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TitleTooLong {
                units: 11,
                limit: 10,
                ..
            }
        ));
    }

    #[test]
    fn invalid_title_bytes_skip_declared_extent() {
        let mut wire = format!("00000110{}", bits(3, 32)).into_bytes();
        wire.extend_from_slice(&[b'o', 0xFF]);
        match read(&wire).unwrap() {
            Step::Damaged { error, consumed } => {
                assert!(matches!(error, DecodeError::InvalidTitleText { offset: 41 }));
                assert_eq!(consumed, 42);
            }
            other => panic!("expected a damaged title, got {other:?}"),
        }
    }

    #[test]
    fn invalid_title_waits_for_its_extent() {
        let mut wire = format!("00000110{}", bits(4, 32)).into_bytes();
        wire.extend_from_slice(&[0xFF, b'a']);
        assert!(matches!(read(&wire).unwrap(), Step::NeedMore));
    }

    #[test]
    fn title_length_counts_utf16_units() {
        let wire = format!("00000110{}a😀b0000010101110000", bits(5, 32));
        match read(wire.as_bytes()).unwrap() {
            Step::Record { record, consumed } => {
                assert_eq!(record, SignalRecord::WindowTitleChanged("a😀b".to_string()));
                assert_eq!(consumed, 40 + "a😀b".len());
            }
            other => panic!("expected a record, got {other:?}"),
        }
    }
}
