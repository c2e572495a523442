use bytes::{Buf, BytesMut};
use hsp_types::SignalRecord;

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::record_reader::{read_record, Step};

/// What a single [`SignalDecoder::push`] produced.
///
/// Records decoded before an error in the same push are kept; the error,
/// if any, describes the first record that could not be interpreted.
///
/// ```text
/// ┌────────────────────────────────────────────────────────────┐
/// │ PushOutcome                                                │
/// │   records: Vec<SignalRecord>  ← completed, in wire order   │
/// │   error:   Option<DecodeError> ← first failure, if any     │
/// └────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Default)]
pub struct PushOutcome {
    pub records: Vec<SignalRecord>,
    pub error: Option<DecodeError>,
}

impl PushOutcome {
    /// `true` when the push raised no error.
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }

    /// Collapse into a `Result`, dropping the records if an error occurred.
    ///
    /// # Errors
    ///
    /// Returns the push's error, if it had one.
    pub fn into_result(self) -> Result<Vec<SignalRecord>, DecodeError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.records),
        }
    }
}

/// Incremental decoder for the hook's symbol stream.
///
/// Bytes arrive in arbitrary chunks: a chunk may hold several records,
/// a fraction of one, or nothing. [`push`](Self::push) appends the chunk
/// to an internal buffer, decodes every record that is now complete, and
/// keeps the unconsumed suffix for the next call. Splitting a stream
/// differently never changes the records it decodes to.
///
/// A push reports at most one error. When the damaged record's extent
/// is known (a bad symbol in a coordinate, size or key field, or title
/// text that is not UTF-8) the decoder skips exactly that record and
/// stops; whatever follows stays pending and is decoded by the next
/// push, which may be empty. When the extent is unknown (a bad or
/// unrecognized tag, an unusable title length) the decoder drops
/// everything it has buffered and expects the next push to begin with a
/// tag. It never guesses where a record begins inside damaged input.
///
/// # Example
///
/// ```rust
/// use hsp_decoder::SignalDecoder;
/// use hsp_types::{Point, SignalRecord};
///
/// let wire = format!("00000011{:032b}{:032b}", 640, 480);
/// let (head, tail) = wire.as_bytes().split_at(20);
///
/// let mut decoder = SignalDecoder::new();
/// assert!(decoder.push(head).records.is_empty());
/// assert_eq!(decoder.pending(), 20);
///
/// let outcome = decoder.push(tail);
/// assert_eq!(outcome.records, vec![SignalRecord::MouseMoved(Point::new(640, 480))]);
/// assert!(decoder.finish().is_ok());
/// ```
#[derive(Debug, Default)]
pub struct SignalDecoder {
    buf: BytesMut,
    offset: u64,
    config: DecoderConfig,
}

impl SignalDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            buf: BytesMut::new(),
            offset: 0,
            config,
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Feed the next chunk of the stream.
    ///
    /// Returns every record completed by this chunk, in wire order, up
    /// to the first error. An empty chunk is valid; after an error it
    /// resumes decoding whatever the previous push left pending.
    pub fn push(&mut self, chunk: &[u8]) -> PushOutcome {
        self.buf.extend_from_slice(chunk);

        let mut outcome = PushOutcome::default();
        let mut cursor = 0;

        while cursor < self.buf.len() {
            let base = self.offset + cursor as u64;
            match read_record(&self.buf[cursor..], base, &self.config) {
                Ok(Step::Record { record, consumed }) => {
                    outcome.records.push(record);
                    cursor += consumed;
                }
                Ok(Step::NeedMore) => break,
                Ok(Step::Damaged { error, consumed }) => {
                    outcome.error = Some(error);
                    cursor += consumed;
                    break;
                }
                Err(err) => {
                    outcome.error = Some(err);
                    cursor = self.buf.len();
                }
            }
        }

        self.buf.advance(cursor);
        self.offset += cursor as u64;
        outcome
    }

    /// Number of buffered bytes that do not yet form a record.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Absolute stream offset of the first pending byte: every byte
    /// before it has been decoded or discarded.
    pub fn stream_offset(&self) -> u64 {
        self.offset
    }

    /// Check that no partial record is buffered, without consuming the
    /// decoder.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TruncatedStream`] if bytes are pending.
    pub fn check_complete(&self) -> Result<(), DecodeError> {
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(DecodeError::TruncatedStream {
                pending: self.buf.len(),
                offset: self.offset,
            })
        }
    }

    /// Declare end of stream.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TruncatedStream`] if a partial record is
    /// still buffered, since no more bytes will arrive to complete it.
    pub fn finish(self) -> Result<(), DecodeError> {
        self.check_complete()
    }

    /// Drop any pending bytes. The stream offset moves past them.
    pub fn reset(&mut self) {
        self.offset += self.buf.len() as u64;
        self.buf.clear();
    }
}

/// Decode a complete captured stream in one call.
///
/// # Errors
///
/// Returns the first decode error, or [`DecodeError::TruncatedStream`]
/// if the stream ends inside a record.
pub fn decode_all(stream: &[u8]) -> Result<Vec<SignalRecord>, DecodeError> {
    decode_all_with(stream, &DecoderConfig::default())
}

/// [`decode_all`] with explicit limits.
///
/// # Errors
///
/// Same as [`decode_all`].
pub fn decode_all_with(
    stream: &[u8],
    config: &DecoderConfig,
) -> Result<Vec<SignalRecord>, DecodeError> {
    let mut decoder = SignalDecoder::with_config(config.clone());
    let records = decoder.push(stream).into_result()?;
    decoder.finish()?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hsp_encoder::SignalEncoder;
    use hsp_types::{KeyCode, Point, ScreenSize};

    fn bits(value: u32, width: usize) -> String {
        format!("{value:0width$b}")
    }

    fn sample_stream() -> Vec<u8> {
        SignalEncoder::new()
            .window_creation_succeeded()
            .hook_installed(1920, 1080)
            .mouse_moved(100, 200)
            .mouse_clicked(100, 200)
            .window_title("Untitled - Notepad")
            .key_pressed(KeyCode::F2)
            .encode()
            .unwrap()
    }

    #[test]
    fn hook_installed_roundtrip() {
        let stream = SignalEncoder::new().hook_installed(1920, 1080).encode().unwrap();
        let records = decode_all(&stream).unwrap();
        assert_eq!(
            records,
            vec![SignalRecord::HookInstalled(ScreenSize::new(1920, 1080))]
        );
    }

    #[test]
    fn every_split_point_yields_same_records() {
        let stream = sample_stream();
        let expected = decode_all(&stream).unwrap();
        assert_eq!(expected.len(), 6);

        for split in 0..=stream.len() {
            let mut decoder = SignalDecoder::new();
            let mut records = decoder.push(&stream[..split]).into_result().unwrap();
            records.extend(decoder.push(&stream[split..]).into_result().unwrap());
            assert_eq!(records, expected, "split at {split}");
            decoder.finish().unwrap();
        }
    }

    #[test]
    fn byte_at_a_time() {
        let stream = sample_stream();
        let mut decoder = SignalDecoder::new();
        let mut records = Vec::new();
        for byte in &stream {
            records.extend(decoder.push(std::slice::from_ref(byte)).into_result().unwrap());
        }
        assert_eq!(records, decode_all(&stream).unwrap());
    }

    #[test]
    fn top_bit_coordinate_clamps_to_zero() {
        let wire = format!("00000011{}{}", "1".repeat(32), bits(7, 32));
        let records = decode_all(wire.as_bytes()).unwrap();
        assert_eq!(records, vec![SignalRecord::MouseMoved(Point::new(0, 7))]);
    }

    #[test]
    fn largest_positive_coordinate_passes_through() {
        let wire = format!("00000100{}{}", bits(2_147_483_647, 32), bits(0, 32));
        let records = decode_all(wire.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![SignalRecord::MouseClicked(Point::new(2_147_483_647, 0))]
        );
    }

    #[test]
    fn screen_size_never_clamped() {
        let wire = format!("00000010{}{}", "1".repeat(32), bits(1080, 32));
        let records = decode_all(wire.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![SignalRecord::HookInstalled(ScreenSize::new(u32::MAX, 1080))]
        );
    }

    #[test]
    fn title_length_is_one_more_than_text() {
        let wire = format!("00000110{}hello", bits(6, 32));
        let records = decode_all(wire.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![SignalRecord::WindowTitleChanged("hello".to_string())]
        );
    }

    #[test]
    fn tag_alone_is_retained() {
        let wire = format!("00000011{}{}", bits(5, 32), bits(6, 32));
        let mut decoder = SignalDecoder::new();

        let first = decoder.push(&wire.as_bytes()[..8]);
        assert!(first.records.is_empty());
        assert!(first.is_clean());
        assert_eq!(decoder.pending(), 8);

        let second = decoder.push(&wire.as_bytes()[8..]);
        assert_eq!(second.records, vec![SignalRecord::MouseMoved(Point::new(5, 6))]);
        assert_eq!(decoder.pending(), 0);
        assert_eq!(decoder.stream_offset(), 72);
    }

    #[test]
    fn several_records_in_one_push_then_empty_push() {
        let stream = SignalEncoder::new()
            .hook_installed(800, 600)
            .key_pressed(KeyCode::Escape)
            .encode()
            .unwrap();

        let mut decoder = SignalDecoder::new();
        let outcome = decoder.push(&stream);
        assert_eq!(
            outcome.records,
            vec![
                SignalRecord::HookInstalled(ScreenSize::new(800, 600)),
                SignalRecord::KeyPressed(KeyCode::Escape),
            ]
        );

        let empty = decoder.push(&[]);
        assert!(empty.records.is_empty());
        assert!(empty.is_clean());
    }

    #[test]
    fn unknown_tag_keeps_earlier_records_and_recovers() {
        let mut wire = b"00000001".to_vec();
        wire.extend_from_slice(b"11111111");
        wire.extend_from_slice(b"00000000");

        let mut decoder = SignalDecoder::new();
        let outcome = decoder.push(&wire);
        assert_eq!(outcome.records, vec![SignalRecord::WindowCreationSucceeded]);
        assert!(matches!(
            outcome.error,
            Some(DecodeError::UnrecognizedTag { tag: 255, offset: 8 })
        ));
        assert_eq!(decoder.pending(), 0);
        assert_eq!(decoder.stream_offset(), 24);

        let next = decoder.push(b"00000000");
        assert_eq!(next.records, vec![SignalRecord::WindowCreationFailed]);
        assert!(next.is_clean());
    }

    #[test]
    fn non_digit_symbol_is_malformed() {
        let mut decoder = SignalDecoder::new();
        let outcome = decoder.push(b"0000a001");
        assert!(outcome.records.is_empty());
        assert!(matches!(
            outcome.error,
            Some(DecodeError::MalformedTag { offset: 4, .. })
        ));
    }

    #[test]
    fn error_offsets_span_pushes() {
        let mut decoder = SignalDecoder::new();
        decoder.push(b"00000001").into_result().unwrap();
        decoder.push(b"0000").into_result().unwrap();
        let outcome = decoder.push(b"0111");
        assert!(matches!(
            outcome.error,
            Some(DecodeError::UnrecognizedTag { tag: 7, offset: 8 })
        ));
    }

    #[test]
    fn finish_reports_partial_record() {
        let mut decoder = SignalDecoder::new();
        let wire = format!("00000110{}abc", bits(10, 32));
        assert!(decoder.push(wire.as_bytes()).records.is_empty());

        let err = decoder.finish().unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedStream {
                pending: 43,
                offset: 0
            }
        ));
    }

    #[test]
    fn clean_stream_finishes() {
        let mut decoder = SignalDecoder::new();
        decoder.push(&sample_stream()).into_result().unwrap();
        assert!(decoder.check_complete().is_ok());
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn multibyte_title_split_inside_character() {
        let stream = SignalEncoder::new().window_title("안녕").encode().unwrap();
        // 40 header symbols, then 3 bytes per character.
        let split = 40 + 4;

        let mut decoder = SignalDecoder::new();
        assert!(decoder.push(&stream[..split]).records.is_empty());
        let outcome = decoder.push(&stream[split..]);
        assert_eq!(
            outcome.records,
            vec![SignalRecord::WindowTitleChanged("안녕".to_string())]
        );
    }

    #[test]
    fn title_cap_from_config() {
        let config = DecoderConfig {
            max_title_units: 4,
            ..DecoderConfig::default()
        };
        let stream = SignalEncoder::new().window_title("hello").encode().unwrap();
        assert!(matches!(
            decode_all_with(&stream, &config),
            Err(DecodeError::TitleTooLong { units: 5, limit: 4, offset: 8 })
        ));

        // Two units per astral character.
        let stream = SignalEncoder::new().window_title("🦀🦀🦀").encode().unwrap();
        assert!(matches!(
            decode_all_with(&stream, &config),
            Err(DecodeError::TitleTooLong { units: 6, limit: 4, offset: 8 })
        ));
        assert!(decode_all(&stream).is_ok());
    }

    #[test]
    fn astral_title_followed_by_key() {
        let wire = format!("00000110{}a😀b0000010101110000", bits(5, 32));
        let records = decode_all(wire.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                SignalRecord::WindowTitleChanged("a😀b".to_string()),
                SignalRecord::KeyPressed(KeyCode::F1),
            ]
        );
    }

    #[test]
    fn corrupt_field_skips_record_and_keeps_alignment() {
        let mut first = format!("00000011{}{}", bits(1, 32), bits(2, 32)).into_bytes();
        first[20] = b'x';
        let click = format!("00000100{}{}", bits(30, 32), bits(40, 32));
        first.extend_from_slice(&click.as_bytes()[..10]);

        let mut decoder = SignalDecoder::new();
        let outcome = decoder.push(&first);
        assert!(outcome.records.is_empty());
        assert!(matches!(
            outcome.error,
            Some(DecodeError::MalformedField { offset: 20, .. })
        ));
        assert_eq!(decoder.stream_offset(), 72);
        assert_eq!(decoder.pending(), 10);

        let outcome = decoder.push(&click.as_bytes()[10..]);
        assert!(outcome.is_clean());
        assert_eq!(
            outcome.records,
            vec![SignalRecord::MouseClicked(Point::new(30, 40))]
        );
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn records_after_a_skipped_record_wait_for_the_next_push() {
        let mut wire = SignalEncoder::new()
            .key_pressed(KeyCode::F2)
            .key_pressed(KeyCode::F3)
            .key_pressed(KeyCode::F4)
            .encode()
            .unwrap();
        wire[12] = b'?';

        let mut decoder = SignalDecoder::new();
        let outcome = decoder.push(&wire);
        assert!(outcome.records.is_empty());
        assert!(matches!(
            outcome.error,
            Some(DecodeError::MalformedField { offset: 12, .. })
        ));
        assert_eq!(decoder.pending(), 32);

        let outcome = decoder.push(&[]);
        assert!(outcome.is_clean());
        assert_eq!(
            outcome.records,
            vec![
                SignalRecord::KeyPressed(KeyCode::F3),
                SignalRecord::KeyPressed(KeyCode::F4),
            ]
        );
    }

    #[test]
    fn invalid_title_text_skips_to_next_record() {
        let mut wire = format!("00000110{}", bits(3, 32)).into_bytes();
        wire.extend_from_slice(&[0xC3, b'a']);
        wire.extend_from_slice(b"00000001");

        let mut decoder = SignalDecoder::new();
        let outcome = decoder.push(&wire);
        assert!(matches!(
            outcome.error,
            Some(DecodeError::InvalidTitleText { offset: 40 })
        ));
        assert_eq!(decoder.push(&[]).records, vec![SignalRecord::WindowCreationSucceeded]);
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn reset_discards_pending() {
        let mut decoder = SignalDecoder::new();
        decoder.push(b"0000001");
        decoder.reset();
        assert_eq!(decoder.pending(), 0);
        assert_eq!(decoder.stream_offset(), 7);
        assert_eq!(decoder.push(b"00000001").records.len(), 1);
    }
}
