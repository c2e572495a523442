use hsp_types::{KeyCode, Point, ScreenSize, SignalRecord};

use crate::error::EncodeError;
use crate::record_writer::encode_record;

/// Signal stream encoder. Produces the byte stream the hook process
/// writes to its stdout.
///
/// Records are appended with chainable builder methods and serialized
/// in order by [`encode`](Self::encode). The output has no header, no
/// separators and no terminator: it is exactly the concatenation of
/// each record's symbols, so any prefix or split of it is a valid
/// sequence of chunks for the decoder.
///
/// # Usage
///
/// ```rust
/// use hsp_encoder::SignalEncoder;
/// use hsp_types::KeyCode;
///
/// let stream = SignalEncoder::new()
///     .window_creation_succeeded()
///     .hook_installed(1920, 1080)
///     .mouse_moved(640, 480)
///     .mouse_clicked(640, 480)
///     .window_title("Untitled - Notepad")
///     .key_pressed(KeyCode::F3)
///     .encode()
///     .unwrap();
///
/// assert!(stream.iter().take(8).all(|&b| b == b'0' || b == b'1'));
/// ```
///
/// Coordinates are written verbatim. The decoder's underflow clamp is
/// applied on the way back in, so `mouse_moved_signed(-1, 0)` decodes
/// to a point at `(0, 0)`.
#[derive(Clone, Debug, Default)]
pub struct SignalEncoder {
    records: Vec<SignalRecord>,
}

impl SignalEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window_creation_failed(&mut self) -> &mut Self {
        self.record(SignalRecord::WindowCreationFailed)
    }

    pub fn window_creation_succeeded(&mut self) -> &mut Self {
        self.record(SignalRecord::WindowCreationSucceeded)
    }

    pub fn hook_installed(&mut self, width: u32, height: u32) -> &mut Self {
        self.record(SignalRecord::HookInstalled(ScreenSize::new(width, height)))
    }

    pub fn mouse_moved(&mut self, x: u32, y: u32) -> &mut Self {
        self.record(SignalRecord::MouseMoved(Point::new(x, y)))
    }

    /// Append a mouse move with signed coordinates, written as their
    /// two's complement bit pattern like the hook's `LONG` fields.
    #[allow(clippy::cast_sign_loss)]
    pub fn mouse_moved_signed(&mut self, x: i32, y: i32) -> &mut Self {
        self.mouse_moved(x as u32, y as u32)
    }

    pub fn mouse_clicked(&mut self, x: u32, y: u32) -> &mut Self {
        self.record(SignalRecord::MouseClicked(Point::new(x, y)))
    }

    pub fn key_pressed(&mut self, key: KeyCode) -> &mut Self {
        self.record(SignalRecord::KeyPressed(key))
    }

    pub fn window_title(&mut self, title: &str) -> &mut Self {
        self.record(SignalRecord::WindowTitleChanged(title.to_string()))
    }

    /// Append an already-built record.
    pub fn record(&mut self, record: SignalRecord) -> &mut Self {
        self.records.push(record);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize every appended record, in order.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::EmptyStream`] if no records were appended.
    /// - [`EncodeError::TitleTooLong`] if a title's declared length does
    ///   not fit the 32-symbol length field.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        if self.records.is_empty() {
            return Err(EncodeError::EmptyStream);
        }

        let capacity = self.records.iter().map(SignalRecord::wire_len).sum();
        let mut out = Vec::with_capacity(capacity);
        for record in &self.records {
            encode_record(record, &mut out)?;
        }

        Ok(out)
    }
}
