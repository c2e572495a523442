use hsp_types::SignalKind;
use hsp_wire::WireError;

/// Errors that can occur while decoding a signal stream.
///
/// An incomplete record is not an error: the decoder keeps the bytes
/// and waits for the next push. Everything below means the stream as
/// delivered cannot be interpreted. All offsets are absolute byte
/// positions in the stream, counted from the decoder's creation.
///
/// ```text
///   DecodeError
///   ├── UnrecognizedTag      ← tag outside 0..=6, payload width unknown
///   ├── MalformedTag         ← non-digit symbol inside a tag
///   ├── MalformedField       ← non-digit symbol inside a payload field
///   ├── InvalidTitleLength   ← declared title length 0 (would be -1 units)
///   ├── TitleTooLong         ← declared length above the configured cap
///   ├── InvalidTitleText     ← title bytes that are not UTF-8
///   ├── TruncatedStream      ← stream ended with a partial record pending
///   └── Io(std::io::Error)   ← from the reader behind SignalStream
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The tag names no known record kind.
    ///
    /// There is no defined payload width for an unknown tag, so the
    /// decoder does not guess where the next record starts. The caller
    /// decides whether to keep feeding the stream or drop it.
    #[error("unrecognized tag {tag} at offset {offset}")]
    UnrecognizedTag { tag: u8, offset: u64 },

    /// A tag contained a byte other than `'0'` or `'1'`.
    #[error("malformed tag at offset {offset}")]
    MalformedTag {
        offset: u64,
        #[source]
        source: WireError,
    },

    /// A payload field contained a byte other than `'0'` or `'1'`.
    ///
    /// `offset` points at the offending byte, not the record start.
    #[error("malformed {field} in {kind} record at offset {offset}")]
    MalformedField {
        kind: SignalKind,
        field: &'static str,
        offset: u64,
        #[source]
        source: WireError,
    },

    /// A window title declared a length of zero.
    ///
    /// The declared length counts one more than the UTF-16 units that
    /// follow, so the smallest valid value is 1 (an empty title).
    #[error("window title length at offset {offset} is 0, expected at least 1")]
    InvalidTitleLength { offset: u64 },

    /// A window title declared more UTF-16 units than the configured cap.
    #[error("window title at offset {offset} declares {units} UTF-16 units, limit {limit}")]
    TitleTooLong { units: u32, limit: u32, offset: u64 },

    /// Title bytes that cannot be decoded as UTF-8, or a unit count that
    /// ends inside a character. The decoder skips the whole title.
    #[error("invalid UTF-8 in window title at offset {offset}")]
    InvalidTitleText { offset: u64 },

    /// The stream ended while a record was still incomplete.
    #[error("stream ended inside a record: {pending} bytes pending at offset {offset}")]
    TruncatedStream { pending: usize, offset: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Absolute stream offset the error refers to, if any.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::UnrecognizedTag { offset, .. }
            | Self::MalformedTag { offset, .. }
            | Self::MalformedField { offset, .. }
            | Self::InvalidTitleLength { offset }
            | Self::TitleTooLong { offset, .. }
            | Self::InvalidTitleText { offset }
            | Self::TruncatedStream { offset, .. } => Some(*offset),
            Self::Io(_) => None,
        }
    }
}
