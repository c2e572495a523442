/// Errors raised while reading symbol runs off the wire.
///
/// Offsets are byte positions within the slice handed to the failing
/// function. Callers that track an absolute stream position add their
/// own base offset before reporting.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A byte inside a field was neither `'0'` nor `'1'`.
    #[error("invalid symbol {symbol:#04X} at offset {offset}, expected '0' or '1'")]
    InvalidSymbol { offset: usize, symbol: u8 },

    /// Input ended before the requested field was complete.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A field wider than 32 symbols was requested.
    #[error("field width {width} exceeds the {max}-symbol limit")]
    FieldTooWide { width: usize, max: usize },

    /// Title bytes that can never form valid UTF-8.
    #[error("invalid UTF-8 in text at offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// A UTF-16 unit count that ends between the two halves of a
    /// character outside the Basic Multilingual Plane.
    #[error("unit count ends inside the character at offset {offset}")]
    SplitSurrogatePair { offset: usize },
}

impl WireError {
    /// Position the error refers to, if it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::InvalidSymbol { offset, .. }
            | Self::UnexpectedEof { offset }
            | Self::InvalidUtf8 { offset }
            | Self::SplitSurrogatePair { offset } => Some(*offset),
            Self::FieldTooWide { .. } => None,
        }
    }
}
