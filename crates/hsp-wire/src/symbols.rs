use crate::error::WireError;

/// Symbol carrying a binary zero.
pub const ZERO: u8 = b'0';

/// Symbol carrying a binary one.
pub const ONE: u8 = b'1';

/// Widest field the protocol uses. Every numeric field fits a `u32`.
pub const MAX_FIELD_WIDTH: usize = 32;

/// Returns `true` if `byte` is one of the two digit symbols.
pub fn is_symbol(byte: u8) -> bool {
    byte == ZERO || byte == ONE
}

/// Append `value` to `out` as a run of `width` digit symbols.
///
/// Only the low `width` bits of `value` are written, most-significant
/// digit first. This matches how the hook process prints a
/// `std::bitset<N>`: a negative `LONG` coordinate comes out as its
/// two's complement bit pattern, and a virtual key code wider than 8
/// bits loses its high bits.
///
/// | Value        | Width | Symbols                              |
/// |--------------|-------|--------------------------------------|
/// | 2            | 8     | `00000010`                           |
/// | 0x1B         | 8     | `00011011`                           |
/// | 0x1FF        | 8     | `11111111`                           |
/// | 1920         | 32    | `00000000000000000000011110000000`   |
///
/// # Panics
///
/// Panics if `width` exceeds [`MAX_FIELD_WIDTH`].
pub fn write_field(value: u32, width: usize, out: &mut Vec<u8>) {
    assert!(
        width <= MAX_FIELD_WIDTH,
        "field width {width} exceeds {MAX_FIELD_WIDTH}"
    );

    out.reserve(width);
    for bit in (0..width).rev() {
        let symbol = if (value >> bit) & 1 == 1 { ONE } else { ZERO };
        out.push(symbol);
    }
}

/// Read a `width`-symbol field starting at `offset` in `buf`.
///
/// The run is interpreted as a big-endian base-2 integer.
///
/// # Errors
///
/// - [`WireError::FieldTooWide`] if `width` exceeds [`MAX_FIELD_WIDTH`].
/// - [`WireError::UnexpectedEof`] if `buf` ends before the field does.
/// - [`WireError::InvalidSymbol`] at the first byte that is not a digit
///   symbol.
pub fn read_field(buf: &[u8], offset: usize, width: usize) -> Result<u32, WireError> {
    if width > MAX_FIELD_WIDTH {
        return Err(WireError::FieldTooWide {
            width,
            max: MAX_FIELD_WIDTH,
        });
    }

    let symbols = offset
        .checked_add(width)
        .and_then(|end| buf.get(offset..end))
        .ok_or(WireError::UnexpectedEof { offset: buf.len() })?;

    let mut value: u32 = 0;
    for (i, &symbol) in symbols.iter().enumerate() {
        let bit = match symbol {
            ZERO => 0,
            ONE => 1,
            other => {
                return Err(WireError::InvalidSymbol {
                    offset: offset + i,
                    symbol: other,
                });
            }
        };
        value = (value << 1) | bit;
    }

    Ok(value)
}
