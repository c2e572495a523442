use crate::error::WireError;
use crate::symbols::{read_field, write_field};

/// Symbols occupied by the tag that opens every record.
pub const TAG_WIDTH: usize = 8;

/// Symbols per coordinate or screen dimension.
pub const COORD_WIDTH: usize = 32;

/// Symbols per virtual key code.
pub const KEY_CODE_WIDTH: usize = 8;

/// Symbols in the declared title length that follows a title tag.
pub const TITLE_LENGTH_WIDTH: usize = 32;

/// Payload width of the three point-shaped records (x then y).
pub const POINT_PAYLOAD_WIDTH: usize = 2 * COORD_WIDTH;

/// Known tag values.
///
/// The hook process writes these as the first eight symbols of each
/// record. `hsp-types` maps them to `SignalKind`.
///
/// ```text
/// ┌─────┬─────────────────────────┬──────────────────────────────┐
/// │ Tag │ Name                    │ Record width (symbols)       │
/// ├─────┼─────────────────────────┼──────────────────────────────┤
/// │ 0   │ WINDOW_CREATION_FAILED  │ 8                            │
/// │ 1   │ WINDOW_CREATION_SUCCESS │ 8                            │
/// │ 2   │ HOOK_INSTALLED          │ 8 + 32 + 32                  │
/// │ 3   │ MOUSE_MOVE              │ 8 + 32 + 32                  │
/// │ 4   │ MOUSE_CLICK             │ 8 + 32 + 32                  │
/// │ 5   │ KEY_DOWN                │ 8 + 8                        │
/// │ 6   │ WINDOW_TITLE            │ 8 + 32 + (declared - 1) units│
/// └─────┴─────────────────────────┴──────────────────────────────┘
/// ```
pub mod tag {
    pub const WINDOW_CREATION_FAILED: u8 = 0;
    pub const WINDOW_CREATION_SUCCESS: u8 = 1;
    pub const HOOK_INSTALLED: u8 = 2;
    pub const MOUSE_MOVE: u8 = 3;
    pub const MOUSE_CLICK: u8 = 4;
    pub const KEY_DOWN: u8 = 5;
    pub const WINDOW_TITLE: u8 = 6;

    /// Largest tag value the protocol defines.
    pub const MAX_KNOWN: u8 = WINDOW_TITLE;
}

/// Read the tag at `offset`, if eight symbols are available.
///
/// Returns `Ok(None)` when fewer than [`TAG_WIDTH`] bytes remain, which
/// is the normal "wait for more input" state rather than an error.
///
/// # Errors
///
/// Returns [`WireError::InvalidSymbol`] if the tag contains a byte
/// other than `'0'` or `'1'`.
pub fn read_tag(buf: &[u8], offset: usize) -> Result<Option<u8>, WireError> {
    if buf.len().saturating_sub(offset) < TAG_WIDTH {
        return Ok(None);
    }

    let value = read_field(buf, offset, TAG_WIDTH)?;

    #[allow(clippy::cast_possible_truncation)]
    Ok(Some(value as u8))
}

/// Append an eight-symbol tag to `out`.
pub fn write_tag(tag: u8, out: &mut Vec<u8>) {
    write_field(u32::from(tag), TAG_WIDTH, out);
}
