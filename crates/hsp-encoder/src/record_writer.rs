use hsp_types::SignalRecord;
use hsp_wire::layout::{write_tag, COORD_WIDTH, KEY_CODE_WIDTH, TITLE_LENGTH_WIDTH};
use hsp_wire::symbols::write_field;

use crate::error::EncodeError;

/// Longest title, in UTF-16 code units, whose declared length
/// (`units + 1`) still fits the 32-symbol length field.
pub const MAX_TITLE_UNITS: usize = u32::MAX as usize - 1;

/// Append the wire form of `record` to `out`.
///
/// ```text
/// HookInstalled / MouseMoved / MouseClicked
///   [tag:8][x or width:32][y or height:32]
/// KeyPressed
///   [tag:8][vk:8]
/// WindowTitleChanged
///   [tag:8][units + 1:32][UTF-8 text]
/// WindowCreationFailed / WindowCreationSucceeded
///   [tag:8]
/// ```
///
/// The title length counts UTF-16 code units, as the hook measures its
/// window text, plus one extra for the terminator it includes in its
/// buffer size but never prints.
///
/// # Errors
///
/// Returns [`EncodeError::TitleTooLong`] if the title's declared length
/// would not fit in 32 bits. Nothing is written in that case.
pub fn encode_record(record: &SignalRecord, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    match record {
        SignalRecord::WindowCreationFailed | SignalRecord::WindowCreationSucceeded => {
            write_tag(record.kind().wire_id(), out);
        }
        SignalRecord::HookInstalled(screen) => {
            write_tag(record.kind().wire_id(), out);
            write_field(screen.width, COORD_WIDTH, out);
            write_field(screen.height, COORD_WIDTH, out);
        }
        SignalRecord::MouseMoved(point) | SignalRecord::MouseClicked(point) => {
            write_tag(record.kind().wire_id(), out);
            write_field(point.x, COORD_WIDTH, out);
            write_field(point.y, COORD_WIDTH, out);
        }
        SignalRecord::KeyPressed(key) => {
            write_tag(record.kind().wire_id(), out);
            write_field(u32::from(key.to_wire_byte()), KEY_CODE_WIDTH, out);
        }
        SignalRecord::WindowTitleChanged(title) => {
            let units = title.encode_utf16().count();
            let declared = u32::try_from(units + 1)
                .map_err(|_| EncodeError::TitleTooLong {
                    units,
                    limit: MAX_TITLE_UNITS,
                })?;

            write_tag(record.kind().wire_id(), out);
            write_field(declared, TITLE_LENGTH_WIDTH, out);
            out.extend_from_slice(title.as_bytes());
        }
    }

    Ok(())
}
