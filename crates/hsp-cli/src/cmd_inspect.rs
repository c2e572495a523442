/// Implementation of `hsp inspect`.
///
/// Decodes a captured stream and prints one line per record with its
/// absolute offset and width in symbols. `--show-bits` adds the raw
/// symbols of each field underneath. When the stream has an error,
/// the records before it are still printed and the error is returned.
///
/// # Output format
///
/// ```text
/// Stream: <stdin>, 138 bytes, 3 records
/// Record 0 @ 0: window-creation-succeeded (8 symbols)
/// Record 1 @ 8: hook-installed width=1920 height=1080 (72 symbols)
///          tag     00000010
///          width   00000000000000000000011110000000
///          height  00000000000000000000010000111000
/// Record 2 @ 80: window-title-changed title="hi" (42 symbols)
/// ```
use std::ops::Range;

use anyhow::{Context, Result};
use hsp_decoder::SignalDecoder;
use hsp_driver::render_text::TextRenderer;
use hsp_types::SignalRecord;
use hsp_wire::layout::{COORD_WIDTH, KEY_CODE_WIDTH, TAG_WIDTH, TITLE_LENGTH_WIDTH};

use crate::InspectArgs;
use crate::config::CliConfig;
use crate::input::{display_name, read_input};

/// Run the `hsp inspect` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or fails to decode.
pub fn run(args: &InspectArgs, config: &CliConfig) -> Result<()> {
    let bytes = read_input(&args.file)?;
    let name = display_name(&args.file);

    let mut decoder = SignalDecoder::with_config(config.decoder_config());
    let outcome = decoder.push(&bytes);

    println!(
        "Stream: {name}, {} bytes, {} record{}",
        bytes.len(),
        outcome.records.len(),
        if outcome.records.len() == 1 { "" } else { "s" }
    );

    let mut offset = 0;
    for (idx, record) in outcome.records.iter().enumerate() {
        let width = record.wire_len();
        let start = offset;
        offset += width;

        if args.record.is_some_and(|target| idx != target) {
            continue;
        }

        println!(
            "Record {idx} @ {start}: {} ({width} symbols)",
            TextRenderer::render_record(record)
        );

        if args.show_bits {
            let raw = &bytes[start..start + width];
            for (label, range) in field_layout(record, width) {
                let symbols = String::from_utf8_lossy(&raw[range]);
                println!("         {label:<8}{symbols}");
            }
        }
    }

    if let Some(err) = outcome.error {
        return Err(err).with_context(|| format!("failed to decode {name}"));
    }
    decoder
        .finish()
        .with_context(|| format!("failed to decode {name}"))
}

// ── Field layout ──────────────────────────────────────────────────────────────

/// Label and byte range of each field within a record of `width` bytes.
fn field_layout(record: &SignalRecord, width: usize) -> Vec<(&'static str, Range<usize>)> {
    let payload = TAG_WIDTH;
    let second = TAG_WIDTH + COORD_WIDTH;

    let mut fields = vec![("tag", 0..TAG_WIDTH)];
    match record {
        SignalRecord::WindowCreationFailed | SignalRecord::WindowCreationSucceeded => {}
        SignalRecord::HookInstalled(_) => {
            fields.push(("width", payload..second));
            fields.push(("height", second..width));
        }
        SignalRecord::MouseMoved(_) | SignalRecord::MouseClicked(_) => {
            fields.push(("x", payload..second));
            fields.push(("y", second..width));
        }
        SignalRecord::KeyPressed(_) => {
            fields.push(("key", payload..payload + KEY_CODE_WIDTH));
        }
        SignalRecord::WindowTitleChanged(_) => {
            let text = payload + TITLE_LENGTH_WIDTH;
            fields.push(("length", payload..text));
            fields.push(("text", text..width));
        }
    }
    fields
}
