/// Implementation of `hsp validate`.
///
/// Decodes the whole stream with [`decode_all_with`] and prints either a
/// series of `✓` lines or a single `✗` diagnostic. A stream is valid when
/// every tag is known, every field is made of `'0'`/`'1'` symbols, every
/// title is UTF-8 within the configured cap, and the last record is
/// complete.
///
/// # Success output
///
/// ```text
/// ✓ Records: 6 records decoded (214 bytes)
/// ✓ Tags: all within 0..=6
/// ✓ Boundary: stream ends on a record boundary
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: unrecognized tag 9 at offset 80
/// ```
use anyhow::{Result, anyhow};
use hsp_decoder::{DecodeError, decode_all_with};

use crate::ValidateArgs;
use crate::config::CliConfig;
use crate::input::read_input;

/// Run the `hsp validate` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or does not decode.
pub fn run(args: &ValidateArgs, config: &CliConfig) -> Result<()> {
    let bytes = read_input(&args.file)?;

    match decode_all_with(&bytes, &config.decoder_config()) {
        Ok(records) => {
            println!(
                "✓ Records: {} record{} decoded ({} bytes)",
                records.len(),
                if records.len() == 1 { "" } else { "s" },
                bytes.len()
            );
            println!("✓ Tags: all within 0..=6");
            println!("✓ Boundary: stream ends on a record boundary");
            Ok(())
        }
        Err(e) => {
            println!("✗ Error: {}", diagnostic(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Human-readable diagnostic for a decode failure.
///
/// ```text
/// ┌──────────────────┬────────────────────────────────────────────────┐
/// │ DecodeError      │ Diagnostic                                     │
/// ├──────────────────┼────────────────────────────────────────────────┤
/// │ MalformedTag     │ "<display>: <wire error>"                      │
/// │ MalformedField   │ "<display>: <wire error>"                      │
/// │ TruncatedStream  │ "<display> (missing bytes at end of capture)"  │
/// │ everything else  │ "<display>"                                    │
/// └──────────────────┴────────────────────────────────────────────────┘
/// ```
fn diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::MalformedTag { source, .. } | DecodeError::MalformedField { source, .. } => {
            format!("{e}: {source}")
        }
        DecodeError::TruncatedStream { .. } => {
            format!("{e} (missing bytes at end of capture)")
        }
        other => other.to_string(),
    }
}
