/// Implementation of `hsp encode`.
///
/// Builds a symbol stream from a JSON manifest, for fixtures and for
/// replaying hook sessions without the hook.
///
/// # Manifest format
///
/// ```json
/// {
///   "description": "optional, ignored by the encoder",
///   "records": [
///     { "type": "window_creation_succeeded" },
///     { "type": "hook_installed", "width": 1920, "height": 1080 },
///     { "type": "mouse_moved", "x": 640, "y": 480 },
///     { "type": "mouse_clicked", "x": 640, "y": 480 },
///     { "type": "window_title", "title": "Untitled - Notepad" },
///     { "type": "key_pressed", "key": "F3" }
///   ]
/// }
/// ```
///
/// ```text
/// ┌───────────────────────────┬──────────────────────────────────────────┐
/// │ Type                      │ Fields                                   │
/// ├───────────────────────────┼──────────────────────────────────────────┤
/// │ window_creation_failed    │ none                                     │
/// │ window_creation_succeeded │ none                                     │
/// │ hook_installed            │ width, height (0..=4294967295)           │
/// │ mouse_moved, mouse_clicked│ x, y (negative values written as the     │
/// │                           │ hook's two's complement pattern)         │
/// │ key_pressed               │ key: name (esc, f1..f6) or code (0x41)   │
/// │ window_title              │ title                                    │
/// └───────────────────────────┴──────────────────────────────────────────┘
/// ```
use std::fs;

use anyhow::{Context, Result, anyhow};
use hsp_encoder::SignalEncoder;
use hsp_types::KeyCode;
use tracing::debug;

use crate::EncodeArgs;

// ── Manifest serde types ──────────────────────────────────────────────────────

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    description: Option<String>,
    records: Vec<ManifestRecord>,
}

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ManifestRecord {
    WindowCreationFailed,
    WindowCreationSucceeded,
    HookInstalled { width: u32, height: u32 },
    MouseMoved { x: i64, y: i64 },
    MouseClicked { x: i64, y: i64 },
    KeyPressed { key: String },
    WindowTitle { title: String },
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Run the `hsp encode` command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed, a value is
/// out of range, or the output cannot be written.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let manifest_src = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;

    let manifest: Manifest = serde_json::from_str(&manifest_src)
        .with_context(|| format!("failed to parse manifest {}", args.input.display()))?;

    if let Some(description) = &manifest.description {
        debug!(%description, records = manifest.records.len(), "encoding manifest");
    }

    let mut encoder = SignalEncoder::new();
    for (idx, record) in manifest.records.iter().enumerate() {
        apply_record(&mut encoder, record).with_context(|| format!("record {idx}"))?;
    }

    let bytes = encoder.encode().context("failed to encode stream")?;

    fs::write(&args.output, &bytes)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!(
        "Wrote {} records ({} bytes) to {}",
        encoder.len(),
        bytes.len(),
        args.output.display()
    );
    Ok(())
}

fn apply_record(encoder: &mut SignalEncoder, record: &ManifestRecord) -> Result<()> {
    match record {
        ManifestRecord::WindowCreationFailed => {
            encoder.window_creation_failed();
        }
        ManifestRecord::WindowCreationSucceeded => {
            encoder.window_creation_succeeded();
        }
        ManifestRecord::HookInstalled { width, height } => {
            encoder.hook_installed(*width, *height);
        }
        ManifestRecord::MouseMoved { x, y } => {
            encoder.mouse_moved(coordinate(*x)?, coordinate(*y)?);
        }
        ManifestRecord::MouseClicked { x, y } => {
            encoder.mouse_clicked(coordinate(*x)?, coordinate(*y)?);
        }
        ManifestRecord::KeyPressed { key } => {
            let code = KeyCode::parse(key).ok_or_else(|| anyhow!("unknown key {key:?}"))?;
            encoder.key_pressed(code);
        }
        ManifestRecord::WindowTitle { title } => {
            encoder.window_title(title);
        }
    }
    Ok(())
}

/// Map a manifest coordinate to the 32 bits the hook would print.
///
/// Negative values take their `i32` two's complement form.
fn coordinate(value: i64) -> Result<u32> {
    if value < 0 {
        let signed = i32::try_from(value).map_err(|_| anyhow!("coordinate {value} out of range"))?;
        Ok(u32::from_ne_bytes(signed.to_ne_bytes()))
    } else {
        u32::try_from(value).map_err(|_| anyhow!("coordinate {value} out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hsp_decoder::decode_all;
    use hsp_types::{Point, SignalRecord};

    #[test]
    fn manifest_parses_every_type() {
        let src = r#"{
          "records": [
            { "type": "window_creation_failed" },
            { "type": "window_creation_succeeded" },
            { "type": "hook_installed", "width": 1920, "height": 1080 },
            { "type": "mouse_moved", "x": -1, "y": 5 },
            { "type": "mouse_clicked", "x": 7, "y": 8 },
            { "type": "key_pressed", "key": "esc" },
            { "type": "window_title", "title": "Paint" }
          ]
        }"#;
        let manifest: Manifest = serde_json::from_str(src).unwrap();
        let mut encoder = SignalEncoder::new();
        for record in &manifest.records {
            apply_record(&mut encoder, record).unwrap();
        }

        let records = decode_all(&encoder.encode().unwrap()).unwrap();
        assert_eq!(records.len(), 7);
        assert_eq!(records[3], SignalRecord::MouseMoved(Point::new(0, 5)));
        assert_eq!(records[5], SignalRecord::KeyPressed(KeyCode::Escape));
    }

    #[test]
    fn description_is_optional() {
        let with: Manifest =
            serde_json::from_str(r#"{ "description": "x", "records": [] }"#).unwrap();
        assert_eq!(with.description.as_deref(), Some("x"));
        let without: Manifest = serde_json::from_str(r#"{ "records": [] }"#).unwrap();
        assert!(without.description.is_none());
        assert!(serde_json::from_str::<Manifest>(r#"{ "records": [], "extra": 1 }"#).is_err());
    }

    #[test]
    fn coordinate_range() {
        assert_eq!(coordinate(-1).unwrap(), u32::MAX);
        assert_eq!(coordinate(4_294_967_295).unwrap(), u32::MAX);
        assert!(coordinate(4_294_967_296).is_err());
        assert!(coordinate(-2_147_483_649).is_err());
    }

    #[test]
    fn unknown_key_rejected() {
        let mut encoder = SignalEncoder::new();
        let record = ManifestRecord::KeyPressed {
            key: "f13".to_string(),
        };
        assert!(apply_record(&mut encoder, &record).is_err());
    }
}
