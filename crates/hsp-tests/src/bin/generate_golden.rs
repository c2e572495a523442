//! Golden fixture generator for the HSP conformance test suite.
//!
//! Writes every fixture under `tests/golden/`. Run it after any change
//! to the wire format and commit the result. Fixtures are plain ASCII
//! symbol streams (`stream.sig`) so they diff cleanly; each encodable
//! fixture also gets the `manifest.json` that `hsp encode` turns into
//! the same bytes.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p hsp-tests
//! ```
//!
//! # Generated fixtures
//!
//! | Directory                          | Contents                                   |
//! |------------------------------------|--------------------------------------------|
//! | startup                            | Window created + hook installed 1920x1080  |
//! | click_with_title                   | Move, click, then the foreground title     |
//! | shortcuts                          | F3, Esc, F4, F5, F6, F2, F1 in order       |
//! | unicode_title                      | Title with multi-byte UTF-8 characters     |
//! | astral_title                       | Emoji title, then a key press              |
//! | clamped_coordinates                | Coordinates with the top bit set           |
//! | full_session                       | A short realistic hook session             |
//! | edge_cases/window_creation_failed  | Tag 0 alone                                |
//! | edge_cases/unknown_tag             | Valid record followed by tag 9             |
//! | edge_cases/truncated_title         | Title declaring more text than present     |
//! | edge_cases/invalid_symbol          | `'2'` inside a mouse coordinate            |

#![allow(clippy::pedantic)]

use std::path::{Path, PathBuf};

use hsp_encoder::SignalEncoder;
use hsp_types::KeyCode;
use hsp_wire::layout::write_tag;
use hsp_wire::symbols::write_field;
use serde_json::{Value, json};

fn main() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");

    generate_startup(&golden_dir);
    generate_click_with_title(&golden_dir);
    generate_shortcuts(&golden_dir);
    generate_unicode_title(&golden_dir);
    generate_astral_title(&golden_dir);
    generate_clamped_coordinates(&golden_dir);
    generate_full_session(&golden_dir);
    generate_edge_cases(&golden_dir);

    println!("All golden fixtures written to {}", golden_dir.display());
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, data).expect("write_file");
    println!("  wrote {}", path.display());
}

fn write_manifest(dir: &Path, manifest: &Value) {
    let mut text = serde_json::to_string_pretty(manifest).expect("serialize manifest");
    text.push('\n');
    write_file(&dir.join("manifest.json"), text.as_bytes());
}

fn write_stream(dir: &Path, stream: &[u8]) {
    write_file(&dir.join("stream.sig"), stream);
}

// ── Fixture generators ────────────────────────────────────────────────────────

fn generate_startup(golden: &Path) {
    let dir = golden.join("startup");
    write_manifest(
        &dir,
        &json!({
            "description": "Hook window created, then hooks installed on a 1920x1080 screen.",
            "records": [
                { "type": "window_creation_succeeded" },
                { "type": "hook_installed", "width": 1920, "height": 1080 }
            ]
        }),
    );

    let stream = SignalEncoder::new()
        .window_creation_succeeded()
        .hook_installed(1920, 1080)
        .encode()
        .expect("encode startup");
    write_stream(&dir, &stream);
}

fn generate_click_with_title(golden: &Path) {
    let dir = golden.join("click_with_title");
    write_manifest(
        &dir,
        &json!({
            "description": "A move and a click, followed by the title the hook sends after every click.",
            "records": [
                { "type": "mouse_moved", "x": 640, "y": 480 },
                { "type": "mouse_clicked", "x": 640, "y": 480 },
                { "type": "window_title", "title": "Untitled - Notepad" }
            ]
        }),
    );

    let stream = SignalEncoder::new()
        .mouse_moved(640, 480)
        .mouse_clicked(640, 480)
        .window_title("Untitled - Notepad")
        .encode()
        .expect("encode click_with_title");
    write_stream(&dir, &stream);
}

fn generate_shortcuts(golden: &Path) {
    let dir = golden.join("shortcuts");
    let keys = ["F3", "Esc", "F4", "F5", "F6", "F2", "F1"];
    let records: Vec<Value> = keys
        .iter()
        .map(|key| json!({ "type": "key_pressed", "key": key }))
        .collect();
    write_manifest(
        &dir,
        &json!({
            "description": "Every forwarded key: blackboard, erase, webcam, toggle, reset, typing, quit.",
            "records": records
        }),
    );

    let mut encoder = SignalEncoder::new();
    for key in keys {
        encoder.key_pressed(KeyCode::parse(key).expect("known key"));
    }
    let stream = encoder.encode().expect("encode shortcuts");
    write_stream(&dir, &stream);
}

fn generate_unicode_title(golden: &Path) {
    let dir = golden.join("unicode_title");
    write_manifest(
        &dir,
        &json!({
            "description": "A title whose declared length counts characters, not bytes.",
            "records": [
                { "type": "mouse_clicked", "x": 12, "y": 34 },
                { "type": "window_title", "title": "Café ☕ - 메모장" }
            ]
        }),
    );

    let stream = SignalEncoder::new()
        .mouse_clicked(12, 34)
        .window_title("Café ☕ - 메모장")
        .encode()
        .expect("encode unicode_title");
    write_stream(&dir, &stream);
}

fn generate_astral_title(golden: &Path) {
    let dir = golden.join("astral_title");
    write_manifest(
        &dir,
        &json!({
            "description": "Emoji count as two UTF-16 units in the declared title length.",
            "records": [
                { "type": "window_title", "title": "🎧 Lo-fi beats 🎶 - YouTube" },
                { "type": "key_pressed", "key": "F1" }
            ]
        }),
    );

    let stream = SignalEncoder::new()
        .window_title("🎧 Lo-fi beats 🎶 - YouTube")
        .key_pressed(KeyCode::F1)
        .encode()
        .expect("encode astral_title");
    write_stream(&dir, &stream);
}

fn generate_clamped_coordinates(golden: &Path) {
    let dir = golden.join("clamped_coordinates");
    write_manifest(
        &dir,
        &json!({
            "description": "Coordinates at or above 2^31 decode to 0; 2^31 - 1 passes through.",
            "records": [
                { "type": "mouse_moved", "x": -1, "y": 10 },
                { "type": "mouse_clicked", "x": 2147483648u32, "y": 2147483647 },
                { "type": "hook_installed", "width": 4294967295u32, "height": 1 }
            ]
        }),
    );

    let stream = SignalEncoder::new()
        .mouse_moved_signed(-1, 10)
        .mouse_clicked(0x8000_0000, 0x7FFF_FFFF)
        .hook_installed(u32::MAX, 1)
        .encode()
        .expect("encode clamped_coordinates");
    write_stream(&dir, &stream);
}

fn generate_full_session(golden: &Path) {
    let dir = golden.join("full_session");
    write_manifest(
        &dir,
        &json!({
            "description": "Startup, some movement, a click on the desktop, blackboard mode, erase, quit.",
            "records": [
                { "type": "window_creation_succeeded" },
                { "type": "hook_installed", "width": 2560, "height": 1440 },
                { "type": "mouse_moved", "x": 100, "y": 100 },
                { "type": "mouse_moved", "x": 101, "y": 102 },
                { "type": "mouse_moved", "x": 103, "y": 105 },
                { "type": "mouse_clicked", "x": 103, "y": 105 },
                { "type": "window_title", "title": "No foreground window." },
                { "type": "key_pressed", "key": "F3" },
                { "type": "key_pressed", "key": "Esc" },
                { "type": "key_pressed", "key": "F1" }
            ]
        }),
    );

    let stream = SignalEncoder::new()
        .window_creation_succeeded()
        .hook_installed(2560, 1440)
        .mouse_moved(100, 100)
        .mouse_moved(101, 102)
        .mouse_moved(103, 105)
        .mouse_clicked(103, 105)
        .window_title("No foreground window.")
        .key_pressed(KeyCode::F3)
        .key_pressed(KeyCode::Escape)
        .key_pressed(KeyCode::F1)
        .encode()
        .expect("encode full_session");
    write_stream(&dir, &stream);
}

fn generate_edge_cases(golden: &Path) {
    let dir = golden.join("edge_cases");

    // Tag 0 alone: the hook could not create its window and exited.
    write_stream(&dir.join("window_creation_failed"), b"00000000");

    // A valid hook-installed record, then a tag no hook version sends.
    let mut unknown = SignalEncoder::new()
        .hook_installed(1024, 768)
        .encode()
        .expect("encode unknown_tag prefix");
    write_tag(9, &mut unknown);
    write_field(0, 32, &mut unknown);
    write_stream(&dir.join("unknown_tag"), &unknown);

    // A key press, then a title declaring 10 characters with 3 present.
    let mut truncated = SignalEncoder::new()
        .key_pressed(KeyCode::F1)
        .encode()
        .expect("encode truncated_title prefix");
    write_tag(6, &mut truncated);
    write_field(11, 32, &mut truncated);
    truncated.extend_from_slice(b"abc");
    write_stream(&dir.join("truncated_title"), &truncated);

    // A mouse move whose y coordinate has a '2' in its last symbol.
    let mut invalid = SignalEncoder::new()
        .mouse_moved(5, 6)
        .encode()
        .expect("encode invalid_symbol");
    let last = invalid.len() - 1;
    invalid[last] = b'2';
    write_stream(&dir.join("invalid_symbol"), &invalid);
}
