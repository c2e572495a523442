/// Implementation of `hsp stats`.
///
/// Decodes a captured stream, tabulates record kinds and their wire
/// bytes, then replays the records through a [`Session`] and prints its
/// final state.
///
/// # Example output
///
/// ```text
/// File:    capture.sig  (1342 bytes)
/// Records: 17 total
///
/// Kind                       Count   Bytes
/// ─────────────────────────────────────────
/// window-creation-succeeded      1       8
/// hook-installed                 1      72
/// mouse-moved                   12     864
/// mouse-clicked                  1      72
/// window-title-changed           1      62
/// key-pressed                    1      16
/// ─────────────────────────────────────────
/// Total                         17    1094
///
/// Session:
///   window      created
///   screen      1920x1080
///   cursor      (640, 480), 12 in trace
///   clicks      1, last at (640, 480)
///   title       "Untitled - Notepad"
///   mode        blackboard
///   shortcut    blackboard-mode (applied)
/// ```
use std::collections::BTreeMap;

use anyhow::{Context, Result};
use hsp_decoder::decode_all_with;
use hsp_driver::{Session, ShortcutOutcome};
use hsp_types::SignalKind;

use crate::StatsArgs;
use crate::config::CliConfig;
use crate::input::{display_name, read_input};

const RULE: &str = "─────────────────────────────────────────";

/// Run the `hsp stats` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or decoded, or the
/// configured trace capacity is invalid.
pub fn run(args: &StatsArgs, config: &CliConfig) -> Result<()> {
    let bytes = read_input(&args.file)?;
    let name = display_name(&args.file);

    let records = decode_all_with(&bytes, &config.decoder_config())
        .with_context(|| format!("failed to decode {name}"))?;

    let mut session = config.new_session()?;
    let mut wire_bytes: BTreeMap<SignalKind, usize> = BTreeMap::new();
    for record in &records {
        *wire_bytes.entry(record.kind()).or_default() += record.wire_len();
        session.observe(record);
    }

    println!("File:    {name}  ({} bytes)", bytes.len());
    println!("Records: {} total", records.len());
    println!();
    println!("{:<25} {:>7} {:>7}", "Kind", "Count", "Bytes");
    println!("{RULE}");
    for (kind, count) in session.counts() {
        let kind_bytes = wire_bytes.get(&kind).copied().unwrap_or(0);
        println!("{:<25} {count:>7} {kind_bytes:>7}", kind.name());
    }
    println!("{RULE}");
    println!(
        "{:<25} {:>7} {:>7}",
        "Total",
        session.total_records(),
        wire_bytes.values().sum::<usize>()
    );
    println!();
    print_session(&session);

    Ok(())
}

fn print_session(session: &Session) {
    println!("Session:");

    let window = match session.window_created() {
        Some(true) => "created",
        Some(false) => "creation failed",
        None => "not reported",
    };
    println!("  window      {window}");

    match session.screen() {
        Some(screen) => println!("  screen      {}x{}", screen.width, screen.height),
        None => println!("  screen      not reported"),
    }

    match session.cursor() {
        Some(p) => println!(
            "  cursor      ({}, {}), {} in trace",
            p.x,
            p.y,
            session.trace().len()
        ),
        None => println!("  cursor      never moved"),
    }

    match session.last_click() {
        Some(p) => println!("  clicks      {}, last at ({}, {})", session.clicks(), p.x, p.y),
        None => println!("  clicks      0"),
    }

    if let Some(title) = session.title() {
        println!("  title       {title:?}");
    }

    println!("  mode        {}", session.mode());

    if let Some((shortcut, outcome)) = session.last_shortcut() {
        let outcome = match outcome {
            ShortcutOutcome::Applied => "applied",
            ShortcutOutcome::Rejected => "rejected",
        };
        println!("  shortcut    {shortcut} ({outcome})");
    }

    if session.quit_requested() {
        println!("  quit        requested");
    }
}
