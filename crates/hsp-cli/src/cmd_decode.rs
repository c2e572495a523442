/// Implementation of `hsp decode`.
///
/// Decodes a captured stream and renders the records through
/// [`DefaultDriver`], one line per record, to stdout or `-o <file>`.
///
/// # Output formats
///
/// ```text
/// ┌────────┬──────────────────────────────────────────────────────┐
/// │ Format │ Line                                                 │
/// ├────────┼──────────────────────────────────────────────────────┤
/// │ text   │ mouse-clicked x=640 y=480                (default)   │
/// │ json   │ {"kind":"mouse-clicked","x":640,"y":480}             │
/// └────────┴──────────────────────────────────────────────────────┘
/// ```
///
/// `--chunk-size N` pushes the stream through the decoder N bytes at a
/// time, the way it would arrive over a pipe. The records are the same
/// for every chunk size.
use anyhow::{Context, Result, anyhow, bail};
use hsp_decoder::SignalDecoder;
use hsp_driver::{DefaultDriver, DriverConfig, OutputMode, SignalDriver};
use hsp_types::{SignalKind, SignalRecord};
use tracing::debug;

use crate::DecodeArgs;
use crate::config::CliConfig;
use crate::input::{display_name, read_input, write_output};

/// Run the `hsp decode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or decoded, a flag value
/// is unrecognised, or nothing is left to render after filtering.
pub fn run(args: &DecodeArgs, config: &CliConfig) -> Result<()> {
    let bytes = read_input(&args.file)?;
    let name = display_name(&args.file);

    let driver_config = DriverConfig {
        mode: parse_output_mode(&args.format)?,
        include_kinds: args.include.as_deref().map(parse_include_kinds).transpose()?,
    };

    let chunk_size = match args.chunk_size {
        Some(0) => bail!("--chunk-size must be at least 1"),
        Some(n) => n,
        None => bytes.len().max(1),
    };

    let records = decode_chunked(&bytes, chunk_size, config)
        .with_context(|| format!("failed to decode {name}"))?;

    let rendered = DefaultDriver
        .render(&records, &driver_config)
        .with_context(|| format!("failed to render {name}"))?;

    write_output(args.output.as_deref(), &rendered)
}

/// Push `bytes` through one decoder `chunk_size` bytes at a time.
fn decode_chunked(
    bytes: &[u8],
    chunk_size: usize,
    config: &CliConfig,
) -> Result<Vec<SignalRecord>, hsp_decoder::DecodeError> {
    let mut decoder = SignalDecoder::with_config(config.decoder_config());
    let mut records = Vec::new();
    for chunk in bytes.chunks(chunk_size) {
        let outcome = decoder.push(chunk);
        debug!(
            bytes = chunk.len(),
            records = outcome.records.len(),
            pending = decoder.pending(),
            "pushed chunk"
        );
        records.extend(outcome.into_result()?);
    }
    decoder.finish()?;
    Ok(records)
}

// ── Flag parsing helpers ──────────────────────────────────────────────────────

pub fn parse_output_mode(s: &str) -> Result<OutputMode> {
    match s.to_ascii_lowercase().as_str() {
        "text" => Ok(OutputMode::Text),
        "json" => Ok(OutputMode::Json),
        other => Err(anyhow!("unknown format {other:?}; expected text or json")),
    }
}

fn parse_include_kinds(s: &str) -> Result<Vec<SignalKind>> {
    s.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| SignalKind::from_name(name).ok_or_else(|| anyhow!("unknown record kind {name:?}")))
        .collect()
}
