/// HSP command-line tool: inspect, validate, decode, encode and watch
/// the symbol streams a native input hook writes to its stdout.
///
/// # Command overview
///
/// ```text
/// hsp <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print one line per record with offsets and fields
///   validate   Check that a captured stream decodes cleanly
///   decode     Render records as text or JSON lines
///   encode     Build a stream from a JSON manifest
///   stats      Per-kind counts and final session state
///   watch      Run a hook process and decode its stdout live
///   help       Print help information
///
/// Global options:
///   -v, --verbose        Debug logging on stderr
///   --config <PATH>      TOML file with [decoder] and [session] tables
///   -h, --help           Print help
///   -V, --version        Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                   |
/// |------|-------------------------------------------|
/// | 0    | Success                                   |
/// | 1    | Error (I/O failure, invalid stream, etc.) |
///
/// Logs and error details go to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_encode;
mod cmd_inspect;
mod cmd_stats;
mod cmd_validate;
mod cmd_watch;
mod config;
mod input;

use config::CliConfig;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The HSP (Hook Signal Protocol) command-line tool.
#[derive(Parser)]
#[command(name = "hsp", version, about = "Hook Signal Protocol CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging. `RUST_LOG` takes precedence when set.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Load decoder and session settings from this TOML file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print every record with its stream offset, width and fields.
    Inspect(InspectArgs),
    /// Check that a captured stream decodes without error.
    Validate(ValidateArgs),
    /// Render records as text or JSON lines.
    Decode(DecodeArgs),
    /// Build a stream from a JSON manifest.
    Encode(EncodeArgs),
    /// Print per-kind counts and the final session state.
    Stats(StatsArgs),
    /// Spawn a hook process and decode its stdout as it runs.
    Watch(WatchArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `hsp inspect`.
///
/// ```text
/// ┌─────────────┬────────────────────────────────────────────────────┐
/// │ Flag        │ Effect                                             │
/// ├─────────────┼────────────────────────────────────────────────────┤
/// │ --show-bits │ Print the symbols of each field under the record   │
/// │ --record N  │ Show only the record at index N                    │
/// └─────────────┴────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Captured stream, or `-` for stdin.
    pub file: PathBuf,

    /// Show the raw symbols of every field.
    #[arg(long)]
    pub show_bits: bool,

    /// Inspect only the record at this zero-based index.
    #[arg(long)]
    pub record: Option<usize>,
}

/// Arguments for `hsp validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Captured stream, or `-` for stdin.
    pub file: PathBuf,
}

/// Arguments for `hsp decode`.
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────┐
/// │ Flag         │ Values / default                                 │
/// ├──────────────┼──────────────────────────────────────────────────┤
/// │ --format     │ text (default) | json                            │
/// │ --include    │ comma-separated kinds, e.g. mouse-clicked,key-pressed │
/// │ --chunk-size │ push the stream N bytes at a time                │
/// │ -o/--output  │ write to file instead of stdout                  │
/// └──────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Captured stream, or `-` for stdin.
    pub file: PathBuf,

    /// Output format: `text` or `json`.
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Comma-separated list of record kinds to include.
    ///
    /// Recognised names: `window-creation-failed`,
    /// `window-creation-succeeded`, `hook-installed`, `mouse-moved`,
    /// `mouse-clicked`, `key-pressed`, `window-title-changed`.
    /// Underscores work in place of hyphens.
    #[arg(long)]
    pub include: Option<String>,

    /// Feed the decoder this many bytes per push instead of all at once.
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Write rendered output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `hsp encode`.
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// JSON manifest listing the records to encode.
    pub input: PathBuf,

    /// Output stream path.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for `hsp stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Captured stream, or `-` for stdin.
    pub file: PathBuf,
}

/// Arguments for `hsp watch`.
///
/// ```text
/// hsp watch --exit-on-quit -- ./hookInstall.exe
/// ```
#[derive(clap::Args)]
pub struct WatchArgs {
    /// Output format: `text` or `json`.
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Stop the hook process when F1 (quit) is pressed.
    #[arg(long)]
    pub exit_on_quit: bool,

    /// Hook program to run.
    pub program: PathBuf,

    /// Arguments passed to the hook program.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args, &config),
        Commands::Validate(args) => cmd_validate::run(&args, &config),
        Commands::Decode(args) => cmd_decode::run(&args, &config),
        Commands::Encode(args) => cmd_encode::run(&args),
        Commands::Stats(args) => cmd_stats::run(&args, &config),
        Commands::Watch(args) => cmd_watch::run(&args, &config),
    });

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise `info`, or `debug` with
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}
