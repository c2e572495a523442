/// Implementation of `hsp watch`.
///
/// Spawns the hook program with its stdout piped, decodes the stream
/// live through a [`SignalStream`], feeds every record to a [`Session`]
/// and prints it. Decode errors are logged with the offset they were
/// found at and counted; the watch keeps going with whatever the decoder
/// resumes from.
///
/// ```text
/// hook stdout ──▶ SignalStream ──▶ Session::observe ──▶ stdout line
///                     │
///                 warn! on decode errors
/// ```
///
/// With `--exit-on-quit` the hook process is killed as soon as F1 is
/// pressed, mirroring the overlay's quit shortcut. Otherwise the watch
/// ends when the hook closes its stdout.
use std::io::Write;
use std::process::Stdio;

use anyhow::{Context, Result, anyhow};
use hsp_decoder::{DecodeError, SignalStream};
use hsp_driver::{DefaultDriver, DriverConfig, Session};
use hsp_types::SignalRecord;
use tokio::io::AsyncRead;
use tokio::process::Command;
use tracing::{info, warn};

use crate::WatchArgs;
use crate::cmd_decode::parse_output_mode;
use crate::config::CliConfig;

/// Run the `hsp watch` command.
///
/// # Errors
///
/// Returns an error if the hook program cannot be started, its output
/// cannot be read, or a flag value is unrecognised.
pub fn run(args: &WatchArgs, config: &CliConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(watch(args, config))
}

async fn watch(args: &WatchArgs, config: &CliConfig) -> Result<()> {
    let driver_config = DriverConfig {
        mode: parse_output_mode(&args.format)?,
        include_kinds: None,
    };
    let mut session = config.new_session()?;

    let mut child = Command::new(&args.program)
        .args(&args.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("cannot start {}", args.program.display()))?;

    info!(program = %args.program.display(), pid = ?child.id(), "hook process started");

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("hook process stdout was not captured"))?;
    let mut stream = SignalStream::with_config(stdout, config.decoder_config());

    let summary = follow(
        &mut stream,
        &mut session,
        &driver_config,
        args.exit_on_quit,
        &mut std::io::stdout().lock(),
    )
    .await?;

    if summary.quit {
        info!("quit shortcut pressed, stopping hook process");
        child
            .start_kill()
            .context("failed to stop hook process")?;
    }

    drop(stream);
    let status = child
        .wait()
        .await
        .context("failed to wait for hook process")?;

    if !status.success() && !summary.quit {
        warn!(%status, "hook process exited with failure");
    }
    info!(
        %status,
        records = session.total_records(),
        decode_errors = summary.decode_errors,
        "hook process exited"
    );
    Ok(())
}

/// What [`follow`] saw before it stopped.
#[derive(Debug, Default, PartialEq, Eq)]
struct WatchSummary {
    decode_errors: u64,
    /// Where in the stream the latest decode error was found.
    last_error_offset: Option<u64>,
    /// Stopped early because F1 was pressed with `--exit-on-quit`.
    quit: bool,
}

/// Decode records off `stream` into `session`, writing one rendered
/// line per record to `out`, until the stream ends or quit is requested.
async fn follow<R: AsyncRead + Unpin>(
    stream: &mut SignalStream<R>,
    session: &mut Session,
    driver_config: &DriverConfig,
    exit_on_quit: bool,
    out: &mut impl Write,
) -> Result<WatchSummary> {
    let mut summary = WatchSummary::default();

    while let Some(item) = stream.next().await {
        let record = match item {
            Ok(record) => record,
            Err(DecodeError::Io(e)) => {
                return Err(e).context("failed to read hook process output");
            }
            Err(err) => {
                summary.decode_errors += 1;
                summary.last_error_offset = err.offset();
                warn!(
                    %err,
                    offset = ?err.offset(),
                    decode_errors = summary.decode_errors,
                    "skipped undecodable hook output"
                );
                continue;
            }
        };

        session.observe(&record);
        if let Some(line) = DefaultDriver.render_record(&record, driver_config)? {
            writeln!(out, "{line}").context("failed to write record")?;
        }

        if record == SignalRecord::WindowCreationFailed {
            warn!("hook process reported that its window could not be created");
        }

        if exit_on_quit && session.quit_requested() {
            summary.quit = true;
            break;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hsp_driver::OutputMode;
    use hsp_encoder::SignalEncoder;
    use hsp_types::KeyCode;

    fn text_config() -> DriverConfig {
        DriverConfig {
            mode: OutputMode::Text,
            include_kinds: None,
        }
    }

    async fn run_follow(stream: &[u8], exit_on_quit: bool) -> (WatchSummary, String, Session) {
        let mut signals = SignalStream::new(stream);
        let mut session = Session::new();
        let mut out = Vec::new();
        let summary = follow(&mut signals, &mut session, &text_config(), exit_on_quit, &mut out)
            .await
            .unwrap();
        (summary, String::from_utf8(out).unwrap(), session)
    }

    #[tokio::test]
    async fn prints_every_record() {
        let stream = SignalEncoder::new()
            .window_creation_succeeded()
            .mouse_clicked(4, 5)
            .encode()
            .unwrap();
        let (summary, out, session) = run_follow(&stream, false).await;

        assert_eq!(summary, WatchSummary::default());
        assert_eq!(out, "window-creation-succeeded\nmouse-clicked x=4 y=5\n");
        assert_eq!(session.total_records(), 2);
    }

    #[tokio::test]
    async fn decode_error_counted_and_decoding_resumes() {
        let mut stream = SignalEncoder::new()
            .mouse_moved(1, 2)
            .key_pressed(KeyCode::F3)
            .encode()
            .unwrap();
        stream[9] = b'x';
        let (summary, out, _) = run_follow(&stream, false).await;

        assert_eq!(summary.decode_errors, 1);
        assert_eq!(summary.last_error_offset, Some(9));
        assert_eq!(out, "key-pressed key=F3 code=0x72\n");
    }

    #[tokio::test]
    async fn stops_on_quit_when_asked() {
        let stream = SignalEncoder::new()
            .key_pressed(KeyCode::F1)
            .key_pressed(KeyCode::F2)
            .encode()
            .unwrap();

        let (summary, out, _) = run_follow(&stream, true).await;
        assert!(summary.quit);
        assert_eq!(out.lines().count(), 1);

        let (summary, out, _) = run_follow(&stream, false).await;
        assert!(!summary.quit);
        assert_eq!(out.lines().count(), 2);
    }
}
