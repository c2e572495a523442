use std::collections::VecDeque;
use std::io::ErrorKind;

use hsp_types::SignalRecord;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

use crate::config::DecoderConfig;
use crate::decoder::SignalDecoder;
use crate::error::DecodeError;

/// Asynchronous record stream over any `AsyncRead`, typically the piped
/// stdout of the hook process.
///
/// Each read of up to `read_chunk_size` bytes is pushed through a
/// [`SignalDecoder`]; the records it completes are handed out one per
/// call to [`next`](Self::next). The stream only reads again once every
/// buffered record has been taken, so a slow consumer applies
/// backpressure to the writer.
///
/// A decode error does not end the stream. Records that preceded it in
/// the same chunk are yielded first, then the error, then whatever the
/// decoder could resume with. The caller decides whether to stop.
///
/// # Example
///
/// ```rust,no_run
/// use hsp_decoder::SignalStream;
/// use tokio::io::AsyncRead;
///
/// async fn follow(reader: impl AsyncRead + Unpin) {
///   let mut stream = SignalStream::new(reader);
///   while let Some(result) = stream.next().await {
///     match result {
///       Ok(record) => println!("{record:?}"),
///       Err(e) => eprintln!("decode error: {e}"),
///     }
///   }
/// }
/// ```
pub struct SignalStream<R> {
  reader: R,
  decoder: SignalDecoder,
  ready: VecDeque<Result<SignalRecord, DecodeError>>,
  /// Read buffer, reused for every chunk.
  chunk: Vec<u8>,
  state: StreamState,
}

/// ```text
///   Reading ──(EOF or I/O error)──▶ Done
/// ```
///
/// Items queued in `ready` are drained before `Done` reports `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
  Reading,
  Done,
}

impl<R: AsyncRead + Unpin> SignalStream<R> {
  #[must_use]
  pub fn new(reader: R) -> Self {
    Self::with_config(reader, DecoderConfig::default())
  }

  #[must_use]
  pub fn with_config(reader: R, config: DecoderConfig) -> Self {
    let chunk = vec![0u8; config.read_chunk_size.max(1)];
    Self {
      reader,
      decoder: SignalDecoder::with_config(config),
      ready: VecDeque::new(),
      chunk,
      state: StreamState::Reading,
    }
  }

  /// The decoder behind the stream, for offset and pending counts.
  pub fn decoder(&self) -> &SignalDecoder {
    &self.decoder
  }

  /// Give back the reader. Buffered records and pending bytes are lost.
  pub fn into_inner(self) -> R {
    self.reader
  }

  /// Next record, or the next error, in stream order.
  ///
  /// Returns `None` once the reader is exhausted and every queued item
  /// has been taken. If the reader ends inside a record, a single
  /// [`DecodeError::TruncatedStream`] precedes the `None`.
  pub async fn next(&mut self) -> Option<Result<SignalRecord, DecodeError>> {
    loop {
      if let Some(item) = self.ready.pop_front() {
        return Some(item);
      }

      if self.state == StreamState::Done {
        return None;
      }

      match self.reader.read(&mut self.chunk).await {
        Ok(0) => {
          self.state = StreamState::Done;
          debug!(
            offset = self.decoder.stream_offset(),
            pending = self.decoder.pending(),
            "signal stream reached EOF"
          );
          if let Err(err) = self.decoder.check_complete() {
            warn!(%err, "signal stream ended inside a record");
            self.decoder.reset();
            return Some(Err(err));
          }
        }
        Ok(n) => {
          debug!(
            bytes = n,
            offset = self.decoder.stream_offset(),
            "read signal chunk"
          );
          let mut outcome = self.decoder.push(&self.chunk[..n]);
          // A push stops at its first error; empty pushes pick up
          // whatever it left pending. Each error consumes input, so
          // this ends.
          loop {
            self.ready.extend(outcome.records.into_iter().map(Ok));
            let Some(err) = outcome.error else {
              break;
            };
            warn!(
              %err,
              offset = self.decoder.stream_offset(),
              "skipping undecodable input"
            );
            self.ready.push_back(Err(err));
            outcome = self.decoder.push(&[]);
          }
        }
        Err(e) if e.kind() == ErrorKind::Interrupted => {}
        Err(e) => {
          self.state = StreamState::Done;
          warn!(error = %e, "signal stream read failed");
          return Some(Err(DecodeError::Io(e)));
        }
      }
    }
  }
}
