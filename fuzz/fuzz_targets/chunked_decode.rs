#![no_main]

use arbitrary::Arbitrary;
use hsp_decoder::{DecodeError, SignalDecoder};
use hsp_types::{SignalKind, SignalRecord};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    stream: Vec<u8>,
    splits: Vec<u8>,
}

/// Records and error offsets, in the order the decoder reported them.
type Trace = Vec<Result<SignalRecord, Option<u64>>>;

/// Push every piece, draining with empty pushes after each error.
fn decode(pieces: &[&[u8]]) -> (Trace, bool) {
    let mut decoder = SignalDecoder::new();
    let mut trace = Trace::new();
    let mut position_kept = true;

    for piece in pieces {
        let mut outcome = decoder.push(piece);
        loop {
            trace.extend(outcome.records.into_iter().map(Ok));
            let Some(err) = outcome.error else {
                break;
            };
            position_kept &= keeps_position(&err);
            trace.push(Err(err.offset()));
            outcome = decoder.push(&[]);
        }
    }
    let complete = decoder.finish().is_ok();
    (trace, position_kept && complete)
}

/// Errors after which the decoder resumes at the next record rather
/// than dropping its buffer.
fn keeps_position(err: &DecodeError) -> bool {
    match err {
        DecodeError::MalformedField { kind, .. } => *kind != SignalKind::WindowTitleChanged,
        DecodeError::InvalidTitleText { .. } => true,
        _ => false,
    }
}

// Fuzz target: decoding in arbitrary pieces agrees with one-shot decode.
//
// Holds for clean streams and for streams whose only errors are damaged
// records of known extent. After an unrecognized tag or an unusable
// title length the buffer is dropped, so what survives depends on where
// the pieces fell.
fuzz_target!(|input: Input| {
    let (expected, comparable) = decode(&[&input.stream]);
    if !comparable {
        return;
    }

    let mut pieces = Vec::new();
    let mut rest = input.stream.as_slice();
    for split in input.splits {
        let (piece, tail) = rest.split_at(usize::from(split).min(rest.len()));
        pieces.push(piece);
        rest = tail;
    }
    pieces.push(rest);

    let (trace, complete) = decode(&pieces);
    assert!(complete);
    assert_eq!(trace, expected);
});
