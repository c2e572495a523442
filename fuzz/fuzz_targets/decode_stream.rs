#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: one-shot decode of an arbitrary byte stream.
//
// Catches bugs in:
// - Tag and field parsing on non-symbol bytes
// - Title length arithmetic (declared 0, huge declared lengths)
// - UTF-8 measurement of title text
// - Offset bookkeeping in error values
fuzz_target!(|data: &[u8]| {
    if let Err(err) = hsp_decoder::decode_all(data) {
        if let Some(offset) = err.offset() {
            assert!(offset <= data.len() as u64);
        }
    }
});
