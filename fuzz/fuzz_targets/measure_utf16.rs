#![no_main]

use hsp_wire::text::{extent_lossy, measure_utf16, TextExtent};
use libfuzzer_sys::fuzz_target;

// Fuzz target: UTF-16 unit measurement over UTF-8 bytes.
//
// A complete measurement must cover valid text of exactly `units` UTF-16
// units, and the lossy extent must agree with it on clean text.
fuzz_target!(|data: &[u8]| {
    let Some((&units, rest)) = data.split_first() else {
        return;
    };
    let units = usize::from(units);

    if let Ok(TextExtent::Complete { byte_len }) = measure_utf16(rest, units) {
        let text = std::str::from_utf8(&rest[..byte_len]).expect("measured text is valid UTF-8");
        assert_eq!(text.encode_utf16().count(), units);
        assert_eq!(extent_lossy(rest, units), Some(byte_len));
    }
});
