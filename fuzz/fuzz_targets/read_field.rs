#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: hsp_wire::symbols::read_field at every width.
//
// The first byte picks the width (0..=33, so one past the maximum is
// tried too). A successful read must fit in the width and re-encode to
// the same symbols.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let width = usize::from(selector % 34);

    if let Ok(value) = hsp_wire::symbols::read_field(rest, 0, width) {
        if width < 32 {
            assert!(u64::from(value) < 1u64 << width);
        }
        let mut out = Vec::new();
        hsp_wire::symbols::write_field(value, width, &mut out);
        assert_eq!(out.as_slice(), &rest[..width]);
    }
});
