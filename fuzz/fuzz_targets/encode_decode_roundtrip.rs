#![no_main]

use arbitrary::Arbitrary;
use hsp_decoder::decode_all;
use hsp_encoder::SignalEncoder;
use hsp_types::{KeyCode, Point, ScreenSize, SignalRecord};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum FuzzRecord {
    WindowCreationFailed,
    WindowCreationSucceeded,
    HookInstalled { width: u32, height: u32 },
    MouseMoved { x: u32, y: u32 },
    MouseClicked { x: u32, y: u32 },
    KeyPressed { code: u8 },
    WindowTitle { title: String },
}

impl FuzzRecord {
    fn into_record(self) -> SignalRecord {
        match self {
            Self::WindowCreationFailed => SignalRecord::WindowCreationFailed,
            Self::WindowCreationSucceeded => SignalRecord::WindowCreationSucceeded,
            Self::HookInstalled { width, height } => {
                SignalRecord::HookInstalled(ScreenSize::new(width, height))
            }
            Self::MouseMoved { x, y } => SignalRecord::MouseMoved(Point::new(x, y)),
            Self::MouseClicked { x, y } => SignalRecord::MouseClicked(Point::new(x, y)),
            Self::KeyPressed { code } => SignalRecord::KeyPressed(KeyCode::from_wire_byte(code)),
            Self::WindowTitle { title } => SignalRecord::WindowTitleChanged(title),
        }
    }
}

/// What the decoder hands back for `record`: mouse coordinates with
/// the top bit set come back as 0.
fn expected(record: &SignalRecord) -> SignalRecord {
    match record {
        SignalRecord::MouseMoved(p) => SignalRecord::MouseMoved(Point::from_hook(p.x, p.y)),
        SignalRecord::MouseClicked(p) => SignalRecord::MouseClicked(Point::from_hook(p.x, p.y)),
        other => other.clone(),
    }
}

// Fuzz target: encode arbitrary records, decode, compare.
fuzz_target!(|records: Vec<FuzzRecord>| {
    let records: Vec<SignalRecord> = records.into_iter().map(FuzzRecord::into_record).collect();

    let mut encoder = SignalEncoder::new();
    for record in &records {
        encoder.record(record.clone());
    }
    let stream = encoder.encode().expect("fuzz titles fit the length field");

    let decoded = decode_all(&stream).expect("encoder output decodes");
    let wanted: Vec<SignalRecord> = records.iter().map(expected).collect();
    assert_eq!(decoded, wanted);
});
