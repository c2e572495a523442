/// Default cap on declared window title length, in UTF-16 code units.
pub const DEFAULT_MAX_TITLE_UNITS: u32 = 64 * 1024;

/// Default read size for [`SignalStream`](crate::SignalStream).
pub const DEFAULT_READ_CHUNK_SIZE: usize = 4096;

/// Decoder limits.
///
/// ```text
/// ┌─────────────────┬────────────────────────────────────────────────┐
/// │ Field           │ Purpose                                        │
/// ├─────────────────┼────────────────────────────────────────────────┤
/// │ max_title_units │ Reject titles declaring more UTF-16 units than │
/// │                 │ this instead of buffering until they arrive    │
/// │ read_chunk_size │ Bytes requested per read by SignalStream       │
/// └─────────────────┴────────────────────────────────────────────────┘
/// ```
///
/// The length field is 32 bits wide, so without a cap a single corrupt
/// title record could make the decoder hold up to 4 GiB of pending
/// input while it waits for text that will never come.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub max_title_units: u32,
    pub read_chunk_size: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_title_units: DEFAULT_MAX_TITLE_UNITS,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}
