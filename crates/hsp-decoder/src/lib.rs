#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod streaming;

mod record_reader;

pub use config::DecoderConfig;
pub use decoder::{PushOutcome, SignalDecoder, decode_all, decode_all_with};
pub use error::DecodeError;
pub use streaming::SignalStream;
