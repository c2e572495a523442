#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;
pub mod record_writer;

pub use encoder::SignalEncoder;
pub use error::EncodeError;
pub use record_writer::encode_record;
