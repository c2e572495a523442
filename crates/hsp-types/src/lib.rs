#![warn(clippy::pedantic)]

pub mod error;
pub mod key;
pub mod kind;
pub mod point;
pub mod record;

pub use error::TypeError;
pub use key::KeyCode;
pub use kind::{PayloadShape, SignalKind};
pub use point::{Point, ScreenSize};
pub use record::SignalRecord;
