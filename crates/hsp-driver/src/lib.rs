#![warn(clippy::pedantic)]

pub mod config;
pub mod driver;
pub mod error;
pub mod handler;
pub mod render_json;
pub mod render_text;
pub mod session;
pub mod shortcut;
pub mod trace;

pub use config::{DriverConfig, OutputMode};
pub use driver::{DefaultDriver, SignalDriver};
pub use error::DriverError;
pub use handler::{dispatch, SignalHandler};
pub use session::Session;
pub use shortcut::{Mode, Shortcut, ShortcutOutcome};
pub use trace::{CursorTrace, DEFAULT_TRACE_CAPACITY};
