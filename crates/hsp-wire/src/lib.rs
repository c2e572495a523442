#![warn(clippy::pedantic)]

pub mod error;
pub mod layout;
pub mod symbols;
pub mod text;

pub use error::WireError;
