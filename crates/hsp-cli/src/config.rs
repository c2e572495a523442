use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hsp_decoder::DecoderConfig;
use hsp_decoder::config::{DEFAULT_MAX_TITLE_UNITS, DEFAULT_READ_CHUNK_SIZE};
use hsp_driver::{DEFAULT_TRACE_CAPACITY, Session};
use serde::Deserialize;

/// Settings read from `--config`.
///
/// ```toml
/// [decoder]
/// max_title_units = 65536
/// read_chunk_size = 4096
///
/// [session]
/// trace_capacity = 100
/// ```
///
/// Every key is optional; missing keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub decoder: DecoderSection,
    pub session: SessionSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderSection {
    pub max_title_units: u32,
    pub read_chunk_size: usize,
}

impl Default for DecoderSection {
    fn default() -> Self {
        Self {
            max_title_units: DEFAULT_MAX_TITLE_UNITS,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSection {
    pub trace_capacity: usize,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            trace_capacity: DEFAULT_TRACE_CAPACITY,
        }
    }
}

impl CliConfig {
    /// Load `path`, or the defaults when no file was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig {
            max_title_units: self.decoder.max_title_units,
            read_chunk_size: self.decoder.read_chunk_size,
        }
    }

    pub fn new_session(&self) -> Result<Session> {
        Session::with_trace_capacity(self.session.trace_capacity)
            .context("invalid [session] trace_capacity")
    }
}
