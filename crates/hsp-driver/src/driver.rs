use hsp_types::SignalRecord;

use crate::config::{DriverConfig, OutputMode};
use crate::error::DriverError;
use crate::render_json::JsonRenderer;
use crate::render_text::TextRenderer;

/// Renders decoded records for people or downstream tools.
///
/// ```text
/// &[SignalRecord] ──▶ SignalDriver::render() ──▶ String
///                           │
///                     DriverConfig
///                     (mode, include_kinds)
/// ```
pub trait SignalDriver {
    /// Render a batch of records, one line each.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::EmptyInput`] if nothing is left after
    /// applying `config.include_kinds`.
    fn render(&self, records: &[SignalRecord], config: &DriverConfig) -> Result<String, DriverError>;
}

/// Filters by kind, then hands the survivors to the text or JSON
/// renderer selected by `config.mode`.
pub struct DefaultDriver;

impl DefaultDriver {
    /// Render one record, or `None` if the filter drops it. Used for
    /// live output where records arrive one at a time.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Json`] if JSON serialization fails.
    pub fn render_record(
        &self,
        record: &SignalRecord,
        config: &DriverConfig,
    ) -> Result<Option<String>, DriverError> {
        if !config.includes(record.kind()) {
            return Ok(None);
        }
        let line = match config.mode {
            OutputMode::Text => TextRenderer::render_record(record),
            OutputMode::Json => JsonRenderer::render_record(record)?,
        };
        Ok(Some(line))
    }
}

impl SignalDriver for DefaultDriver {
    fn render(&self, records: &[SignalRecord], config: &DriverConfig) -> Result<String, DriverError> {
        let filtered: Vec<&SignalRecord> = records
            .iter()
            .filter(|record| config.includes(record.kind()))
            .collect();

        if filtered.is_empty() {
            return Err(DriverError::EmptyInput);
        }

        match config.mode {
            OutputMode::Text => Ok(TextRenderer::render_all(&filtered)),
            OutputMode::Json => JsonRenderer::render_all(&filtered),
        }
    }
}
