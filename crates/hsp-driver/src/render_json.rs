use hsp_types::SignalRecord;
use serde_json::{json, Value};

use crate::error::DriverError;

/// JSON Lines renderer: one object per record, keyed by `kind`.
///
/// ```text
/// {"height":1080,"kind":"hook-installed","width":1920}
/// {"kind":"mouse-moved","x":640,"y":480}
/// {"code":114,"key":"F3","kind":"key-pressed"}
/// {"kind":"window-title-changed","title":"Untitled - Notepad"}
/// ```
///
/// Keys come out in sorted order.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns [`DriverError::Json`] if serialization fails.
    pub fn render_all(records: &[&SignalRecord]) -> Result<String, DriverError> {
        let mut lines = Vec::with_capacity(records.len());
        for record in records {
            lines.push(Self::render_record(record)?);
        }
        Ok(lines.join("\n"))
    }

    /// # Errors
    ///
    /// Returns [`DriverError::Json`] if serialization fails.
    pub fn render_record(record: &SignalRecord) -> Result<String, DriverError> {
        Ok(serde_json::to_string(&Self::to_value(record))?)
    }

    pub fn to_value(record: &SignalRecord) -> Value {
        let kind = record.kind().name();
        match record {
            SignalRecord::WindowCreationFailed | SignalRecord::WindowCreationSucceeded => {
                json!({ "kind": kind })
            }
            SignalRecord::HookInstalled(screen) => json!({
                "kind": kind,
                "width": screen.width,
                "height": screen.height,
            }),
            SignalRecord::MouseMoved(point) | SignalRecord::MouseClicked(point) => json!({
                "kind": kind,
                "x": point.x,
                "y": point.y,
            }),
            SignalRecord::KeyPressed(key) => json!({
                "kind": kind,
                "key": key.to_string(),
                "code": key.to_wire_byte(),
            }),
            SignalRecord::WindowTitleChanged(title) => json!({
                "kind": kind,
                "title": title,
            }),
        }
    }
}
