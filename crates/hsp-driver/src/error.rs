/// Errors raised by rendering and session setup.
///
/// ```text
/// ┌──────────────────────┬──────────────────────────────────────────────┐
/// │ Variant              │ Cause                                        │
/// ├──────────────────────┼──────────────────────────────────────────────┤
/// │ EmptyInput           │ No records left to render after filtering    │
/// │ ZeroTraceCapacity    │ Cursor trace asked to hold no points         │
/// │ Json                 │ Serializing a record to JSON failed          │
/// └──────────────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("no records to render")]
    EmptyInput,

    #[error("cursor trace capacity must be at least 1")]
    ZeroTraceCapacity,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
