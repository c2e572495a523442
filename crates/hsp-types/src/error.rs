use hsp_wire::WireError;

/// Errors raised when raw wire values do not map onto a typed record.
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │ TypeError (this crate)                           │
/// │   ├── UnknownKind for tags outside 0..=6         │
/// │   └── wraps WireError for symbol-level failures  │
/// └──────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
  /// The tag byte does not name any record kind.
  ///
  /// Unknown tags have no defined payload width, so there is no safe
  /// way to skip them. The decoder surfaces this to its caller.
  #[error("unknown signal kind: {value}")]
  UnknownKind { value: u8 },

  #[error(transparent)]
  Wire(#[from] WireError),
}
