use hsp_types::SignalKind;

/// Rendering options for [`DefaultDriver`](crate::DefaultDriver).
///
/// ```text
/// ┌───────────────┬─────────────────────────────────────────────────┐
/// │ Field         │ Purpose                                         │
/// ├───────────────┼─────────────────────────────────────────────────┤
/// │ mode          │ One text line or one JSON object per record     │
/// │ include_kinds │ Optional allowlist, other kinds are skipped     │
/// └───────────────┴─────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriverConfig {
    pub mode: OutputMode,

    /// When `Some`, only records whose kind is listed are rendered.
    pub include_kinds: Option<Vec<SignalKind>>,
}

impl DriverConfig {
    /// Whether a record of `kind` passes the `include_kinds` filter.
    pub fn includes(&self, kind: SignalKind) -> bool {
        self.include_kinds
            .as_ref()
            .is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Output format.
///
/// ```text
/// Text  mouse-moved x=640 y=480
/// Json  {"kind":"mouse-moved","x":640,"y":480}
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}
