/// Errors that can occur while encoding a signal stream.
///
/// ```text
///   EncodeError
///   ├── EmptyStream    ← no records were added before .encode()
///   └── TitleTooLong   ← declared length (units + 1) does not fit 32 bits
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("no records have been added to the encoder")]
    EmptyStream,

    #[error("window title has {units} UTF-16 units, limit {limit}")]
    TitleTooLong { units: usize, limit: usize },
}
