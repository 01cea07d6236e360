//! Error type shared by loading, normalization and rendering.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// Input is not a mapping of mappings, or a record has no usable `name`.
    #[error("input format error: {0}")]
    InputFormat(String),

    /// Strict mode was requested and the export holds no records.
    #[error("input contains no records")]
    EmptyInput,

    /// Two output entries would share one key.
    #[error("duplicate output key {0:?}")]
    DuplicateKey(String),

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize output: {0}")]
    Serialize(String),
}

impl NormalizeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
