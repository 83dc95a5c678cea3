use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the conversion pipeline.
///
/// Individual table lookups never fail (identity fallback); everything here
/// is either a construction-time failure of the registry, a missing or
/// malformed input artifact, or a regression mismatch.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path} as JSON")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to render canonical JSON")]
    Render(#[source] serde_json::Error),

    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    #[error("{table} is not a bijection: duplicate {side} entry '{entry}'")]
    BrokenBijection {
        table: &'static str,
        side: &'static str,
        entry: String,
    },

    #[error("no '*_db.json' entity files found under {path}")]
    MissingDatabase { path: PathBuf },

    #[error("unknown setting '{0}', expected one of: zh, en, en_zh")]
    UnknownSetting(String),

    #[error("atomic write to {path} failed")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("converted output does not match the golden file {path}")]
    GoldenMismatch { path: PathBuf },
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io { path: path.into(), source }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ConvertError::Json { path: path.into(), source }
    }
}
