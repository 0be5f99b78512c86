use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(
        "no locale files found in '{}'\nHint: Check your .lokitrc.json 'localesDir' and 'localeFileNamePattern' settings.",
        .dir.display()
    )]
    NotFound { dir: PathBuf },

    #[error("failed to parse locale file '{}': {message}", .path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("failed to access '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown locale '{locale}'")]
    UnknownLocale { locale: String },

    #[error("failed to serialize locale '{locale}'")]
    Serialize {
        locale: String,
        #[source]
        source: serde_json::Error,
    },
}
