use std::path::PathBuf;

/// Transient input error reported by the source hasher. The hash sink's
/// state past the point of absorbing the raw buffer is left undefined but
/// nonfatal -- the caller is expected to discard the key it was building.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to read source file {path}: {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to stat {path} for __TIMESTAMP__: {source}")]
    StatTimestamp {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to convert the current time to local time")]
    LocalTimeNow,

    #[error("failed to convert {path}'s mtime to local time")]
    LocalTimeMtime { path: PathBuf },

    #[error("failed to format {path}'s mtime as a __TIMESTAMP__ string")]
    FormatTimestamp { path: PathBuf },
}
