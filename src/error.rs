use std::path::PathBuf;
use thiserror::Error;

/// Reasons a live fetch is abandoned in favour of the cache.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GitHub API returned {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("search returned no repositories")]
    Empty,
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid watch interval '{0}' (try 30s, 5m or 1h)")]
    Interval(String),

    #[error("no HOME directory; pass --cache-file")]
    NoHome,
}
