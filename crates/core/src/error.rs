//! Error types for fetching assets and running the patching tools.

use std::{io, path::PathBuf, result};

/// Errors that can occur while fetching assets or patching a font.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to parse directory listing from {url}: {source}")]
    Listing {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("remote file {0} has no download URL")]
    MissingDownloadUrl(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with {}: {stderr}", exit_status(.code))]
    ToolFailed { tool: String, code: Option<i32>, stderr: String },

    #[error("{what} not found: {}", path.display())]
    MissingAsset { what: &'static str, path: PathBuf },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

fn exit_status(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}"))
}

pub type Result<T> = result::Result<T, Error>;
