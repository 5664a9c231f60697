//! Error types for the ppx-builder crate.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching, rendering or writing a profile.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be completed (connect failure, timeout, body read).
    #[error("failed to retrieve {url}: {source}")]
    Retrieval {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("failed to retrieve {url}: HTTP status {status}")]
    Status { url: String, status: StatusCode },

    /// Building the XML document failed.
    #[error("failed to render profile: {0}")]
    Render(#[from] std::io::Error),

    /// Writing the rendered profile failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether this error came from a network retrieval.
    pub fn is_retrieval(&self) -> bool {
        matches!(self, Error::Retrieval { .. } | Error::Status { .. })
    }
}

/// Library result type
pub type Result<T> = std::result::Result<T, Error>;
