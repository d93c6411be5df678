//! Error types for the v20 client.

use thiserror::Error;

/// Errors surfaced by the v20 client.
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// Invalid configuration at construction time.
    #[error("configuration error: {message}")]
    Configuration {
        /// What was wrong with the configuration.
        message: String,
    },

    /// Connection failure, timeout, or mid-stream I/O failure.
    #[error("transport error: {message}")]
    Transport {
        /// Transport-level failure description.
        message: String,
    },

    /// The API answered a request with a non-success status.
    #[error("{method} {path}: {status} {message}")]
    Api {
        /// HTTP method of the failing request.
        method: String,
        /// Request path with account identifiers redacted.
        path: String,
        /// HTTP status code.
        status: u16,
        /// The server's errorMessage, or the raw body when it is not JSON.
        message: String,
    },

    /// Malformed JSON in a single-shot response body.
    #[error("decode error: {message}")]
    Decode {
        /// Description of the JSON failure.
        message: String,
    },

    /// Wire-format violation on a stream; fatal to that stream only.
    #[error("protocol error: {message}")]
    Protocol {
        /// Description of the violation.
        message: String,
    },
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// Replace the account identifier segment of `path` with a placeholder so
/// API errors can be rendered without leaking account IDs.
pub(crate) fn redact_account_id(path: &str) -> String {
    let mut segments: Vec<&str> = path.split('/').collect();
    for i in 0..segments.len().saturating_sub(1) {
        if segments[i] == "accounts" && !segments[i + 1].is_empty() {
            segments[i + 1] = "<ACCOUNT>";
        }
    }
    segments.join("/")
}
