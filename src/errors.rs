//! Unified error types for `StockSense`.
//!
//! Backend failures are split out into [`FetchError`] so the catalog view can
//! tell a transport problem from a bad status or an unreadable body, and
//! recover locally instead of bubbling up to the host.

use thiserror::Error;

/// Failure of a single request against the backend API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (connection refused, timeout, TLS).
    #[error("Network error requesting {url}: {source}")]
    Network {
        /// Requested URL
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success HTTP status.
    #[error("Backend returned HTTP {status} for {url}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The body could not be decoded into the expected JSON shape.
    #[error("Invalid response body from {url}: {message}")]
    Decode {
        /// Requested URL
        url: String,
        /// Decoder message
        message: String,
    },
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration, including bad filter control values.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// A backend request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The backend processed the request but reported an error payload.
    #[error("Backend error: {message}")]
    Backend {
        /// Message from the backend's `erro` field
        message: String,
    },

    /// A spreadsheet was rejected before upload.
    #[error("{message}")]
    InvalidUpload {
        /// Message shown to the user
        message: String,
    },

    /// Template compilation or rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] tera::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
