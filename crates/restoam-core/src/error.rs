//! Error types for the workorder client.
//!
//! The propagation policy is deliberately coarse: any failed HTTP exchange is
//! an [`ApiError`] with no 4xx/5xx taxonomy, and persistence failures are
//! absorbed by the filter store (logged, defaults returned) rather than
//! surfaced to callers.

use thiserror::Error;

/// A failed exchange with the workorder resource.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be completed — transport failure or non-2xx
    /// status, undistinguished.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The response body could not be decoded as the expected JSON shape.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// A failed read or write of the persisted filter slot.
///
/// Only used inside the store's fallible core; the public store API absorbs
/// these and falls back to defaults.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access filter slot {slot}: {source}")]
    Io {
        slot: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode filter slot {slot}: {source}")]
    Corrupt {
        slot: String,
        #[source]
        source: serde_json::Error,
    },
}
