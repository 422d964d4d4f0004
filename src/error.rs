//! Error types for the bshc library.

use thiserror::Error;

/// The main error type for bshc operations.
#[derive(Debug, Error)]
pub enum Error {
    /// TLS context construction failed.
    ///
    /// Raised once at client construction, never during calls. The TLS
    /// protocol version is a fixed constant shared with the controller
    /// firmware, so this indicates a broken runtime configuration rather
    /// than a recoverable condition.
    #[error("TLS configuration error: {0}")]
    Tls(#[from] rustls::Error),

    /// Certificate material was missing or could not be parsed.
    #[error("invalid certificate material: {reason}")]
    Certificate {
        /// What was wrong with the material.
        reason: String,
    },

    /// The request URL could not be built from host, port and path.
    #[error("invalid request URL: {reason}")]
    Url {
        /// Why the URL was rejected.
        reason: String,
    },

    /// Failure while issuing a call or handling its response.
    ///
    /// Covers connection failures, TLS handshake rejections and request
    /// body serialization. Exactly one of these terminates a failed call;
    /// nothing is retried.
    #[error("error during parsing response from BSHC: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected type.
    #[error("error decoding response from BSHC: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for bshc operations.
pub type Result<T> = std::result::Result<T, Error>;
