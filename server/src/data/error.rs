//! Error type for the data layer
//!
//! Covers the upstream XML service: endpoint configuration, RPC status,
//! timeouts and fragment decoding.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    /// Endpoint URL could not be parsed
    #[error("Invalid upstream endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Upstream returned a non-OK status
    #[error("Upstream returned {}: {}", .0.code(), .0.message())]
    Status(#[from] tonic::Status),

    /// Request did not complete in time
    #[error("Upstream request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Result fragment is not well-formed XML
    #[error("Malformed XML fragment: {0}")]
    Xml(String),
}

impl SourceError {
    pub fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml(err.to_string())
    }

    /// Whether retrying later could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Status(status) => matches!(
                status.code(),
                tonic::Code::Unavailable | tonic::Code::DeadlineExceeded
            ),
            Self::InvalidEndpoint { .. } | Self::Xml(_) => false,
        }
    }
}
