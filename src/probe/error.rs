// ABOUTME: Error types for health probes.
// ABOUTME: Distinguishes transport failures from undecodable response bodies.

use std::time::Duration;

/// Errors from a single probe attempt. All of them are recoverable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("connection to {address} failed: {reason}")]
    Connect { address: String, reason: String },

    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("response body is not valid JSON (HTTP {status}): {reason}")]
    Decode { status: u16, reason: String },
}
