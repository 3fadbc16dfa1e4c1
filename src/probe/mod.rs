// ABOUTME: Health probe abstraction: fetch and decode one health document.
// ABOUTME: The poll loop talks to endpoints only through the HealthProbe trait.

mod error;
mod http;

pub use error::ProbeError;
pub use http::HttpProbe;
pub(crate) use http::Target;

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Fetches a health document from an endpoint.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Issue a single GET against `url` and decode the body as JSON.
    ///
    /// The whole exchange, connect included, must finish within `timeout`.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Value, ProbeError>;
}
