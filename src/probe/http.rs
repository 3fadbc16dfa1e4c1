// ABOUTME: Plain HTTP/1.1 health probe built on a hyper client connection.
// ABOUTME: One TCP connection per attempt; the body is decoded as JSON regardless of status.

use super::{HealthProbe, ProbeError};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::header::{ACCEPT, HOST, USER_AGENT};
use hyper::{Method, Request, Uri};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpStream;

const USER_AGENT_VALUE: &str = concat!("healthwait/", env!("CARGO_PKG_VERSION"));

/// Target of a probe, split out of a parsed `http://` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    /// Host without IPv6 brackets, suitable for `TcpStream::connect`.
    pub host: String,
    pub port: u16,
    /// Authority as written in the URL, used for the `Host` header.
    pub authority: String,
    pub path: String,
}

impl Target {
    /// Parse an absolute `http://` URL.
    pub(crate) fn parse(url: &str) -> Result<Self, String> {
        let uri = url.parse::<Uri>().map_err(|e| e.to_string())?;

        match uri.scheme_str() {
            Some("http") => {}
            Some(other) => {
                return Err(format!(
                    "unsupported scheme '{other}', only http is supported"
                ));
            }
            None => return Err("missing scheme, expected http://".to_string()),
        }

        let authority = uri
            .authority()
            .ok_or_else(|| "missing host".to_string())?
            .as_str()
            .to_string();
        let host = uri
            .host()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| "missing host".to_string())?
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string();
        let path = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "/".to_string());

        Ok(Self {
            host,
            port: uri.port_u16().unwrap_or(80),
            authority,
            path,
        })
    }
}

/// Health probe speaking HTTP/1.1 over TCP.
#[derive(Debug, Clone, Default)]
pub struct HttpProbe;

impl HttpProbe {
    pub fn new() -> Self {
        Self
    }

    async fn get(&self, url: &str, target: &Target) -> Result<Value, ProbeError> {
        let address = format!("{}:{}", target.host, target.port);
        let stream = TcpStream::connect((target.host.as_str(), target.port))
            .await
            .map_err(|e| ProbeError::Connect {
                address: address.clone(),
                reason: e.to_string(),
            })?;

        let io = TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|e| ProbeError::Connect {
                address: address.clone(),
                reason: format!("HTTP handshake failed: {e}"),
            })?;

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!(error = %e, "health probe connection closed with error");
            }
        });

        let req = Request::builder()
            .method(Method::GET)
            .uri(target.path.as_str())
            .header(HOST, target.authority.as_str())
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .body(Empty::<Bytes>::new())
            .map_err(|e| ProbeError::Request(format!("failed to build request: {e}")))?;

        let resp = sender
            .send_request(req)
            .await
            .map_err(|e| ProbeError::Request(e.to_string()))?;

        let status = resp.status();
        tracing::debug!(%url, status = status.as_u16(), "health endpoint responded");

        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| ProbeError::Request(format!("failed to read response: {e}")))?
            .to_bytes();

        serde_json::from_slice(&body).map_err(|e| ProbeError::Decode {
            status: status.as_u16(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl HealthProbe for HttpProbe {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Value, ProbeError> {
        let target = Target::parse(url).map_err(|reason| ProbeError::InvalidUrl {
            url: url.to_string(),
            reason,
        })?;

        match tokio::time::timeout(timeout, self.get(url, &target)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(ProbeError::Timeout(timeout)),
        }
    }
}
