//! Single-attempt access to the remote inventory endpoint.
//!
//! The [`InventoryTransport`] trait is the seam between the retry logic and
//! the network: [`HttpTransport`] talks to the real endpoint through a shared
//! `reqwest` connection pool, while tests plug in scripted transports.

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use invsweep_common::config::{ADDRESS_PLACEHOLDER, Config};
use reqwest::{Client, StatusCode};
use serde_json::value::RawValue;
use thiserror::Error;

/// Why a single attempt did not produce a JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// The endpoint answered with a non-success status.
    #[error("StatusCode {0}")]
    Status(StatusCode),
    /// Connection, timeout or body-read failure.
    #[error("{0}")]
    Transport(String),
    /// The endpoint answered 2xx but the body was not JSON.
    #[error("invalid JSON body: {0}")]
    Decode(String),
}

#[async_trait]
pub trait InventoryTransport: Send + Sync {
    /// Performs exactly one request for `address`. The body is validated as
    /// JSON but kept as the text the endpoint sent.
    async fn fetch(&self, address: &str) -> Result<Box<RawValue>, AttemptError>;
}

pub struct HttpTransport {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client: Client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Self::new(cfg.endpoint.clone(), cfg.request_timeout)
    }

    fn describe(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            return format!("request timed out after {}ms", self.timeout.as_millis());
        }

        let mut description: String = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            description.push_str(": ");
            description.push_str(&cause.to_string());
            source = cause.source();
        }
        description
    }
}

#[async_trait]
impl InventoryTransport for HttpTransport {
    async fn fetch(&self, address: &str) -> Result<Box<RawValue>, AttemptError> {
        let url: String = target_url(&self.endpoint, address);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AttemptError::Transport(self.describe(&e)))?;

        let status: StatusCode = response.status();
        if !status.is_success() {
            return Err(AttemptError::Status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AttemptError::Transport(self.describe(&e)))?;

        decode_body(&body)
    }
}

fn decode_body(body: &[u8]) -> Result<Box<RawValue>, AttemptError> {
    serde_json::from_slice(body).map_err(|e| AttemptError::Decode(e.to_string()))
}

/// Builds the request URL for `address` from the endpoint template.
pub fn target_url(endpoint: &str, address: &str) -> String {
    if endpoint.contains(ADDRESS_PLACEHOLDER) {
        endpoint.replace(ADDRESS_PLACEHOLDER, address)
    } else {
        format!("{}/{}", endpoint.trim_end_matches('/'), address)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
