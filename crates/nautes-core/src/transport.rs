//! HTTP transport
//!
//! The dispatcher talks to the API server only through [`Transport`], so tests
//! can swap the network for an in-memory server.

use crate::error::{NautesError, Result};
use crate::request::{Method, Request};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

/// Sends resolved requests to the API server
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the response body of a 200 answer.
    ///
    /// Any other status is reported as [`NautesError::RemoteRejected`] with
    /// the verbatim response body.
    async fn send(&self, request: &Request, token: &str) -> Result<Vec<u8>>;
}

/// `reqwest` backed transport
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn transport_error(request: &Request, err: reqwest::Error) -> NautesError {
        NautesError::Transport {
            method: request.method.to_string(),
            url: request.url.clone(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request, token: &str) -> Result<Vec<u8>> {
        info!(method = %request.method, url = %request.url, "sending request");

        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        let mut builder = builder
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(token);
        if request.method.sends_body() {
            debug!(body = %request.body_text(), "request body");
            builder = builder.body(request.body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::transport_error(request, e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::transport_error(request, e))?;

        if status != StatusCode::OK {
            return Err(NautesError::RemoteRejected {
                kind: request.kind.to_string(),
                method: request.method.to_string(),
                url: request.url.clone(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }
}
