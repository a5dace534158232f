use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::connector::api::{ConvertController, Container};
use crate::domain::ConversionRequest;

/// Raw reply of the conversion endpoint as the form sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointReply {
    pub status: u16,
    /// Canonical reason phrase, e.g. `Internal Server Error`.
    pub status_text: String,
    pub body: Vec<u8>,
}

impl EndpointReply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_text: reason_phrase(status),
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a reply.
#[derive(Debug, Error)]
#[error("Network error: {0}")]
pub struct EndpointError(pub String);

/// How the form reaches `POST /api/convert`.
#[async_trait]
pub trait ConvertEndpoint: Send + Sync {
    async fn send(&self, request: &ConversionRequest) -> Result<EndpointReply, EndpointError>;
}

/// Calls the conversion controller in-process, through the same JSON contract.
pub struct LocalEndpoint {
    container: Arc<Container>,
}

impl LocalEndpoint {
    pub fn new(container: Arc<Container>) -> Self {
        Self { container }
    }
}

#[async_trait]
impl ConvertEndpoint for LocalEndpoint {
    async fn send(&self, request: &ConversionRequest) -> Result<EndpointReply, EndpointError> {
        let body = serde_json::to_vec(request).map_err(|e| EndpointError(e.to_string()))?;
        let result = ConvertController::new(&self.container).convert(&body).await;
        let body = serde_json::to_vec(&result.to_json()).map_err(|e| EndpointError(e.to_string()))?;
        Ok(EndpointReply::new(result.http_status(), body))
    }
}

/// Posts to a running server's `/api/convert` over HTTP.
pub struct HttpEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpEndpoint {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/api/convert", base.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ConvertEndpoint for HttpEndpoint {
    async fn send(&self, request: &ConversionRequest) -> Result<EndpointReply, EndpointError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| EndpointError(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| EndpointError(e.to_string()))?;
        debug!("{} answered {status}", self.url);

        Ok(EndpointReply {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: body.to_vec(),
        })
    }
}

fn reason_phrase(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or_default()
        .to_string()
}
