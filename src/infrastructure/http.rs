//! # HTTP Transport
//!
//! `GenerationTransport` over `reqwest`: POSTs the request as JSON to the generation
//! service and returns the archive body. Any non-success status is a failure.

use crate::domain::config::ServiceConfig;
use crate::domain::traits::{GenerationTransport, TransportError};
use crate::domain::types::SubmissionRequest;
use crate::strings::logs;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;

const ARCHIVE_TYPES: [&str; 2] = ["application/zip", "application/octet-stream"];

pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.projects_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    async fn send(&self, request: &SubmissionRequest) -> Result<Bytes, TransportError> {
        let response = self
            .client
            .post(&self.url)
            .header(ACCEPT, ARCHIVE_TYPES.join(", "))
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.to_string()));
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            && !ARCHIVE_TYPES.iter().any(|t| content_type.starts_with(t))
        {
            tracing::warn!("{}", logs::unexpected_content_type(content_type));
        }

        response
            .bytes()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))
    }
}
