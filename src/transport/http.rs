// ABOUTME: reqwest-backed transport performing one HTTPS exchange per prepared request
// ABOUTME: Applies bearer auth, reads the Link header cursor and classifies failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use async_trait::async_trait;
use canvas_core::constants::LINK_HEADER;
use canvas_core::pagination::next_cursor;
use canvas_core::{CanvasError, CanvasResult};
use reqwest::header::ACCEPT;
use reqwest::{Client, ClientBuilder};
use tracing::debug;

use super::{decode_body, Method, PreparedRequest, RawResponse, Transport};
use crate::config::{ClientConfig, ConfigError};

/// HTTP transport with connection pooling and configured timeouts
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the TLS backend cannot be initialized
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: PreparedRequest) -> CanvasResult<RawResponse> {
        let url = request.url.to_string();
        let mut builder = self
            .client
            .request(request.method.into(), request.url)
            .bearer_auth(request.bearer.expose())
            .header(ACCEPT, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CanvasError::network(url.as_str(), e.to_string()))?;

        let status = response.status();
        // A response may split its links over several `Link` headers
        let links = response
            .headers()
            .get_all(LINK_HEADER)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join(", ");
        let next = next_cursor(&links);
        let text = response.text().await?;
        debug!(%url, status = status.as_u16(), has_next = next.is_some(), "received response");

        if !status.is_success() {
            return Err(CanvasError::from_status(status.as_u16(), url, &text));
        }

        Ok(RawResponse {
            status: status.as_u16(),
            body: decode_body(&text, &url)?,
            next,
        })
    }
}
