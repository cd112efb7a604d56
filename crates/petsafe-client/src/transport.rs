// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport to the upstream API.
//!
//! [`HttpTransport`] owns the connection pool, the base URL and the
//! timeouts. It knows nothing about credentials: headers arrive already
//! built on the [`OutboundRequest`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use petsafe_config::model::UpstreamConfig;
use petsafe_core::{ApiError, HttpMethod, OutboundRequest, PetsafeError, RawResponse, Transport};
use petsafe_security::{build_secure_client, redact, validate_base_url};
use tracing::{debug, warn};

/// Shareable reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_root: String,
    connect_retries: u32,
}

impl HttpTransport {
    /// Build a transport from the `[upstream]` configuration section.
    ///
    /// Fails when the base URL violates the TLS policy.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, PetsafeError> {
        validate_base_url(&config.base_url, config.require_tls)?;
        let client = build_secure_client(
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self {
            client,
            api_root: config.api_root(),
            connect_retries: config.connect_retries,
        })
    }

    /// Wrap an existing client. `api_root` is the base URL plus prefix.
    pub fn new(client: reqwest::Client, api_root: impl Into<String>) -> Self {
        Self {
            client,
            api_root: api_root.into().trim_end_matches('/').to_string(),
            connect_retries: 0,
        }
    }

    pub fn with_connect_retries(mut self, retries: u32) -> Self {
        self.connect_retries = retries;
        self
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn build(&self, request: &OutboundRequest) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.api_root, request.path);
        let mut builder = self.client.request(to_reqwest(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }
        builder
    }
}

fn to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Only failures to establish the connection are safe to retry: the
/// request cannot have reached the server.
fn is_retryable(err: &reqwest::Error) -> bool {
    err.is_connect() && !err.is_timeout()
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: OutboundRequest) -> Result<RawResponse, ApiError> {
        let started = Instant::now();
        let mut attempt = 0;

        let response = loop {
            match self.build(&request).send().await {
                Ok(response) => break response,
                Err(e) if is_retryable(&e) && attempt < self.connect_retries => {
                    attempt += 1;
                    warn!(
                        method = %request.method,
                        path = %request.path,
                        attempt,
                        error = %e,
                        "connection failed, retrying"
                    );
                }
                Err(e) => {
                    let detail = redact(&e.to_string(), &[]);
                    warn!(
                        method = %request.method,
                        path = %request.path,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        timeout = e.is_timeout(),
                        error = %detail,
                        "upstream unreachable"
                    );
                    return Err(ApiError::transport(detail));
                }
            }
        };

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            let detail = redact(&e.to_string(), &[]);
            warn!(path = %request.path, status, error = %detail, "failed to read upstream body");
            ApiError::transport(detail)
        })?;

        debug!(
            method = %request.method,
            path = %request.path,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "upstream call"
        );
        Ok(RawResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(server: &MockServer) -> HttpTransport {
        let config = UpstreamConfig {
            base_url: server.uri(),
            connect_timeout_secs: 2,
            request_timeout_secs: 2,
            ..UpstreamConfig::default()
        };
        HttpTransport::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn sends_headers_and_body_under_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/v1/pets/3"))
            .and(header("authorization", "Bearer t"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"name": "Rex"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":{}}"#))
            .expect(1)
            .mount(&server)
            .await;

        let response = transport(&server)
            .execute(OutboundRequest {
                method: HttpMethod::Patch,
                path: "/pets/3".into(),
                headers: vec![
                    ("Authorization".into(), "Bearer t".into()),
                    ("Content-Type".into(), "application/json".into()),
                ],
                body: Some(serde_json::json!({"name": "Rex"})),
            })
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"data":{}}"#);
    }

    #[tokio::test]
    async fn error_statuses_are_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/me"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .expect(1)
            .mount(&server)
            .await;

        let response = transport(&server)
            .execute(OutboundRequest {
                method: HttpMethod::Get,
                path: "/me".into(),
                headers: vec![],
                body: None,
            })
            .await
            .unwrap();
        assert_eq!(response.status, 503);
    }

    #[tokio::test]
    async fn timeout_is_transport_failure_and_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/pets"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .expect(1)
            .mount(&server)
            .await;

        let client = build_secure_client(Duration::from_secs(1), Duration::from_millis(300)).unwrap();
        let transport = HttpTransport::new(client, format!("{}/api/v1", server.uri()))
            .with_connect_retries(3);
        let err = transport
            .execute(OutboundRequest {
                method: HttpMethod::Get,
                path: "/pets".into(),
                headers: vec![],
                body: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, petsafe_core::ErrorKind::TransportFailure);
        assert_eq!(err.http_status, None);
    }

    #[tokio::test]
    async fn refused_connection_is_transport_failure() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = build_secure_client(Duration::from_secs(1), Duration::from_secs(1)).unwrap();
        let transport = HttpTransport::new(client, format!("http://127.0.0.1:{port}/api/v1"))
            .with_connect_retries(1);
        let err = transport
            .execute(OutboundRequest {
                method: HttpMethod::Get,
                path: "/me".into(),
                headers: vec![],
                body: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, petsafe_core::ErrorKind::TransportFailure);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn plaintext_remote_origin_refused() {
        let config = UpstreamConfig {
            base_url: "http://pets.example.com".into(),
            ..UpstreamConfig::default()
        };
        assert!(HttpTransport::from_config(&config).is_err());
    }
}
