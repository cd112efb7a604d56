// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted [`Transport`] for tests that must not touch the network.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use petsafe_core::{ApiError, OutboundRequest, RawResponse, Transport};
use tokio::sync::Mutex;

/// A transport that answers from a FIFO queue and records every request.
///
/// When the queue is empty it answers `200 {"data": null}`.
#[derive(Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<RawResponse, ApiError>>>>,
    requests: Arc<Mutex<Vec<OutboundRequest>>>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: Vec<Result<RawResponse, ApiError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            ..Self::default()
        }
    }

    /// Queue a response with a JSON body.
    pub async fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push(Ok(RawResponse::new(status, body.to_string()))).await;
    }

    /// Queue a response with a raw text body.
    pub async fn push_text(&self, status: u16, body: &str) {
        self.push(Ok(RawResponse::new(status, body))).await;
    }

    /// Queue a transport-level failure.
    pub async fn push_failure(&self, detail: &str) {
        self.push(Err(ApiError::transport(detail))).await;
    }

    pub async fn push(&self, response: Result<RawResponse, ApiError>) {
        self.responses.lock().await.push_back(response);
    }

    /// Number of requests that reached the transport.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn last_request(&self) -> Option<OutboundRequest> {
        self.requests.lock().await.last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: OutboundRequest) -> Result<RawResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(request);
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(200, r#"{"data":null}"#)))
    }
}
