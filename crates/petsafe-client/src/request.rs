// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Description of one upstream call, before authentication is applied.

use petsafe_core::{ApiError, HttpMethod, OutboundRequest};
use serde::Serialize;

/// Whether a call carries the stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Attach the credential; fail without a network call when there is none.
    Required,
    /// Never attach a credential (login, register).
    Anonymous,
}

/// Generic message when an operation names no fallback of its own.
const DEFAULT_FALLBACK: &str = "The request could not be completed.";

/// One upstream call as described by a resource operation.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path relative to the API root, starting with `/`.
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub auth: AuthMode,
    /// Shown to the user when the upstream rejects the call without a
    /// readable message.
    pub fallback: String,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            auth: AuthMode::Required,
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Serialize `body` as the JSON payload.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::invalid_request(format!("request body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn anonymous(mut self) -> Self {
        self.auth = AuthMode::Anonymous;
        self
    }

    pub fn fallback(mut self, message: impl Into<String>) -> Self {
        self.fallback = message.into();
        self
    }

    /// Build the wire request, attaching `authorization` when given.
    pub fn into_outbound(self, authorization: Option<String>) -> OutboundRequest {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if self.body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(value) = authorization {
            headers.push(("Authorization".to_string(), value));
        }
        OutboundRequest {
            method: self.method,
            path: self.path,
            headers,
            body: self.body,
        }
    }
}
