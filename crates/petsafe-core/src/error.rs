// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the PetSafe client proxy.
//!
//! Two layers: [`ApiError`] is the classified outcome of a single upstream
//! call (the four-kind taxonomy callers branch on), and [`PetsafeError`] is
//! the workspace-wide error that additionally covers configuration, local
//! storage, and security-policy failures.

use serde::Serialize;
use strum::Display;
use thiserror::Error;

/// User-facing text when the credential is missing or rejected upstream.
pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// User-facing text when the upstream answered with a fault.
pub const UPSTREAM_UNAVAILABLE: &str =
    "The server could not complete the request. Please try again later.";

/// User-facing text when no response was obtained at all.
pub const CONNECTION_FAILED: &str =
    "Could not connect to the server. Check your connection and try again.";

/// Generic text for a rejected request without a usable upstream message.
pub const REQUEST_REJECTED: &str = "The request was rejected. Check the information and try again.";

/// The four outcome kinds a failed upstream call is classified into.
///
/// Listed in precedence order: a call that produced no response is always a
/// `TransportFailure`, whatever else is known about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No response obtained (DNS, connect, timeout).
    TransportFailure,
    /// HTTP 401, or no credential present to attempt the call.
    Unauthenticated,
    /// Business-level rejection (400, 404, 409 and other 4xx).
    Rejected,
    /// HTTP 5xx, or a 2xx body that could not be parsed.
    UpstreamFault,
}

/// A classified upstream failure.
///
/// `message` is always populated and is safe to show to an end user.
/// `detail` carries the upstream's own text (or the transport error) for
/// logging; it is never meant to be rendered verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ApiError {
    /// Outcome kind.
    pub kind: ErrorKind,
    /// HTTP status, when a response was obtained.
    pub http_status: Option<u16>,
    /// End-user message.
    pub message: String,
    /// Upstream or transport detail for logs.
    pub detail: Option<String>,
    /// Raw response body (empty when there was no response).
    pub raw_body: String,
}

impl ApiError {
    /// No response was obtained.
    pub fn transport(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::TransportFailure,
            http_status: None,
            message: CONNECTION_FAILED.to_string(),
            detail: Some(detail.into()),
            raw_body: String::new(),
        }
    }

    /// No credential is present, so the call was never attempted.
    pub fn not_signed_in() -> Self {
        Self {
            kind: ErrorKind::Unauthenticated,
            http_status: None,
            message: SESSION_EXPIRED.to_string(),
            detail: None,
            raw_body: String::new(),
        }
    }

    /// The upstream answered 401.
    pub fn unauthenticated(detail: Option<String>, raw_body: String) -> Self {
        Self {
            kind: ErrorKind::Unauthenticated,
            http_status: Some(401),
            message: SESSION_EXPIRED.to_string(),
            detail,
            raw_body,
        }
    }

    /// The upstream rejected the request. `message` should already be the
    /// upstream text or the operation's fallback.
    pub fn rejected(
        status: u16,
        message: impl Into<String>,
        detail: Option<String>,
        raw_body: String,
    ) -> Self {
        Self {
            kind: ErrorKind::Rejected,
            http_status: Some(status),
            message: message.into(),
            detail,
            raw_body,
        }
    }

    /// The request could not be built from the caller's input; nothing was sent.
    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Rejected,
            http_status: None,
            message: REQUEST_REJECTED.to_string(),
            detail: Some(detail.into()),
            raw_body: String::new(),
        }
    }

    /// The upstream failed or sent an unreadable success body.
    pub fn upstream_fault(status: u16, detail: Option<String>, raw_body: String) -> Self {
        Self {
            kind: ErrorKind::UpstreamFault,
            http_status: Some(status),
            message: UPSTREAM_UNAVAILABLE.to_string(),
            detail,
            raw_body,
        }
    }

    /// Replace the end-user message, keeping kind, status and detail.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// True for [`ErrorKind::Unauthenticated`].
    pub fn is_unauthenticated(&self) -> bool {
        self.kind == ErrorKind::Unauthenticated
    }

    /// True for a rejection carrying HTTP 404.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::Rejected && self.http_status == Some(404)
    }
}

/// The primary error type used across the PetSafe workspace.
#[derive(Debug, Error)]
pub enum PetsafeError {
    /// A classified upstream failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration errors (invalid TOML, bad base URL, bad timeouts).
    #[error("configuration error: {0}")]
    Config(String),

    /// Credential persistence errors (database open, query failure, corrupt row).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Security policy violations (plaintext remote origin).
    #[error("security error: {0}")]
    Security(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PetsafeError {
    /// The classified kind, when this wraps an upstream failure.
    pub fn api_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Api(err) => Some(err.kind),
            _ => None,
        }
    }

    /// Wrap any error as a storage failure.
    pub fn storage(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage {
            source: Box::new(source),
        }
    }
}
