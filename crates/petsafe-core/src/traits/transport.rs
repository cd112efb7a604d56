// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Upstream transport trait.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{OutboundRequest, RawResponse};

/// Stateless carrier for upstream calls.
///
/// Implementations hold no credential: every request arrives with its own
/// headers. Any HTTP status is a successful `execute`; only a call that
/// produced no response at all fails, and it fails with
/// [`ErrorKind::TransportFailure`](crate::ErrorKind::TransportFailure).
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Sends the request and returns the upstream's status and body.
    async fn execute(&self, request: OutboundRequest) -> Result<RawResponse, ApiError>;
}
