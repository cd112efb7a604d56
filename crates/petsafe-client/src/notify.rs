// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort push-token registration.

use petsafe_model::FcmTokenRequest;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::PetsafeClient;
use crate::request::ApiRequest;

/// Sends the device's push token to `POST /me/fcm-token`.
///
/// Never fails its caller: without a credential it does nothing, and
/// upstream failures are logged and dropped.
#[derive(Debug, Clone)]
pub struct NotificationRegistrar {
    client: PetsafeClient,
}

impl NotificationRegistrar {
    pub fn new(client: PetsafeClient) -> Self {
        Self { client }
    }

    /// Register `token`. Returns whether the upstream accepted it.
    pub async fn register(&self, token: &str) -> bool {
        let token = token.trim();
        if token.is_empty() {
            debug!("empty push token; skipping registration");
            return false;
        }
        if self.client.current_credential().is_none() {
            debug!("not signed in; push token registration skipped");
            return false;
        }

        let body = FcmTokenRequest {
            fcm_token: token.to_string(),
        };
        let request = match ApiRequest::post("/me/fcm-token").json(&body) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "push token registration failed");
                return false;
            }
        };

        match self.client.execute(request).await {
            Ok(()) => {
                info!("push token registered");
                true
            }
            Err(e) => {
                warn!(
                    kind = %e.kind,
                    status = ?e.http_status,
                    "push token registration failed"
                );
                false
            }
        }
    }

    /// Run [`register`](Self::register) on a detached task.
    pub fn spawn_register(&self, token: String) -> JoinHandle<bool> {
        let registrar = self.clone();
        tokio::spawn(async move { registrar.register(&token).await })
    }
}
