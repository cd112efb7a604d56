// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use petsafe_core::ApiError;
use petsafe_model::{Alert, AlertCount, StatusMessage};

use crate::client::PetsafeClient;
use crate::request::ApiRequest;

/// `/alerts` operations.
pub struct Alerts<'a> {
    client: &'a PetsafeClient,
}

impl<'a> Alerts<'a> {
    pub(crate) fn new(client: &'a PetsafeClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Alert>, ApiError> {
        self.client
            .fetch_list(ApiRequest::get("/alerts").fallback("Could not load alerts."))
            .await
    }

    pub async fn unread_count(&self) -> Result<u64, ApiError> {
        let count: AlertCount = self
            .client
            .fetch(ApiRequest::get("/alerts/count").fallback("Could not count alerts."))
            .await?;
        Ok(count.count)
    }

    pub async fn mark_read(&self, id: u64) -> Result<Alert, ApiError> {
        self.client
            .fetch_one(
                ApiRequest::patch(format!("/alerts/{id}/read")).fallback("Alert not found."),
            )
            .await
    }

    /// Returns the upstream's confirmation text, if any.
    pub async fn mark_all_read(&self) -> Result<Option<String>, ApiError> {
        let status: StatusMessage = self
            .client
            .fetch(ApiRequest::patch("/alerts/read-all").fallback("Could not update alerts."))
            .await?;
        Ok(status.message)
    }
}
