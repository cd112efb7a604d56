// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use petsafe_core::{ApiError, UserSnapshot};
use petsafe_model::{PasswordChange, ProfileUpdate};
use tracing::warn;

use crate::client::PetsafeClient;
use crate::request::ApiRequest;

/// `/me` operations. Every fresh copy of the profile replaces the cached
/// principal in the store.
pub struct Profile<'a> {
    client: &'a PetsafeClient,
}

impl<'a> Profile<'a> {
    pub(crate) fn new(client: &'a PetsafeClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<UserSnapshot, ApiError> {
        let user: UserSnapshot = self
            .client
            .fetch_one(ApiRequest::get("/me").fallback("Could not load your profile."))
            .await?;
        self.cache(&user).await;
        Ok(user)
    }

    /// Send only the fields set in `update`.
    pub async fn update(&self, update: &ProfileUpdate) -> Result<UserSnapshot, ApiError> {
        let request = ApiRequest::patch("/me")
            .json(update)?
            .fallback("Could not update your profile.");
        let user: UserSnapshot = self.client.fetch_one(request).await?;
        self.cache(&user).await;
        Ok(user)
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        let request = ApiRequest::patch("/me/password")
            .json(change)?
            .fallback("Could not change the password. Check the current password.");
        self.client.execute(request).await
    }

    async fn cache(&self, user: &UserSnapshot) {
        if let Err(e) = self.client.store().update_principal(user.clone()).await {
            warn!(error = %e, "could not persist refreshed profile");
        }
    }
}
