// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sign-up, sign-in and sign-out.
//!
//! This is the only place a fresh credential enters a store. Refresh tokens
//! are kept but never exchanged: an expired access token surfaces as
//! `Unauthenticated` and the user signs in again.

use petsafe_core::{ApiError, Credential, PetsafeError, UserSnapshot};
use petsafe_model::{LoginRequest, LoginResponse, RegisterRequest, RegisteredUser};
use secrecy::SecretString;
use tracing::info;

use crate::client::PetsafeClient;
use crate::request::ApiRequest;

/// Shown when the upstream refuses the e-mail/password pair.
pub const INVALID_CREDENTIALS: &str = "Incorrect e-mail or password.";

/// Owns the credential lifecycle of one store.
#[derive(Debug, Clone)]
pub struct AuthManager {
    client: PetsafeClient,
}

impl AuthManager {
    pub fn new(client: PetsafeClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &PetsafeClient {
        &self.client
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserSnapshot, ApiError> {
        let full_name = request.full_name.clone();
        let phone = request.phone.clone();
        let outbound = ApiRequest::post("/auth/register")
            .anonymous()
            .json(&request)?
            .fallback("Could not create the account. Check the information.");
        let created: RegisteredUser = self.client.fetch_one(outbound).await?;
        info!(user_id = created.id, "account registered");
        Ok(created.into_snapshot(full_name, phone))
    }

    /// Exchange e-mail and password for a credential and store it.
    ///
    /// On any failure the store is left exactly as it was.
    pub async fn login(&self, email: &str, password: SecretString) -> Result<Credential, PetsafeError> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            password,
        };
        let request = ApiRequest::post("/auth/login")
            .anonymous()
            .json(&body)?
            .fallback("Could not sign in. Check the information.");

        let response: LoginResponse = match self.client.fetch(request).await {
            Ok(response) => response,
            Err(e) if e.is_unauthenticated() => return Err(e.with_message(INVALID_CREDENTIALS).into()),
            Err(e) => return Err(e.into()),
        };

        let credential = response.into_credential();
        self.client.store().save(credential.clone()).await?;
        info!(user_id = credential.principal.id, "signed in");
        Ok(credential)
    }

    /// Forget the stored credential. Nothing is sent upstream.
    pub async fn logout(&self) -> Result<(), PetsafeError> {
        self.client.store().clear().await?;
        info!("signed out");
        Ok(())
    }
}
