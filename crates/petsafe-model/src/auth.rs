// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login and registration bodies.

use petsafe_core::types::DEFAULT_TOKEN_TYPE;
use petsafe_core::{Credential, UserSnapshot};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// `POST /auth/login` body.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(serialize_with = "crate::expose_secret")]
    pub password: SecretString,
}

/// `POST /auth/register` body.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(serialize_with = "crate::expose_secret")]
    pub password: SecretString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// The account created by a registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisteredUser {
    pub id: u64,
    pub email: String,
}

impl RegisteredUser {
    /// Snapshot of the new account, completed with what the caller sent.
    pub fn into_snapshot(self, full_name: Option<String>, phone: Option<String>) -> UserSnapshot {
        UserSnapshot {
            id: self.id,
            email: self.email,
            full_name: full_name.unwrap_or_default(),
            phone: phone.filter(|p| !p.is_empty()),
            created_at: None,
        }
    }
}

/// Tokens and user summary handed out by a successful login.
#[derive(Debug, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: UserSnapshot,
}

/// `POST /auth/login` response, bare or wrapped in `{"data": …}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LoginResponse {
    Bare(TokenGrant),
    Enveloped { data: TokenGrant },
}

impl LoginResponse {
    pub fn into_credential(self) -> Credential {
        let grant = match self {
            Self::Bare(grant) | Self::Enveloped { data: grant } => grant,
        };
        Credential {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token.filter(|t| !t.is_empty()),
            token_type: grant
                .token_type
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string()),
            principal: grant.user,
        }
    }
}
