// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile, password and push-token bodies.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::patch::{clear_as_empty, Patch};

/// `PATCH /me` body. The upstream clears these fields with `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(
        default,
        skip_serializing_if = "Patch::is_unset",
        serialize_with = "clear_as_empty"
    )]
    pub full_name: Patch<String>,
    #[serde(
        default,
        skip_serializing_if = "Patch::is_unset",
        serialize_with = "clear_as_empty"
    )]
    pub phone: Patch<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_unset() && self.phone.is_unset()
    }
}

/// `PATCH /me/password` body.
#[derive(Debug, Serialize)]
pub struct PasswordChange {
    #[serde(serialize_with = "crate::expose_secret")]
    pub current_password: SecretString,
    #[serde(serialize_with = "crate::expose_secret")]
    pub new_password: SecretString,
}

/// `POST /me/fcm-token` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FcmTokenRequest {
    pub fcm_token: String,
}
