// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the PetSafe upstream API.
//!
//! Inbound bodies are unwrapped from the `{"data": …}` [`Envelope`]; unknown
//! fields are ignored everywhere. Outbound request structs omit every field
//! that was not set, and fields the upstream can clear use the tri-state
//! [`Patch`].

pub mod alert;
pub mod auth;
pub mod device;
pub mod envelope;
pub mod geofence;
pub mod patch;
pub mod pet;
pub mod profile;

pub use alert::{Alert, AlertCount, StatusMessage};
pub use auth::{LoginRequest, LoginResponse, RegisterRequest, RegisteredUser, TokenGrant};
pub use device::{Device, DeviceRequest, Location};
pub use envelope::Envelope;
pub use geofence::{Geofence, GeofenceRequest};
pub use patch::Patch;
pub use pet::{Pet, PetRequest};
pub use profile::{FcmTokenRequest, PasswordChange, ProfileUpdate};

/// Serialize a secret as a plain string. Only used while building a request body.
pub(crate) fn expose_secret<S>(secret: &secrecy::SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use secrecy::ExposeSecret;
    serializer.serialize_str(secret.expose_secret())
}
