// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated client for the PetSafe upstream API.
//!
//! Control flow for every call:
//!
//! ```text
//! caller -> PetsafeClient (reads CredentialStore) -> Transport
//!        <- classify / decode <- RawResponse
//! ```
//!
//! Only [`AuthManager`] writes a fresh credential into the store; profile
//! reads refresh the cached principal and nothing else.

pub mod auth;
pub mod classify;
pub mod client;
pub mod notify;
pub mod request;
pub mod resources;
pub mod transport;

pub use auth::AuthManager;
pub use client::PetsafeClient;
pub use notify::NotificationRegistrar;
pub use request::{ApiRequest, AuthMode};
pub use transport::HttpTransport;
