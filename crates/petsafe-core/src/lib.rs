// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the PetSafe client proxy.
//!
//! This crate provides the trait seams, error taxonomy, and credential types
//! shared by every other crate in the workspace. The transport and the
//! credential persistence backends are injected through the traits defined
//! here, never looked up globally.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ApiError, ErrorKind, PetsafeError};
pub use types::{Credential, HttpMethod, OutboundRequest, RawResponse, SessionId, UserSnapshot};

pub use traits::{CredentialPersistence, Transport};
