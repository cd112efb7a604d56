// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Security helpers for the PetSafe client proxy.
//!
//! Enforces HTTPS for remote upstream origins and scrubs access tokens out of
//! anything that is about to be logged.

pub mod redact;
pub mod tls;

pub use redact::{redact, RedactingWriter, SecretList};
pub use tls::{build_secure_client, is_localhost, validate_base_url};
