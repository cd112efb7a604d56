// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential storage for the PetSafe client proxy.
//!
//! [`CredentialStore`] holds the one active credential of a principal (the
//! device user, or one browser session). Reads are lock-free snapshots;
//! writes go through a [`CredentialPersistence`](petsafe_core::CredentialPersistence)
//! backend first:
//!
//! - [`SqlitePersistence`] keeps the credential across restarts on a device.
//! - [`MemoryPersistence`] lives and dies with a server-side session.
//!
//! [`SessionRegistry`] maps browser sessions to their stores.

pub mod memory;
pub mod registry;
pub mod sqlite;
pub mod store;

pub use memory::MemoryPersistence;
pub use registry::SessionRegistry;
pub use sqlite::SqlitePersistence;
pub use store::CredentialStore;
