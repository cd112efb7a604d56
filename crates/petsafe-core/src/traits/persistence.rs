// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable backing for the credential store.

use async_trait::async_trait;

use crate::error::PetsafeError;
use crate::types::Credential;

/// Where a credential store keeps its value between process runs or
/// between requests of one session.
///
/// Values are always read and written whole.
#[async_trait]
pub trait CredentialPersistence: Send + Sync + 'static {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Loads the persisted credential, if any.
    async fn load(&self) -> Result<Option<Credential>, PetsafeError>;

    /// Replaces the persisted credential.
    async fn store(&self, credential: &Credential) -> Result<(), PetsafeError>;

    /// Removes the persisted credential. Succeeds when nothing is stored.
    async fn erase(&self) -> Result<(), PetsafeError>;
}
