// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The credential store.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use petsafe_core::{Credential, CredentialPersistence, PetsafeError, UserSnapshot};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::memory::MemoryPersistence;

/// Holds at most one credential and mirrors it into a persistence backend.
///
/// Readers get an `Arc` snapshot and never block. Writers are serialized
/// and persist before publishing, so a credential visible to readers is
/// always one the backend has accepted.
pub struct CredentialStore {
    current: ArcSwapOption<Credential>,
    persistence: Arc<dyn CredentialPersistence>,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("backend", &self.persistence.name())
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}

impl CredentialStore {
    pub fn new(persistence: Arc<dyn CredentialPersistence>) -> Self {
        Self {
            current: ArcSwapOption::empty(),
            persistence,
            write_lock: Mutex::new(()),
        }
    }

    /// A store backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryPersistence::new()))
    }

    /// Load whatever the backend holds into memory.
    ///
    /// Called once at startup by the device instantiation.
    pub async fn restore(&self) -> Result<Option<Arc<Credential>>, PetsafeError> {
        let _guard = self.write_lock.lock().await;
        let loaded = self.persistence.load().await?.map(Arc::new);
        self.current.store(loaded.clone());
        match &loaded {
            Some(credential) => info!(
                backend = self.persistence.name(),
                user_id = credential.principal.id,
                "restored credential"
            ),
            None => debug!(backend = self.persistence.name(), "no stored credential"),
        }
        Ok(loaded)
    }

    /// Replace the held credential wholesale.
    pub async fn save(&self, credential: Credential) -> Result<(), PetsafeError> {
        let _guard = self.write_lock.lock().await;
        self.persistence.store(&credential).await?;
        info!(user_id = credential.principal.id, "credential saved");
        self.current.store(Some(Arc::new(credential)));
        Ok(())
    }

    /// Snapshot of the held credential.
    pub fn current(&self) -> Option<Arc<Credential>> {
        self.current.load_full()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.load().is_some()
    }

    /// Replace only the principal, keeping the tokens.
    ///
    /// Returns `false` (and changes nothing) when no credential is held.
    pub async fn update_principal(&self, principal: UserSnapshot) -> Result<bool, PetsafeError> {
        let _guard = self.write_lock.lock().await;
        let Some(existing) = self.current.load_full() else {
            return Ok(false);
        };
        let updated = existing.with_principal(principal);
        self.persistence.store(&updated).await?;
        self.current.store(Some(Arc::new(updated)));
        debug!("principal refreshed");
        Ok(true)
    }

    /// Drop the held credential. Safe to call when nothing is held.
    ///
    /// Readers stop seeing the credential before the backend is erased.
    pub async fn clear(&self) -> Result<(), PetsafeError> {
        let _guard = self.write_lock.lock().await;
        let previous = self.current.swap(None);
        self.persistence.erase().await?;
        if previous.is_some() {
            info!("credential cleared");
        }
        Ok(())
    }

    /// `"{token_type} {access_token}"`, or `None` when signed out.
    pub fn authorization_header(&self) -> Option<String> {
        self.current
            .load()
            .as_ref()
            .map(|credential| credential.authorization_header())
    }
}
