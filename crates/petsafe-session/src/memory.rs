// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-memory persistence, for server-side browser sessions.

use std::sync::Mutex;

use async_trait::async_trait;
use petsafe_core::{Credential, CredentialPersistence, PetsafeError};

/// Keeps the credential in memory; it vanishes with the value.
#[derive(Default)]
pub struct MemoryPersistence {
    slot: Mutex<Option<Credential>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_slot<T>(&self, f: impl FnOnce(&mut Option<Credential>) -> T) -> Result<T, PetsafeError> {
        self.slot
            .lock()
            .map(|mut slot| f(&mut slot))
            .map_err(|e| PetsafeError::Internal(format!("memory credential slot poisoned: {e}")))
    }
}

#[async_trait]
impl CredentialPersistence for MemoryPersistence {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load(&self) -> Result<Option<Credential>, PetsafeError> {
        self.with_slot(|slot| slot.clone())
    }

    async fn store(&self, credential: &Credential) -> Result<(), PetsafeError> {
        let credential = credential.clone();
        self.with_slot(|slot| *slot = Some(credential))
    }

    async fn erase(&self) -> Result<(), PetsafeError> {
        self.with_slot(|slot| *slot = None)
    }
}
