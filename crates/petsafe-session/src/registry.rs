// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One credential store per browser session.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use petsafe_core::{PetsafeError, SessionId};
use tokio::time::Instant;
use tracing::debug;

use crate::store::CredentialStore;

#[derive(Debug)]
struct SessionEntry {
    store: Arc<CredentialStore>,
    last_seen: Instant,
}

impl SessionEntry {
    fn new(store: Arc<CredentialStore>) -> Self {
        Self {
            store,
            last_seen: Instant::now(),
        }
    }
}

/// Maps session identifiers to memory-backed [`CredentialStore`]s.
///
/// Stores are independent: signing in or out of one session never touches
/// another. With an idle timeout, a session unused for that long is gone:
/// lookups no longer find it and [`evict_idle`](Self::evict_idle) clears it.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, SessionEntry>,
    idle_timeout: Option<Duration>,
}

impl SessionRegistry {
    /// Registry whose sessions never expire on their own.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_timeout: Some(idle_timeout),
        }
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout
    }

    fn is_idle(&self, entry: &SessionEntry, now: Instant) -> bool {
        self.idle_timeout
            .is_some_and(|timeout| now.duration_since(entry.last_seen) >= timeout)
    }

    /// Store for `id`, creating an empty one on first use or after expiry.
    pub fn get_or_create(&self, id: &SessionId) -> Arc<CredentialStore> {
        let now = Instant::now();
        let mut entry = self.sessions.entry(id.clone()).or_insert_with(|| {
            debug!(session = %id.as_str(), "new session store");
            SessionEntry::new(Arc::new(CredentialStore::in_memory()))
        });
        if self.is_idle(&entry, now) {
            debug!(session = %id.as_str(), "idle session replaced");
            entry.store = Arc::new(CredentialStore::in_memory());
        }
        entry.last_seen = now;
        entry.store.clone()
    }

    /// Register an already populated store under `id`, replacing any previous one.
    pub fn insert(&self, id: SessionId, store: Arc<CredentialStore>) {
        debug!(session = %id.as_str(), "session store registered");
        self.sessions.insert(id, SessionEntry::new(store));
    }

    /// Store for `id`, marking the session as used. An idle session is
    /// dropped instead and reported as unknown.
    pub fn get(&self, id: &SessionId) -> Option<Arc<CredentialStore>> {
        let now = Instant::now();
        {
            let mut entry = self.sessions.get_mut(id)?;
            if !self.is_idle(&entry, now) {
                entry.last_seen = now;
                return Some(entry.store.clone());
            }
        }
        if self
            .sessions
            .remove_if(id, |_, entry| self.is_idle(entry, now))
            .is_some()
        {
            debug!(session = %id.as_str(), "idle session dropped");
        }
        None
    }

    /// Clear and forget the store for `id`. Unknown ids are ignored.
    pub async fn invalidate(&self, id: &SessionId) -> Result<(), PetsafeError> {
        if let Some((_, entry)) = self.sessions.remove(id) {
            entry.store.clear().await?;
            debug!(session = %id.as_str(), "session store destroyed");
        }
        Ok(())
    }

    /// Clear and forget every session idle for at least the timeout.
    ///
    /// Returns how many were evicted. A no-op without an idle timeout.
    pub async fn evict_idle(&self) -> Result<usize, PetsafeError> {
        if self.idle_timeout.is_none() {
            return Ok(0);
        }
        let now = Instant::now();
        let idle: Vec<SessionId> = self
            .sessions
            .iter()
            .filter(|entry| self.is_idle(entry.value(), now))
            .map(|entry| entry.key().clone())
            .collect();

        let mut evicted = 0;
        for id in idle {
            // Used again since the scan: keep it.
            let Some((_, entry)) = self.sessions.remove_if(&id, |_, entry| self.is_idle(entry, now))
            else {
                continue;
            };
            entry.store.clear().await?;
            evicted += 1;
        }
        if evicted > 0 {
            debug!(evicted, "idle sessions evicted");
        }
        Ok(evicted)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
