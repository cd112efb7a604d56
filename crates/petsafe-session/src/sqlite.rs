// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Device-local credential persistence in SQLite.
//!
//! A single row holds the whole credential as JSON. It is written and read
//! in one statement, so a reader never observes half of a credential.

use std::path::Path;

use async_trait::async_trait;
use petsafe_core::{Credential, CredentialPersistence, PetsafeError};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, warn};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS credential (
    slot INTEGER PRIMARY KEY CHECK (slot = 1),
    payload TEXT NOT NULL,
    saved_at TEXT NOT NULL
)";

/// SQLite-backed [`CredentialPersistence`].
pub struct SqlitePersistence {
    conn: tokio_rusqlite::Connection,
}

impl std::fmt::Debug for SqlitePersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlitePersistence").finish_non_exhaustive()
    }
}

impl SqlitePersistence {
    /// Open (creating if needed) the database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, PetsafeError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(PetsafeError::storage)?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(PetsafeError::storage)?;
        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))?;
            conn.execute(SCHEMA, [])?;
            Ok(())
        })
        .await
        .map_err(PetsafeError::storage)?;

        debug!(path = %path.display(), "credential database ready");
        Ok(Self { conn })
    }
}

#[async_trait]
impl CredentialPersistence for SqlitePersistence {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn load(&self) -> Result<Option<Credential>, PetsafeError> {
        let payload = self
            .conn
            .call(|conn| -> Result<Option<String>, rusqlite::Error> {
                conn.query_row("SELECT payload FROM credential WHERE slot = 1", [], |row| {
                    row.get(0)
                })
                .optional()
            })
            .await
            .map_err(PetsafeError::storage)?;

        let Some(payload) = payload else {
            return Ok(None);
        };
        match serde_json::from_str(&payload) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) => {
                // An unreadable row is treated as signed out.
                warn!(error = %e, "stored credential is unreadable; ignoring it");
                Ok(None)
            }
        }
    }

    async fn store(&self, credential: &Credential) -> Result<(), PetsafeError> {
        let payload = serde_json::to_string(credential).map_err(PetsafeError::storage)?;
        let saved_at = chrono::Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT OR REPLACE INTO credential (slot, payload, saved_at) VALUES (1, ?1, ?2)",
                    params![payload, saved_at],
                )?;
                Ok(())
            })
            .await
            .map_err(PetsafeError::storage)
    }

    async fn erase(&self) -> Result<(), PetsafeError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute("DELETE FROM credential", [])?;
                Ok(())
            })
            .await
            .map_err(PetsafeError::storage)
    }
}
