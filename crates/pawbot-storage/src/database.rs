// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use pawbot_core::PawbotError;
use tokio_rusqlite::Connection;

use crate::migrations::run_migrations;

/// Handle to the single SQLite connection the process uses.
///
/// Cheap to clone; all clones share the same background connection thread.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if necessary) the database at `path`, apply PRAGMAs,
    /// and run any pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, PawbotError> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| PawbotError::Storage {
                source: Box::new(e),
            })?;

        conn.call(move |c| -> Result<(), rusqlite::Error> {
            if wal_mode {
                c.pragma_update(None, "journal_mode", "WAL")?;
                c.pragma_update(None, "synchronous", "NORMAL")?;
            }
            c.pragma_update(None, "foreign_keys", "ON")?;
            c.pragma_update(None, "busy_timeout", 5000)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        let db = Self { conn };
        db.migrate().await?;
        Ok(db)
    }

    /// Open an in-memory database. Used by tests.
    pub async fn open_in_memory() -> Result<Self, PawbotError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| PawbotError::Storage {
                source: Box::new(e),
            })?;
        conn.call(|c| -> Result<(), rusqlite::Error> {
            c.pragma_update(None, "foreign_keys", "ON")?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
        let db = Self { conn };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<(), PawbotError> {
        self.conn
            .call(|c| run_migrations(c))
            .await
            .map_err(|e| PawbotError::Storage {
                source: format!("{e}").into(),
            })
    }

    /// The shared connection handle for query modules.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(&self) -> Result<(), PawbotError> {
        self.conn
            .call(|c| -> Result<(), rusqlite::Error> {
                c.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

/// Map tokio-rusqlite's error into the crate-wide storage error.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> PawbotError {
    PawbotError::Storage {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();

        let tables: Vec<String> = db
            .connection()
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                )?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                let mut names = Vec::new();
                for row in rows {
                    names.push(row?);
                }
                Ok(names)
            })
            .await
            .unwrap();

        for expected in [
            "posts",
            "pet_types",
            "locations",
            "bot_users",
            "funny_photos",
            "bot_texts",
        ] {
            assert!(tables.iter().any(|t| t == expected), "missing {expected}");
        }
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();
        db.close().await.unwrap();
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();
        db.close().await.unwrap();
    }
}
