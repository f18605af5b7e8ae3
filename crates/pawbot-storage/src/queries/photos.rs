// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-submitted funny photos.
//!
//! Photos reference Telegram file ids only; no image bytes are stored.
//! Submissions land unapproved and become servable once an operator flips
//! the flag.

use pawbot_core::types::FunnyPhoto;
use pawbot_core::PawbotError;
use rusqlite::params;

use crate::database::Database;

/// Record a submitted photo. Returns `false` when the file id was already
/// known (duplicate forwards are common).
pub async fn insert_photo(
    db: &Database,
    file_id: &str,
    uploaded_by: i64,
    caption: Option<&str>,
) -> Result<bool, PawbotError> {
    let file_id = file_id.to_string();
    let caption = caption.map(|c| c.to_string());
    db.connection()
        .call(move |conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO funny_photos (file_id, uploaded_by, caption)
                 VALUES (?1, ?2, ?3)",
                params![file_id, uploaded_by, caption],
            )?;
            Ok(inserted > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mark a photo approved so it can be served.
pub async fn approve_photo(db: &Database, id: i64) -> Result<(), PawbotError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE funny_photos SET approved = 1 WHERE id = ?1",
                params![id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// A uniformly random approved photo, or `None` when the pool is empty.
pub async fn random_approved_photo(db: &Database) -> Result<Option<FunnyPhoto>, PawbotError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, file_id, uploaded_by, uploaded_at, approved, caption
                 FROM funny_photos WHERE approved = 1
                 ORDER BY RANDOM() LIMIT 1",
            )?;
            let result = stmt.query_row([], |row| {
                Ok(FunnyPhoto {
                    id: row.get(0)?,
                    file_id: row.get(1)?,
                    uploaded_by: row.get(2)?,
                    uploaded_at: row.get(3)?,
                    approved: row.get(4)?,
                    caption: row.get(5)?,
                })
            });
            match result {
                Ok(photo) => Ok(Some(photo)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
