// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bot user registration and photo-subscription flags.

use pawbot_core::types::BotUser;
use pawbot_core::PawbotError;
use rusqlite::params;

use crate::database::Database;

/// Details captured from Telegram on first contact.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    pub app_version: Option<String>,
}

/// Register a user if unseen. Returns `true` when a new row was created.
///
/// Re-registration is a no-op so /start is safe to repeat.
pub async fn register_user(db: &Database, user: &NewUser) -> Result<bool, PawbotError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO bot_users
                     (id, username, first_name, last_name, language_code, app_version)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    user.id,
                    user.username,
                    user.first_name,
                    user.last_name,
                    user.language_code,
                    user.app_version,
                ],
            )?;
            Ok(inserted > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a user by Telegram id.
pub async fn get_user(db: &Database, id: i64) -> Result<Option<BotUser>, PawbotError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, first_name, last_name, language_code,
                        registered_at, app_version, photos_subscribed
                 FROM bot_users WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], |row| {
                Ok(BotUser {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    first_name: row.get(2)?,
                    last_name: row.get(3)?,
                    language_code: row.get(4)?,
                    registered_at: row.get(5)?,
                    app_version: row.get(6)?,
                    photos_subscribed: row.get(7)?,
                })
            });
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Flip the funny-photo subscription flag.
pub async fn set_photos_subscribed(
    db: &Database,
    id: i64,
    subscribed: bool,
) -> Result<(), PawbotError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE bot_users SET photos_subscribed = ?1 WHERE id = ?2",
                params![subscribed, id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Telegram ids of every user subscribed to photo drops.
pub async fn photo_subscriber_ids(db: &Database) -> Result<Vec<i64>, PawbotError> {
    db.connection()
        .call(|conn| {
            let mut stmt =
                conn.prepare("SELECT id FROM bot_users WHERE photos_subscribed = 1 ORDER BY id")?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            let mut ids = Vec::new();
            for row in rows {
                ids.push(row?);
            }
            Ok(ids)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
