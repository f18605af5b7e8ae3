// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog reads: pet types, locations, and operator-editable texts.
//!
//! These tables change rarely; callers cache the result and re-read on
//! demand rather than hitting the database per update.

use std::str::FromStr;

use pawbot_core::types::{BotText, Location, PetType, TextKind};
use pawbot_core::PawbotError;

use crate::database::Database;

/// Load every pet type, keyboard order by id.
pub async fn load_all_pet_types(db: &Database) -> Result<Vec<PetType>, PawbotError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, emoji, button_text, always_listed
                 FROM pet_types ORDER BY id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(PetType {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    emoji: row.get(2)?,
                    button_text: row.get(3)?,
                    always_listed: row.get(4)?,
                })
            })?;
            let mut types = Vec::new();
            for row in rows {
                types.push(row?);
            }
            Ok(types)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Load every location, keyboard order by id.
pub async fn load_all_locations(db: &Database) -> Result<Vec<Location>, PawbotError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, button_text, display_on_keyboard
                 FROM locations ORDER BY id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(Location {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    button_text: row.get(2)?,
                    display_on_keyboard: row.get(3)?,
                })
            })?;
            let mut locations = Vec::new();
            for row in rows {
                locations.push(row?);
            }
            Ok(locations)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Load all operator texts, both message bodies and button labels.
pub async fn load_all_bot_texts(db: &Database) -> Result<Vec<BotText>, PawbotError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT id, name, kind, content FROM bot_texts")?;
            let rows = stmt.query_map([], |row| {
                let kind_raw: String = row.get(2)?;
                let kind = TextKind::from_str(&kind_raw).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        2,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
                Ok(BotText {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    kind,
                    value: row.get(3)?,
                })
            })?;
            let mut texts = Vec::new();
            for row in rows {
                texts.push(row?);
            }
            Ok(texts)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch(
                    "INSERT INTO pet_types (id, name, emoji, button_text, always_listed) VALUES
                         (1, 'dogs', '🐕', 'Dogs', 1),
                         (2, 'birds', '🦜', 'Birds', 0);
                     INSERT INTO locations (id, name, button_text, display_on_keyboard) VALUES
                         (1, 'City1', 'City One', 1),
                         (2, 'Remote', 'Remote', 0);
                     INSERT INTO bot_texts (name, kind, content) VALUES
                         ('greeting', 'message', 'Hello!'),
                         ('back', 'button', 'Back');",
                )?;
                Ok(())
            })
            .await
            .unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn loads_pet_types_in_id_order() {
        let (db, _dir) = setup_db().await;
        let types = load_all_pet_types(&db).await.unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].name, "dogs");
        assert!(types[0].always_listed);
        assert_eq!(types[1].name, "birds");
        assert!(!types[1].always_listed);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn loads_locations_with_keyboard_flag() {
        let (db, _dir) = setup_db().await;
        let locations = load_all_locations(&db).await.unwrap();
        assert_eq!(locations.len(), 2);
        assert!(locations[0].display_on_keyboard);
        assert!(!locations[1].display_on_keyboard);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn loads_texts_with_parsed_kinds() {
        let (db, _dir) = setup_db().await;
        let texts = load_all_bot_texts(&db).await.unwrap();
        assert_eq!(texts.len(), 2);
        let greeting = texts.iter().find(|t| t.name == "greeting").unwrap();
        assert_eq!(greeting.kind, TextKind::Message);
        assert_eq!(greeting.value, "Hello!");
        let back = texts.iter().find(|t| t.name == "back").unwrap();
        assert_eq!(back.kind, TextKind::Button);
        db.close().await.unwrap();
    }
}
