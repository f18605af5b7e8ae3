// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filtered single-post selection and neighbor probes.
//!
//! All predicates are conjunctive. The global `visible` flag is always
//! applied; a category filter additionally requires a non-empty text body
//! and the per-category visibility flag. A cursor narrows to ids strictly
//! before/after the anchor, nearest first.

use pawbot_core::types::{Category, Cursor, Direction, PostBody, PostCard, PostFilter};
use pawbot_core::PawbotError;
use rusqlite::params_from_iter;

use crate::database::Database;

const CARD_COLUMNS: &str = "p.id, p.title, pt.name, pt.emoji, pt.button_text, \
     l.name, l.button_text, \
     p.need_home, p.allow_other_location, p.need_temp, p.need_money, p.need_other";

const CARD_FROM: &str = "posts p \
     JOIN pet_types pt ON pt.id = p.pet_type_id \
     JOIN locations l ON l.id = p.location_id";

/// Assemble the WHERE clause and its bind parameters for a filter set.
///
/// Category column names come from the closed [`Category`] enum, never from
/// caller input, so interpolating them into SQL is safe. Every bound value
/// is an integer id.
fn build_predicates(filter: &PostFilter, cursor: Option<Cursor>) -> (String, Vec<i64>) {
    let mut clauses = vec!["p.visible = 1".to_string()];
    let mut params: Vec<i64> = Vec::new();

    if let Some(category) = filter.category {
        let text = category.text_column();
        let visible = category.visible_column();
        clauses.push(format!(
            "p.{text} IS NOT NULL AND p.{text} != '' AND p.{visible} = 1"
        ));
    }
    if let Some(location_id) = filter.location {
        params.push(location_id);
        clauses.push(format!("p.location_id = ?{}", params.len()));
    }
    if let Some(pet_type_id) = filter.pet_type {
        params.push(pet_type_id);
        clauses.push(format!("p.pet_type_id = ?{}", params.len()));
    }
    if let Some(cursor) = cursor {
        params.push(cursor.post_id);
        let op = match cursor.direction {
            Direction::Before => "<",
            Direction::After => ">",
        };
        clauses.push(format!("p.id {op} ?{}", params.len()));
    }

    (clauses.join(" AND "), params)
}

/// Nearest-first ordering relative to the cursor anchor. Without a cursor
/// the oldest post (smallest id) comes first.
fn order_clause(cursor: Option<Cursor>) -> &'static str {
    match cursor.map(|c| c.direction) {
        Some(Direction::Before) => "ORDER BY p.id DESC",
        Some(Direction::After) | None => "ORDER BY p.id ASC",
    }
}

fn map_card_row(row: &rusqlite::Row<'_>, category: Option<Category>) -> rusqlite::Result<PostCard> {
    let body = match category {
        Some(category) => {
            let text: Option<String> = match category {
                Category::NeedHome => row.get(7)?,
                Category::NeedTemp => row.get(9)?,
                Category::NeedMoney => row.get(10)?,
                Category::NeedOther => row.get(11)?,
            };
            let allow_other_location = match category {
                Category::NeedHome => row.get::<_, Option<bool>>(8)?,
                _ => None,
            };
            PostBody::Single {
                category,
                // The predicate guarantees a non-empty body for the
                // filtered category.
                text: text.unwrap_or_default(),
                allow_other_location,
            }
        }
        None => PostBody::All {
            need_home: row.get(7)?,
            need_temp: row.get(9)?,
            need_money: row.get(10)?,
            need_other: row.get(11)?,
        },
    };
    Ok(PostCard {
        id: row.get(0)?,
        title: row.get(1)?,
        pet_type_name: row.get(2)?,
        pet_type_emoji: row.get(3)?,
        pet_type_button_text: row.get(4)?,
        location_name: row.get(5)?,
        location_button_text: row.get(6)?,
        body,
    })
}

/// Fetch the single nearest post matching the filter, or `None` when no
/// row matches.
pub async fn select_post(
    db: &Database,
    filter: &PostFilter,
    cursor: Option<Cursor>,
) -> Result<Option<PostCard>, PawbotError> {
    let filter = *filter;
    let (where_clause, params) = build_predicates(&filter, cursor);
    let order = order_clause(cursor);
    let sql =
        format!("SELECT {CARD_COLUMNS} FROM {CARD_FROM} WHERE {where_clause} {order} LIMIT 1");

    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let result = stmt.query_row(params_from_iter(params), |row| {
                map_card_row(row, filter.category)
            });
            match result {
                Ok(card) => Ok(Some(card)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Existence probe with the same predicate semantics as [`select_post`].
pub async fn post_exists(
    db: &Database,
    filter: &PostFilter,
    cursor: Option<Cursor>,
) -> Result<bool, PawbotError> {
    let (where_clause, params) = build_predicates(filter, cursor);
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {CARD_FROM} WHERE {where_clause})");

    db.connection()
        .call(move |conn| {
            let exists: bool =
                conn.query_row(&sql, params_from_iter(params), |row| row.get(0))?;
            Ok(exists)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
