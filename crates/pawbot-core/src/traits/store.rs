// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage gateway traits consumed by the browse engine and catalog cache.

use async_trait::async_trait;

use crate::error::PawbotError;
use crate::types::{BotText, Cursor, Location, PetType, PostCard, PostFilter};

/// Read-only gateway for listing queries.
///
/// Implementations build the conjunctive predicate set described by the
/// filter, apply the cursor restriction and ordering when present, and
/// return at most the single nearest matching row. Zero rows is a normal
/// outcome (`Ok(None)`); only store failures are errors.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Fetch the nearest post satisfying the filter, relative to the
    /// cursor when one is given, else the smallest-id match.
    async fn select_post(
        &self,
        filter: &PostFilter,
        cursor: Option<Cursor>,
    ) -> Result<Option<PostCard>, PawbotError>;

    /// True iff `select_post` with this cursor would return a row.
    /// A pure existence probe; never fetches the row itself.
    async fn post_exists(
        &self,
        filter: &PostFilter,
        cursor: Option<Cursor>,
    ) -> Result<bool, PawbotError>;
}

/// Source of the slowly-changing reference data cached by the catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_pet_types(&self) -> Result<Vec<PetType>, PawbotError>;

    async fn load_locations(&self) -> Result<Vec<Location>, PawbotError>;

    async fn load_bot_texts(&self) -> Result<Vec<BotText>, PawbotError>;
}
