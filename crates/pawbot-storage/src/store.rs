// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the PostStore and CatalogSource traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use pawbot_config::model::StorageConfig;
use pawbot_core::types::{BotText, BotUser, Cursor, FunnyPhoto, Location, PetType, PostCard, PostFilter};
use pawbot_core::{CatalogSource, PawbotError, PostStore};

use crate::database::Database;
use crate::queries;
use crate::queries::users::NewUser;

/// SQLite-backed post store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily opened on the first call
/// to [`SqliteStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: SqliteStore::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    pub fn database(&self) -> Result<&Database, PawbotError> {
        self.db.get().ok_or_else(|| PawbotError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    fn db(&self) -> Result<&Database, PawbotError> {
        self.database()
    }

    /// Open the database at the configured path and run migrations.
    pub async fn initialize(&self) -> Result<(), PawbotError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| PawbotError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    /// Checkpoint the WAL and release the connection handle.
    pub async fn close(&self) -> Result<(), PawbotError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("WAL checkpoint complete");
        }
        Ok(())
    }

    // --- User operations ---

    pub async fn register_user(&self, user: &NewUser) -> Result<bool, PawbotError> {
        queries::users::register_user(self.db()?, user).await
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<BotUser>, PawbotError> {
        queries::users::get_user(self.db()?, id).await
    }

    pub async fn set_photos_subscribed(
        &self,
        id: i64,
        subscribed: bool,
    ) -> Result<(), PawbotError> {
        queries::users::set_photos_subscribed(self.db()?, id, subscribed).await
    }

    pub async fn photo_subscriber_ids(&self) -> Result<Vec<i64>, PawbotError> {
        queries::users::photo_subscriber_ids(self.db()?).await
    }

    // --- Photo operations ---

    pub async fn insert_photo(
        &self,
        file_id: &str,
        uploaded_by: i64,
        caption: Option<&str>,
    ) -> Result<bool, PawbotError> {
        queries::photos::insert_photo(self.db()?, file_id, uploaded_by, caption).await
    }

    pub async fn random_approved_photo(&self) -> Result<Option<FunnyPhoto>, PawbotError> {
        queries::photos::random_approved_photo(self.db()?).await
    }
}

#[async_trait]
impl PostStore for SqliteStore {
    async fn select_post(
        &self,
        filter: &PostFilter,
        cursor: Option<Cursor>,
    ) -> Result<Option<PostCard>, PawbotError> {
        queries::posts::select_post(self.db()?, filter, cursor).await
    }

    async fn post_exists(
        &self,
        filter: &PostFilter,
        cursor: Option<Cursor>,
    ) -> Result<bool, PawbotError> {
        queries::posts::post_exists(self.db()?, filter, cursor).await
    }
}

#[async_trait]
impl CatalogSource for SqliteStore {
    async fn load_pet_types(&self) -> Result<Vec<PetType>, PawbotError> {
        queries::catalog::load_all_pet_types(self.db()?).await
    }

    async fn load_locations(&self) -> Result<Vec<Location>, PawbotError> {
        queries::catalog::load_all_locations(self.db()?).await
    }

    async fn load_bot_texts(&self) -> Result<Vec<BotText>, PawbotError> {
        queries::catalog::load_all_bot_texts(self.db()?).await
    }
}
