// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pawbot serve` command implementation.
//!
//! Opens the SQLite store, loads the catalog snapshot, and runs the
//! teloxide dispatcher until shutdown.

use std::sync::Arc;
use std::time::Duration;

use pawbot_config::model::PawbotConfig;
use pawbot_core::PawbotError;
use pawbot_engine::{BrowseEngine, Catalog};
use pawbot_storage::SqliteStore;
use pawbot_telegram::handlers::BotContext;
use pawbot_telegram::limiter::UploadLimiter;
use teloxide::prelude::*;
use tracing::{info, warn};

/// How often the catalog snapshot is rebuilt from the database. Posts
/// themselves are always queried live; this only affects selectors and
/// bot texts edited out of band.
const CATALOG_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Runs the `pawbot serve` command.
pub async fn run_serve(config: PawbotConfig) -> Result<(), PawbotError> {
    init_tracing(&config.bot.log_level);

    info!(bot = %config.bot.name, "starting pawbot serve");

    let Some(token) = config.telegram.bot_token.clone() else {
        return Err(PawbotError::Config(
            "telegram.bot_token is required to serve".to_string(),
        ));
    };

    // Open storage and run migrations.
    let storage = SqliteStore::new(config.storage.clone());
    storage.initialize().await?;
    let engine = BrowseEngine::new(storage);

    // Load the initial catalog snapshot.
    let catalog = Catalog::empty();
    catalog.refresh(engine.store()).await?;

    let bot = Bot::new(token);

    let ctx = Arc::new(BotContext {
        engine,
        catalog,
        limiter: UploadLimiter::new(Duration::from_secs(config.photos.upload_cooldown_secs)),
        config,
    });

    // Keep selectors and texts in sync with out-of-band edits.
    let refresher = {
        let ctx = Arc::clone(&ctx);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CATALOG_REFRESH_INTERVAL);
            interval.tick().await; // discard the immediate first tick
            loop {
                interval.tick().await;
                if let Err(e) = ctx.catalog.refresh(ctx.engine.store()).await {
                    warn!(error = %e, "catalog refresh failed, keeping old snapshot");
                }
            }
        })
    };

    // Tell the admin chat we are up, when one is configured.
    if let Some(admin_chat_id) = ctx.config.telegram.admin_chat_id {
        let startup = format!("pawbot {} started", env!("CARGO_PKG_VERSION"));
        if let Err(e) = bot.send_message(ChatId(admin_chat_id), startup).await {
            warn!(error = %e, "failed to notify admin chat on startup");
        }
    }

    info!("pawbot is running, press Ctrl-C to stop");
    pawbot_telegram::run(bot, Arc::clone(&ctx)).await;

    refresher.abort();
    ctx.engine.store().close().await?;
    info!("pawbot stopped");
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pawbot={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
