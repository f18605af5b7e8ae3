// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Pawbot listings bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Pawbot configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PawbotConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Funny-photo upload settings.
    #[serde(default)]
    pub photos: PhotosConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name of the bot, used in logs only.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_bot_name() -> String {
    "pawbot".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required to serve.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Chat id notified on startup and used as the default admin target.
    #[serde(default)]
    pub admin_chat_id: Option<i64>,

    /// Chat id that user-submitted funny photos are forwarded to for review.
    /// `None` disables photo uploads.
    #[serde(default)]
    pub photo_stock_chat_id: Option<i64>,

    /// Gate for the easter-egg screen (funny photos).
    #[serde(default)]
    pub easter_egg_enabled: bool,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL journal mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    "pawbot.db".to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Funny-photo upload configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PhotosConfig {
    /// Minimum seconds between photo uploads from the same user.
    #[serde(default = "default_upload_cooldown_secs")]
    pub upload_cooldown_secs: u64,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            upload_cooldown_secs: default_upload_cooldown_secs(),
        }
    }
}

fn default_upload_cooldown_secs() -> u64 {
    60
}
