// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./pawbot.toml` > `~/.config/pawbot/pawbot.toml` > `/etc/pawbot/pawbot.toml`
//! with environment variable overrides via `PAWBOT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PawbotConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pawbot/pawbot.toml` (system-wide)
/// 3. `~/.config/pawbot/pawbot.toml` (user XDG config)
/// 4. `./pawbot.toml` (local directory)
/// 5. `PAWBOT_*` environment variables
pub fn load_config() -> Result<PawbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PawbotConfig::default()))
        .merge(Toml::file("/etc/pawbot/pawbot.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("pawbot/pawbot.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("pawbot.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PawbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PawbotConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PawbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PawbotConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `PAWBOT_TELEGRAM_BOT_TOKEN` must map to
/// `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("PAWBOT_").map(|key| {
        // Figment hands the key in its original (uppercase) form with the
        // prefix stripped. Only the leading section name becomes a dot;
        // the rest of the key keeps its underscores, so
        // PAWBOT_TELEGRAM_BOT_TOKEN -> "telegram.bot_token".
        let key = key.as_str().to_ascii_lowercase();
        for section in ["bot", "telegram", "storage", "photos"] {
            if let Some(rest) = key
                .strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key.into()
    })
}
