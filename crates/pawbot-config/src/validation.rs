// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and known log levels.

use crate::diagnostic::ConfigError;
use crate::model::PawbotConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PawbotConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.bot.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "bot.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.bot.log_level
            ),
        });
    }

    if let Some(token) = &config.telegram.bot_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "telegram.bot_token must not be empty when set".to_string(),
        });
    }

    if config.photos.upload_cooldown_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "photos.upload_cooldown_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = PawbotConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_rejected() {
        let mut config = PawbotConfig::default();
        config.storage.database_path = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| {
            matches!(e, ConfigError::Validation { message } if message.contains("database_path"))
        }));
    }

    #[test]
    fn unknown_log_level_rejected() {
        let mut config = PawbotConfig::default();
        config.bot.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn empty_token_rejected_when_set() {
        let mut config = PawbotConfig::default();
        config.telegram.bot_token = Some(String::new());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn zero_cooldown_rejected() {
        let mut config = PawbotConfig::default();
        config.photos.upload_cooldown_secs = 0;
        assert!(validate_config(&config).is_err());
    }
}
