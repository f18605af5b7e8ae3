// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared across the Pawbot workspace.

use thiserror::Error;

/// The primary error type used across the storage gateway, browse engine,
/// and Telegram layer.
///
/// "No matching post" is NOT an error -- queries communicate it as
/// `Ok(None)`. Storage failures always surface as [`PawbotError::Storage`]
/// and are never swallowed into an empty result.
#[derive(Debug, Error)]
pub enum PawbotError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (connection, migration, query execution).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Telegram channel errors (send/edit/delete failure, malformed update).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A filter symbol that does not name a known category or direction.
    /// Rejected before any query is issued.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
