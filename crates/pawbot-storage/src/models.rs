// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `pawbot-core::types` for use across
//! the store trait boundaries. This module re-exports them for convenience
//! within the storage crate.

pub use pawbot_core::types::{
    BotText, BotUser, Cursor, Direction, FunnyPhoto, Location, PetType, PostBody, PostCard,
    PostFilter, TextKind,
};
