// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Browsing engine and catalog cache for the Pawbot listings bot.
//!
//! Sits between the Telegram conversation layer and the storage layer:
//! [`browse::BrowseEngine`] turns filters and cursors into rendered-ready
//! pages, and [`catalog::Catalog`] caches the reference tables handlers
//! read on every update.

pub mod browse;
pub mod catalog;

pub use browse::BrowseEngine;
pub use catalog::{Catalog, CatalogSnapshot, Texts};
