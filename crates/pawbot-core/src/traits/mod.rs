// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the browse engine and the storage gateway.

pub mod store;

pub use store::{CatalogSource, PostStore};
