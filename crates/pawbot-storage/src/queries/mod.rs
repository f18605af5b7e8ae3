// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for the listings database.

pub mod catalog;
pub mod photos;
pub mod posts;
pub mod users;
