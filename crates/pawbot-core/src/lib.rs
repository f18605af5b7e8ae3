// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Pawbot listings bot.
//!
//! Provides the domain types (categories, filters, cursors, post cards),
//! the shared error enum, and the storage traits implemented by the
//! SQLite gateway and consumed by the browse engine.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PawbotError;
pub use traits::{CatalogSource, PostStore};
pub use types::{
    BotText, BotUser, Category, Cursor, Direction, FunnyPhoto, Location, PetType, PostBody,
    PostCard, PostFilter, PostPage, TextKind,
};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn category_column_pairs_are_fixed() {
        assert_eq!(Category::NeedHome.text_column(), "need_home");
        assert_eq!(Category::NeedHome.visible_column(), "need_home_visible");
        assert_eq!(Category::NeedTemp.text_column(), "need_temp");
        assert_eq!(Category::NeedMoney.visible_column(), "need_money_visible");
        assert_eq!(Category::NeedOther.text_column(), "need_other");
    }

    #[test]
    fn category_symbols_round_trip() {
        for category in Category::iter() {
            let symbol = category.to_string();
            let parsed = Category::from_str(&symbol).expect("should parse back");
            assert_eq!(category, parsed);
        }
        assert_eq!(
            Category::from_str("need_home").unwrap(),
            Category::NeedHome
        );
    }

    #[test]
    fn unknown_category_symbol_is_rejected() {
        assert!(Category::from_str("need_food").is_err());
        assert!(Category::from_str("").is_err());
    }

    #[test]
    fn direction_symbols_round_trip() {
        assert_eq!(Direction::Before.to_string(), "<");
        assert_eq!(Direction::After.to_string(), ">");
        assert_eq!(Direction::from_str("<").unwrap(), Direction::Before);
        assert_eq!(Direction::from_str(">").unwrap(), Direction::After);
        assert!(Direction::from_str("=").is_err());
    }

    #[test]
    fn default_filter_is_unrestricted() {
        let filter = PostFilter::default();
        assert!(filter.category.is_none());
        assert!(filter.location.is_none());
        assert!(filter.pet_type.is_none());
    }

    #[test]
    fn error_variants_construct() {
        let _config = PawbotError::Config("test".into());
        let _storage = PawbotError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _channel = PawbotError::Channel {
            message: "test".into(),
            source: None,
        };
        let _filter = PawbotError::InvalidFilter("need_food".into());
        let _internal = PawbotError::Internal("test".into());
    }

    #[test]
    fn text_kind_parses_stored_symbols() {
        assert_eq!(TextKind::from_str("message").unwrap(), TextKind::Message);
        assert_eq!(TextKind::from_str("button").unwrap(), TextKind::Button);
        assert_eq!(TextKind::Button.to_string(), "button");
    }
}
