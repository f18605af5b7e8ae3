// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Pawbot workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The four help-request kinds a post may expose.
///
/// A closed enumeration: each variant maps at compile time to a fixed pair
/// of post columns (text body, visibility flag). `Option<Category>` in a
/// filter means "no category restriction" when `None`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    NeedHome,
    NeedTemp,
    NeedMoney,
    NeedOther,
}

impl Category {
    /// The post column holding this category's free-text body.
    pub fn text_column(self) -> &'static str {
        match self {
            Category::NeedHome => "need_home",
            Category::NeedTemp => "need_temp",
            Category::NeedMoney => "need_money",
            Category::NeedOther => "need_other",
        }
    }

    /// The post column gating this category's visibility.
    pub fn visible_column(self) -> &'static str {
        match self {
            Category::NeedHome => "need_home_visible",
            Category::NeedTemp => "need_temp_visible",
            Category::NeedMoney => "need_money_visible",
            Category::NeedOther => "need_other_visible",
        }
    }
}

/// Pagination direction relative to a cursor post id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum Direction {
    /// Matches with a strictly smaller id, nearest first.
    #[strum(serialize = "<")]
    Before,
    /// Matches with a strictly larger id, nearest first.
    #[strum(serialize = ">")]
    After,
}

/// A pagination cursor: fetch the nearest match strictly before/after
/// the given post id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub post_id: i64,
    pub direction: Direction,
}

/// The conjunctive filter set for a listing query.
///
/// All present fields are ANDed together; the global `visible` predicate
/// is always applied on top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub category: Option<Category>,
    pub location: Option<i64>,
    pub pet_type: Option<i64>,
}

/// The text body of a returned post, shaped by the query's category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostBody {
    /// A category-restricted query projects only that category's text.
    /// `allow_other_location` is populated for [`Category::NeedHome`] only.
    Single {
        category: Category,
        text: String,
        allow_other_location: Option<bool>,
    },
    /// An unrestricted query projects all four bodies as stored.
    All {
        need_home: Option<String>,
        need_temp: Option<String>,
        need_money: Option<String>,
        need_other: Option<String>,
    },
}

/// A single post row joined with its pet type and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: i64,
    pub title: String,
    pub pet_type_name: String,
    pub pet_type_emoji: String,
    pub pet_type_button_text: String,
    pub location_name: String,
    pub location_button_text: String,
    pub body: PostBody,
}

/// A browse-engine page: one post plus pagination affordances relative
/// to that post's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPage {
    pub card: PostCard,
    pub has_prev: bool,
    pub has_next: bool,
}

/// An adoptable/help pet kind shown on selector keyboards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetType {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub button_text: String,
    /// When false, the type is hidden from selectors if it currently has
    /// no open post.
    pub always_listed: bool,
}

/// A shelter location posts are attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub button_text: String,
    /// UI visibility only; never affects query filtering.
    pub display_on_keyboard: bool,
}

/// Whether a bot text row is a message body or a button label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum TextKind {
    Message,
    Button,
}

/// An operator-editable UI string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotText {
    pub id: i64,
    pub name: String,
    pub kind: TextKind,
    pub value: String,
}

/// A registered Telegram user.
///
/// `id` is the Telegram user id, not an autoincrement key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotUser {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    pub registered_at: String,
    pub app_version: Option<String>,
    pub photos_subscribed: bool,
}

/// A user-submitted funny photo, referenced by Telegram file id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunnyPhoto {
    pub id: i64,
    pub file_id: String,
    pub uploaded_by: i64,
    pub uploaded_at: String,
    pub approved: bool,
    pub caption: Option<String>,
}
