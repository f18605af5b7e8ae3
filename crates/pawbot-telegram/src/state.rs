// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user dialogue state.
//!
//! The cursor never lives here; it travels inside callback payloads so a
//! user can tap buttons on an old post view without confusing the state
//! machine.

use pawbot_core::types::{Category, PostFilter};
use teloxide::types::MessageId;

/// Which screen the user is on.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum State {
    /// Main menu, also the post-/start state.
    #[default]
    Start,
    /// Browsing posts with the filters held in the view.
    PostView(View),
    /// Picking a filter value from an inline keyboard.
    Filter(FilterDialog),
    About,
    EasterEgg,
}

/// Active browse filters plus the id of the message showing the post,
/// so pagination edits in place instead of flooding the chat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct View {
    pub category: Option<Category>,
    pub location: Option<i64>,
    pub pet_type: Option<i64>,
    pub view_message_id: Option<MessageId>,
}

impl View {
    pub fn for_category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Default::default()
        }
    }

    pub fn filter(&self) -> PostFilter {
        PostFilter {
            category: self.category,
            location: self.location,
            pet_type: self.pet_type,
        }
    }
}

/// Which filter the inline selector is currently choosing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterParam {
    Location,
    PetType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterDialog {
    pub view: View,
    pub param: FilterParam,
}
