// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply and inline keyboard construction.
//!
//! Reply keyboards carry catalog button texts; handlers match presses by
//! comparing the incoming text against the same catalog snapshot, so the
//! labels stay operator-editable.

use pawbot_core::types::{Category, PostPage};
use pawbot_engine::CatalogSnapshot;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::callback::CallbackData;
use crate::state::View;
use pawbot_core::types::Direction;

fn reply_keyboard(rows: Vec<Vec<KeyboardButton>>) -> KeyboardMarkup {
    let mut markup = KeyboardMarkup::new(rows);
    markup.resize_keyboard = true;
    markup
}

fn button(snapshot: &CatalogSnapshot, name: &str) -> KeyboardButton {
    KeyboardButton::new(snapshot.texts.button(name))
}

/// The main menu.
pub fn start_keyboard(snapshot: &CatalogSnapshot, easter_egg: bool) -> KeyboardMarkup {
    let mut rows = vec![
        vec![button(snapshot, "need_home")],
        vec![button(snapshot, "help")],
        vec![button(snapshot, "volunteers"), button(snapshot, "about")],
    ];
    if easter_egg {
        rows.push(vec![button(snapshot, "easter_egg")]);
    }
    reply_keyboard(rows)
}

/// Help-category selector: the three non-adoption categories.
pub fn help_keyboard(snapshot: &CatalogSnapshot) -> KeyboardMarkup {
    reply_keyboard(vec![
        vec![button(snapshot, "need_money")],
        vec![button(snapshot, "need_temp")],
        vec![button(snapshot, "need_other")],
        vec![button(snapshot, "support_us")],
        vec![button(snapshot, "back")],
    ])
}

/// Pet-type selector for adoption browsing. One row per type.
pub fn pet_type_keyboard(snapshot: &CatalogSnapshot) -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = snapshot
        .pet_types
        .iter()
        .map(|pt| vec![KeyboardButton::new(pt.button_text.clone())])
        .collect();
    rows.push(vec![button(snapshot, "back")]);
    reply_keyboard(rows)
}

/// Just a back button; used on the about and easter-egg screens.
pub fn back_keyboard(snapshot: &CatalogSnapshot) -> KeyboardMarkup {
    reply_keyboard(vec![vec![button(snapshot, "back")]])
}

pub fn easter_egg_keyboard(snapshot: &CatalogSnapshot) -> KeyboardMarkup {
    reply_keyboard(vec![
        vec![button(snapshot, "get_pic")],
        vec![button(snapshot, "back")],
    ])
}

/// Inline keyboard under a post view: prev/next when the neighbor
/// exists, then the filter openers. The pet-type filter is hidden for
/// adoption browsing, where the type was already chosen up front.
pub fn post_view_keyboard(
    snapshot: &CatalogSnapshot,
    view: &View,
    page: &PostPage,
) -> InlineKeyboardMarkup {
    let filter = view.filter();
    let mut nav_row = Vec::new();
    if page.has_prev {
        nav_row.push(InlineKeyboardButton::callback(
            snapshot.texts.button("prev"),
            CallbackData::nav(Direction::Before, &filter, page.card.id).to_string(),
        ));
    }
    if page.has_next {
        nav_row.push(InlineKeyboardButton::callback(
            snapshot.texts.button("next"),
            CallbackData::nav(Direction::After, &filter, page.card.id).to_string(),
        ));
    }

    let mut rows = Vec::new();
    if !nav_row.is_empty() {
        rows.push(nav_row);
    }
    rows.push(vec![InlineKeyboardButton::callback(
        snapshot.texts.button("filter_location"),
        CallbackData::OpenLocationFilter.to_string(),
    )]);
    if view.category != Some(Category::NeedHome) {
        rows.push(vec![InlineKeyboardButton::callback(
            snapshot.texts.button("filter_pet_type"),
            CallbackData::OpenPetTypeFilter.to_string(),
        )]);
    }
    InlineKeyboardMarkup::new(rows)
}

/// Location picker: "any" plus every keyboard-visible location.
pub fn location_filter_keyboard(snapshot: &CatalogSnapshot) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![InlineKeyboardButton::callback(
        snapshot.texts.button("any_location"),
        CallbackData::SetLocation(None).to_string(),
    )]];
    for location in snapshot.keyboard_locations() {
        rows.push(vec![InlineKeyboardButton::callback(
            location.button_text.clone(),
            CallbackData::SetLocation(Some(location.id)).to_string(),
        )]);
    }
    InlineKeyboardMarkup::new(rows)
}

/// Pet-type picker: "any" plus every listed type.
pub fn pet_type_filter_keyboard(snapshot: &CatalogSnapshot) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![InlineKeyboardButton::callback(
        snapshot.texts.button("any_pet_type"),
        CallbackData::SetPetType(None).to_string(),
    )]];
    for pet_type in &snapshot.pet_types {
        rows.push(vec![InlineKeyboardButton::callback(
            pet_type.button_text.clone(),
            CallbackData::SetPetType(Some(pet_type.id)).to_string(),
        )]);
    }
    InlineKeyboardMarkup::new(rows)
}

/// Subscribe/unsubscribe toggle under a served funny photo.
pub fn photo_subscription_keyboard(
    snapshot: &CatalogSnapshot,
    subscribed: bool,
) -> InlineKeyboardMarkup {
    let (label, data) = if subscribed {
        ("unsub_pics", CallbackData::SubscribePhotos(false))
    } else {
        ("sub_pics", CallbackData::SubscribePhotos(true))
    };
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        snapshot.texts.button(label),
        data.to_string(),
    )]])
}
