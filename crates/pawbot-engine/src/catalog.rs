// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-through cache for slowly-changing reference data.
//!
//! Pet types, locations, and operator texts are loaded into an immutable
//! snapshot that handlers read lock-free via [`arc_swap`]. Operators edit
//! the tables out of band and trigger [`Catalog::refresh`] to publish a
//! new snapshot; in-flight handlers keep the one they started with.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use pawbot_core::types::{BotText, Location, PetType, PostFilter, TextKind};
use pawbot_core::{CatalogSource, PawbotError, PostStore};
use tracing::{debug, warn};

/// Operator-editable UI strings, split by kind.
#[derive(Debug, Default)]
pub struct Texts {
    messages: HashMap<String, String>,
    buttons: HashMap<String, String>,
}

impl Texts {
    pub fn from_rows(rows: Vec<BotText>) -> Self {
        let mut texts = Texts::default();
        for row in rows {
            let map = match row.kind {
                TextKind::Message => &mut texts.messages,
                TextKind::Button => &mut texts.buttons,
            };
            map.insert(row.name, row.value);
        }
        texts
    }

    /// A message body by name. Unknown names render as a bracketed
    /// placeholder so a missing row is visible in chat instead of
    /// crashing the handler.
    pub fn message(&self, name: &str) -> String {
        match self.messages.get(name) {
            Some(value) => value.clone(),
            None => {
                warn!(name, kind = "message", "missing bot text");
                format!("[{name}]")
            }
        }
    }

    /// A button label by name, with the same placeholder fallback.
    pub fn button(&self, name: &str) -> String {
        match self.buttons.get(name) {
            Some(value) => value.clone(),
            None => {
                warn!(name, kind = "button", "missing bot text");
                format!("[{name}]")
            }
        }
    }
}

/// One immutable generation of catalog data.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    /// Pet types eligible for selector keyboards. Types with
    /// `always_listed = false` and no open post are filtered out at
    /// refresh time.
    pub pet_types: Vec<PetType>,
    pub locations: Vec<Location>,
    pub texts: Texts,
}

impl CatalogSnapshot {
    pub fn pet_type(&self, id: i64) -> Option<&PetType> {
        self.pet_types.iter().find(|pt| pt.id == id)
    }

    pub fn location(&self, id: i64) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    /// Match a reply-keyboard press back to its pet type.
    pub fn pet_type_by_button(&self, text: &str) -> Option<&PetType> {
        self.pet_types.iter().find(|pt| pt.button_text == text)
    }

    /// Match free text or a keyboard press back to a location.
    pub fn location_by_button(&self, text: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.button_text == text)
    }

    /// Locations shown on selector keyboards.
    pub fn keyboard_locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(|l| l.display_on_keyboard)
    }
}

/// Lock-free published catalog.
pub struct Catalog {
    inner: ArcSwap<CatalogSnapshot>,
}

impl Catalog {
    /// An empty catalog. Served until the first refresh completes.
    pub fn empty() -> Self {
        Self {
            inner: ArcSwap::from_pointee(CatalogSnapshot::default()),
        }
    }

    /// The current snapshot. Cheap; safe to call per update.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.inner.load_full()
    }

    /// Reload all reference tables and publish a new snapshot.
    ///
    /// Conditionally-listed pet types are kept only while they have at
    /// least one open post. A failed refresh leaves the previous
    /// snapshot in place.
    pub async fn refresh<S>(&self, source: &S) -> Result<(), PawbotError>
    where
        S: CatalogSource + PostStore,
    {
        let mut pet_types = Vec::new();
        for pet_type in source.load_pet_types().await? {
            let listed = pet_type.always_listed || {
                let filter = PostFilter {
                    pet_type: Some(pet_type.id),
                    ..Default::default()
                };
                source.post_exists(&filter, None).await?
            };
            if listed {
                pet_types.push(pet_type);
            }
        }
        let locations = source.load_locations().await?;
        let texts = Texts::from_rows(source.load_bot_texts().await?);

        debug!(
            pet_types = pet_types.len(),
            locations = locations.len(),
            "catalog refreshed"
        );
        self.inner.store(Arc::new(CatalogSnapshot {
            pet_types,
            locations,
            texts,
        }));
        Ok(())
    }
}
