// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTML rendering of post views and zero-result notices.
//!
//! All user-visible strings come from the catalog's `bot_texts` rows;
//! operators edit copy without a redeploy. Templates use positional `{}`
//! placeholders filled left to right.

use pawbot_core::types::{Category, PostBody, PostCard, PostFilter};
use pawbot_engine::CatalogSnapshot;

/// Escape the three characters Telegram's HTML parse mode reserves.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Fill positional `{}` placeholders left to right. Extra placeholders
/// are left as-is so a miscounted template stays visible in chat.
pub fn fill(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for arg in args {
        if let Some(pos) = out.find("{}") {
            out.replace_range(pos..pos + 2, arg);
        }
    }
    out
}

/// Render one post card as Telegram HTML.
pub fn render_post(snapshot: &CatalogSnapshot, card: &PostCard) -> String {
    let mut out = format!(
        "<b>{}</b>\n{} {} · {}\n",
        escape(&card.title),
        card.pet_type_emoji,
        escape(&card.pet_type_name),
        escape(&card.location_name),
    );

    match &card.body {
        PostBody::Single {
            category,
            text,
            allow_other_location,
        } => {
            out.push('\n');
            out.push_str(&escape(text));
            if *category == Category::NeedHome {
                let note = match allow_other_location {
                    Some(true) => Some(snapshot.texts.message("other_location_ok")),
                    Some(false) => Some(snapshot.texts.message("other_location_no")),
                    None => None,
                };
                if let Some(note) = note {
                    out.push_str("\n\n");
                    out.push_str(&note);
                }
            }
        }
        PostBody::All {
            need_home,
            need_temp,
            need_money,
            need_other,
        } => {
            let sections = [
                (Category::NeedHome, need_home),
                (Category::NeedTemp, need_temp),
                (Category::NeedMoney, need_money),
                (Category::NeedOther, need_other),
            ];
            for (category, text) in sections {
                let Some(text) = text else { continue };
                if text.is_empty() {
                    continue;
                }
                let label = snapshot.texts.button(&category.to_string());
                out.push_str(&format!("\n<b>{}</b>\n{}\n", escape(&label), escape(text)));
            }
        }
    }

    out
}

/// The notice shown when a browse query matches nothing.
///
/// Adoption searches get their own copy, split on whether a location was
/// chosen; other categories only distinguish filtered from unfiltered.
pub fn zero_results_text(snapshot: &CatalogSnapshot, filter: &PostFilter) -> String {
    match filter.category {
        Some(Category::NeedHome) => match filter.location {
            Some(location_id) => {
                let name = snapshot
                    .location(location_id)
                    .map(|l| l.name.clone())
                    .unwrap_or_default();
                fill(
                    &snapshot.texts.message("no_posts_need_home_location"),
                    &[&escape(&name)],
                )
            }
            None => snapshot.texts.message("no_posts_need_home"),
        },
        _ => {
            if filter.location.is_some() || filter.pet_type.is_some() {
                snapshot.texts.message("no_posts_filtered")
            } else {
                snapshot.texts.message("no_posts")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawbot_core::types::{BotText, TextKind};
    use pawbot_engine::Texts;
    use pawbot_core::types::Location;

    fn text(id: i64, name: &str, kind: TextKind, value: &str) -> BotText {
        BotText {
            id,
            name: name.to_string(),
            kind,
            value: value.to_string(),
        }
    }

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot {
            pet_types: Vec::new(),
            locations: vec![Location {
                id: 1,
                name: "City1".to_string(),
                button_text: "City One".to_string(),
                display_on_keyboard: true,
            }],
            texts: Texts::from_rows(vec![
                text(1, "other_location_ok", TextKind::Message, "Relocation possible"),
                text(2, "other_location_no", TextKind::Message, "Local adopters only"),
                text(3, "no_posts_need_home", TextKind::Message, "Nobody is looking right now"),
                text(
                    4,
                    "no_posts_need_home_location",
                    TextKind::Message,
                    "Nobody in {} right now",
                ),
                text(5, "no_posts", TextKind::Message, "Nothing here yet"),
                text(6, "no_posts_filtered", TextKind::Message, "Nothing with these filters"),
                text(7, "need_home", TextKind::Button, "Adopt"),
                text(8, "need_money", TextKind::Button, "Donate"),
            ]),
        }
    }

    fn card(body: PostBody) -> PostCard {
        PostCard {
            id: 1,
            title: "Cooper & friends".to_string(),
            pet_type_name: "dogs".to_string(),
            pet_type_emoji: "🐕".to_string(),
            pet_type_button_text: "Dogs".to_string(),
            location_name: "City1".to_string(),
            location_button_text: "City One".to_string(),
            body,
        }
    }

    #[test]
    fn escape_covers_html_reserved_chars() {
        assert_eq!(escape("a<b>&c"), "a&lt;b&gt;&amp;c");
    }

    #[test]
    fn fill_replaces_placeholders_in_order() {
        assert_eq!(fill("{} and {}", &["one", "two"]), "one and two");
        assert_eq!(fill("no holes", &["x"]), "no holes");
        assert_eq!(fill("{} left", &[]), "{} left");
    }

    #[test]
    fn single_body_renders_text_and_relocation_note() {
        let rendered = render_post(
            &snapshot(),
            &card(PostBody::Single {
                category: Category::NeedHome,
                text: "Cooper wants a home".to_string(),
                allow_other_location: Some(true),
            }),
        );
        assert!(rendered.starts_with("<b>Cooper &amp; friends</b>"));
        assert!(rendered.contains("Cooper wants a home"));
        assert!(rendered.contains("Relocation possible"));
    }

    #[test]
    fn non_home_single_body_has_no_relocation_note() {
        let rendered = render_post(
            &snapshot(),
            &card(PostBody::Single {
                category: Category::NeedMoney,
                text: "Needs food".to_string(),
                allow_other_location: None,
            }),
        );
        assert!(rendered.contains("Needs food"));
        assert!(!rendered.contains("Relocation"));
        assert!(!rendered.contains("Local adopters"));
    }

    #[test]
    fn all_body_renders_only_present_sections() {
        let rendered = render_post(
            &snapshot(),
            &card(PostBody::All {
                need_home: Some("Wants a home".to_string()),
                need_temp: None,
                need_money: Some("Needs food".to_string()),
                need_other: Some(String::new()),
            }),
        );
        assert!(rendered.contains("<b>Adopt</b>"));
        assert!(rendered.contains("Wants a home"));
        assert!(rendered.contains("<b>Donate</b>"));
        // Absent and empty bodies render nothing, including the
        // placeholder label of the unconfigured need_other button.
        assert!(!rendered.contains("need_temp"));
        assert!(!rendered.contains("[need_other]"));
    }

    #[test]
    fn zero_results_distinguishes_home_with_location() {
        let snapshot = snapshot();
        let with_location = PostFilter {
            category: Some(Category::NeedHome),
            location: Some(1),
            pet_type: None,
        };
        assert_eq!(
            zero_results_text(&snapshot, &with_location),
            "Nobody in City1 right now"
        );

        let without = PostFilter {
            category: Some(Category::NeedHome),
            ..Default::default()
        };
        assert_eq!(
            zero_results_text(&snapshot, &without),
            "Nobody is looking right now"
        );
    }

    #[test]
    fn zero_results_for_other_categories() {
        let snapshot = snapshot();
        let plain = PostFilter {
            category: Some(Category::NeedMoney),
            ..Default::default()
        };
        assert_eq!(zero_results_text(&snapshot, &plain), "Nothing here yet");

        let filtered = PostFilter {
            category: Some(Category::NeedMoney),
            pet_type: Some(2),
            ..Default::default()
        };
        assert_eq!(
            zero_results_text(&snapshot, &filtered),
            "Nothing with these filters"
        );
    }
}
