// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed codec for inline-keyboard callback payloads.
//!
//! Telegram limits callback data to 64 bytes, so navigation state is
//! packed as `direction,category,location,pet_type,post_id` with `-` for
//! unset fields, e.g. `>,need_home,1,-,15`. Malformed payloads (stale
//! keyboards from older releases, or tampering) fail parsing before any
//! query is issued.

use std::fmt;
use std::str::FromStr;

use pawbot_core::types::{Category, Cursor, Direction, PostFilter};
use pawbot_core::PawbotError;

const UNSET: &str = "-";

/// Everything a pawbot inline button can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackData {
    /// Page to the neighbor of `post_id` under the carried filters.
    Nav {
        direction: Direction,
        category: Option<Category>,
        location: Option<i64>,
        pet_type: Option<i64>,
        post_id: i64,
    },
    OpenLocationFilter,
    OpenPetTypeFilter,
    /// `None` clears the filter ("any").
    SetLocation(Option<i64>),
    SetPetType(Option<i64>),
    SubscribePhotos(bool),
}

impl CallbackData {
    pub fn nav(direction: Direction, filter: &PostFilter, post_id: i64) -> Self {
        CallbackData::Nav {
            direction,
            category: filter.category,
            location: filter.location,
            pet_type: filter.pet_type,
            post_id,
        }
    }

    /// The filter and cursor a navigation payload describes.
    pub fn nav_query(&self) -> Option<(PostFilter, Cursor)> {
        match *self {
            CallbackData::Nav {
                direction,
                category,
                location,
                pet_type,
                post_id,
            } => Some((
                PostFilter {
                    category,
                    location,
                    pet_type,
                },
                Cursor { post_id, direction },
            )),
            _ => None,
        }
    }
}

impl fmt::Display for CallbackData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CallbackData::Nav {
                direction,
                category,
                location,
                pet_type,
                post_id,
            } => {
                let category = category.map(|c| c.to_string());
                write!(
                    f,
                    "{},{},{},{},{}",
                    direction,
                    category.as_deref().unwrap_or(UNSET),
                    opt_id(location),
                    opt_id(pet_type),
                    post_id,
                )
            }
            CallbackData::OpenLocationFilter => write!(f, "flt:loc"),
            CallbackData::OpenPetTypeFilter => write!(f, "flt:pet"),
            CallbackData::SetLocation(id) => write!(f, "set:loc:{}", opt_set(id)),
            CallbackData::SetPetType(id) => write!(f, "set:pet:{}", opt_set(id)),
            CallbackData::SubscribePhotos(true) => write!(f, "sub:on"),
            CallbackData::SubscribePhotos(false) => write!(f, "sub:off"),
        }
    }
}

fn opt_id(id: Option<i64>) -> String {
    id.map_or_else(|| UNSET.to_string(), |id| id.to_string())
}

fn opt_set(id: Option<i64>) -> String {
    id.map_or_else(|| "any".to_string(), |id| id.to_string())
}

impl FromStr for CallbackData {
    type Err = PawbotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flt:loc" => return Ok(CallbackData::OpenLocationFilter),
            "flt:pet" => return Ok(CallbackData::OpenPetTypeFilter),
            "sub:on" => return Ok(CallbackData::SubscribePhotos(true)),
            "sub:off" => return Ok(CallbackData::SubscribePhotos(false)),
            _ => {}
        }

        if let Some(rest) = s.strip_prefix("set:loc:") {
            return Ok(CallbackData::SetLocation(parse_set_id(s, rest)?));
        }
        if let Some(rest) = s.strip_prefix("set:pet:") {
            return Ok(CallbackData::SetPetType(parse_set_id(s, rest)?));
        }

        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 5 {
            return Err(invalid(s));
        }
        let direction = Direction::from_str(parts[0]).map_err(|_| invalid(s))?;
        let category = match parts[1] {
            UNSET => None,
            raw => Some(Category::from_str(raw).map_err(|_| invalid(s))?),
        };
        let location = parse_opt_id(s, parts[2])?;
        let pet_type = parse_opt_id(s, parts[3])?;
        let post_id = parts[4].parse::<i64>().map_err(|_| invalid(s))?;

        Ok(CallbackData::Nav {
            direction,
            category,
            location,
            pet_type,
            post_id,
        })
    }
}

fn invalid(raw: &str) -> PawbotError {
    PawbotError::InvalidFilter(format!("unrecognized callback payload: {raw:?}"))
}

fn parse_opt_id(raw: &str, field: &str) -> Result<Option<i64>, PawbotError> {
    match field {
        UNSET => Ok(None),
        n => n.parse::<i64>().map(Some).map_err(|_| invalid(raw)),
    }
}

fn parse_set_id(raw: &str, field: &str) -> Result<Option<i64>, PawbotError> {
    match field {
        "any" => Ok(None),
        n => n.parse::<i64>().map(Some).map_err(|_| invalid(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_payload_round_trips() {
        let data = CallbackData::Nav {
            direction: Direction::After,
            category: Some(Category::NeedHome),
            location: Some(1),
            pet_type: None,
            post_id: 15,
        };
        let encoded = data.to_string();
        assert_eq!(encoded, ">,need_home,1,-,15");
        assert_eq!(encoded.parse::<CallbackData>().unwrap(), data);
    }

    #[test]
    fn nav_without_filters_round_trips() {
        let data = CallbackData::Nav {
            direction: Direction::Before,
            category: None,
            location: None,
            pet_type: None,
            post_id: 3,
        };
        let encoded = data.to_string();
        assert_eq!(encoded, "<,-,-,-,3");
        assert_eq!(encoded.parse::<CallbackData>().unwrap(), data);
    }

    #[test]
    fn payloads_stay_under_telegram_limit() {
        // Rowids come from autoincrementing tables and stay far below 16
        // digits; three 16-digit ids with the longest category symbol are
        // the widest payload a deployed keyboard can carry.
        let wide = 9_999_999_999_999_999_i64;
        let data = CallbackData::Nav {
            direction: Direction::Before,
            category: Some(Category::NeedMoney),
            location: Some(wide),
            pet_type: Some(wide),
            post_id: wide,
        };
        assert!(data.to_string().len() <= 64);
    }

    #[test]
    fn filter_and_subscription_payloads_round_trip() {
        for data in [
            CallbackData::OpenLocationFilter,
            CallbackData::OpenPetTypeFilter,
            CallbackData::SetLocation(Some(4)),
            CallbackData::SetLocation(None),
            CallbackData::SetPetType(Some(2)),
            CallbackData::SetPetType(None),
            CallbackData::SubscribePhotos(true),
            CallbackData::SubscribePhotos(false),
        ] {
            let encoded = data.to_string();
            assert_eq!(encoded.parse::<CallbackData>().unwrap(), data, "{encoded}");
        }
    }

    #[test]
    fn unknown_category_symbol_is_rejected() {
        let err = ">,need_castle,1,-,15".parse::<CallbackData>().unwrap_err();
        assert!(matches!(err, PawbotError::InvalidFilter(_)));
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        for raw in ["", "garbage", ">,need_home,1,-", ">,need_home,one,-,15", "set:loc:x"] {
            assert!(
                raw.parse::<CallbackData>().is_err(),
                "expected rejection of {raw:?}"
            );
        }
    }

    #[test]
    fn nav_query_extracts_filter_and_cursor() {
        let data = ">,need_money,2,3,9".parse::<CallbackData>().unwrap();
        let (filter, cursor) = data.nav_query().unwrap();
        assert_eq!(filter.category, Some(Category::NeedMoney));
        assert_eq!(filter.location, Some(2));
        assert_eq!(filter.pet_type, Some(3));
        assert_eq!(cursor.post_id, 9);
        assert_eq!(cursor.direction, Direction::After);

        assert!(CallbackData::OpenLocationFilter.nav_query().is_none());
    }
}
