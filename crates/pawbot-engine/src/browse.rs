// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The post browsing engine: single-row filtered pagination.
//!
//! A browse step fetches the nearest post matching the filter (relative to
//! the cursor when one is given), then probes both directions around the
//! returned row so the caller can render prev/next affordances without a
//! second round trip.

use pawbot_core::types::{Cursor, Direction, PostFilter, PostPage};
use pawbot_core::{PawbotError, PostStore};
use tracing::debug;

/// Stateless pagination engine over a [`PostStore`].
///
/// Holds no per-user state; the cursor travels with the caller (in
/// callback payloads), so one engine serves every conversation.
pub struct BrowseEngine<S> {
    store: S,
}

impl<S: PostStore> BrowseEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch one page for the filter.
    ///
    /// When a cursor points past the edge of the result set (the anchor
    /// post was hidden or deleted since the keyboard was rendered), the
    /// query is retried exactly once with the cursor dropped, landing on
    /// the first match. `Ok(None)` means the filter matches nothing at
    /// all; store failures propagate unchanged.
    pub async fn query(
        &self,
        filter: &PostFilter,
        cursor: Option<Cursor>,
    ) -> Result<Option<PostPage>, PawbotError> {
        let mut card = self.store.select_post(filter, cursor).await?;
        if card.is_none() && cursor.is_some() {
            debug!(?filter, ?cursor, "cursor past edge, retrying from start");
            card = self.store.select_post(filter, None).await?;
        }
        let Some(card) = card else {
            return Ok(None);
        };

        let (has_prev, has_next) = tokio::join!(
            self.has_neighbor(filter, card.id, Direction::Before),
            self.has_neighbor(filter, card.id, Direction::After),
        );

        Ok(Some(PostPage {
            card,
            has_prev: has_prev?,
            has_next: has_next?,
        }))
    }

    /// True iff a match exists strictly before/after `post_id` under the
    /// filter. Pure existence probe; never fetches a row.
    pub async fn has_neighbor(
        &self,
        filter: &PostFilter,
        post_id: i64,
        direction: Direction,
    ) -> Result<bool, PawbotError> {
        let cursor = Cursor { post_id, direction };
        self.store.post_exists(filter, Some(cursor)).await
    }

    /// True iff the filter matches at least one post.
    pub async fn any_match(&self, filter: &PostFilter) -> Result<bool, PawbotError> {
        self.store.post_exists(filter, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pawbot_core::types::{Category, PostBody, PostCard};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory store mirroring the SQLite predicate semantics.
    struct FakeStore {
        posts: Vec<FakePost>,
        select_calls: AtomicUsize,
        exists_calls: AtomicUsize,
        fail: bool,
    }

    #[derive(Clone)]
    struct FakePost {
        id: i64,
        title: &'static str,
        location: i64,
        pet_type: i64,
        visible: bool,
        open_for: Vec<Category>,
    }

    impl FakeStore {
        fn new(posts: Vec<FakePost>) -> Self {
            Self {
                posts,
                select_calls: AtomicUsize::new(0),
                exists_calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                posts: Vec::new(),
                select_calls: AtomicUsize::new(0),
                exists_calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn matches(&self, post: &FakePost, filter: &PostFilter, cursor: Option<Cursor>) -> bool {
            if !post.visible {
                return false;
            }
            if let Some(category) = filter.category {
                if !post.open_for.contains(&category) {
                    return false;
                }
            }
            if let Some(location) = filter.location {
                if post.location != location {
                    return false;
                }
            }
            if let Some(pet_type) = filter.pet_type {
                if post.pet_type != pet_type {
                    return false;
                }
            }
            match cursor {
                Some(Cursor {
                    post_id,
                    direction: Direction::Before,
                }) => post.id < post_id,
                Some(Cursor {
                    post_id,
                    direction: Direction::After,
                }) => post.id > post_id,
                None => true,
            }
        }

        fn nearest(&self, filter: &PostFilter, cursor: Option<Cursor>) -> Option<&FakePost> {
            let mut matching: Vec<&FakePost> = self
                .posts
                .iter()
                .filter(|p| self.matches(p, filter, cursor))
                .collect();
            matching.sort_by_key(|p| p.id);
            match cursor.map(|c| c.direction) {
                Some(Direction::Before) => matching.last().copied(),
                Some(Direction::After) | None => matching.first().copied(),
            }
        }
    }

    #[async_trait]
    impl PostStore for FakeStore {
        async fn select_post(
            &self,
            filter: &PostFilter,
            cursor: Option<Cursor>,
        ) -> Result<Option<PostCard>, PawbotError> {
            self.select_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(PawbotError::Storage {
                    source: "store down".into(),
                });
            }
            Ok(self.nearest(filter, cursor).map(|p| PostCard {
                id: p.id,
                title: p.title.to_string(),
                pet_type_name: String::new(),
                pet_type_emoji: String::new(),
                pet_type_button_text: String::new(),
                location_name: String::new(),
                location_button_text: String::new(),
                body: PostBody::All {
                    need_home: None,
                    need_temp: None,
                    need_money: None,
                    need_other: None,
                },
            }))
        }

        async fn post_exists(
            &self,
            filter: &PostFilter,
            cursor: Option<Cursor>,
        ) -> Result<bool, PawbotError> {
            self.exists_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(PawbotError::Storage {
                    source: "store down".into(),
                });
            }
            Ok(self.nearest(filter, cursor).is_some())
        }
    }

    fn post(id: i64, title: &'static str, location: i64, open_for: Vec<Category>) -> FakePost {
        FakePost {
            id,
            title,
            location,
            pet_type: 1,
            visible: true,
            open_for,
        }
    }

    fn three_posts() -> Vec<FakePost> {
        vec![
            post(1, "first", 1, vec![Category::NeedHome]),
            post(2, "second", 1, vec![Category::NeedHome]),
            post(3, "third", 2, vec![Category::NeedMoney]),
        ]
    }

    fn home_filter() -> PostFilter {
        PostFilter {
            category: Some(Category::NeedHome),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn first_page_has_next_but_no_prev() {
        let engine = BrowseEngine::new(FakeStore::new(three_posts()));
        let page = engine.query(&home_filter(), None).await.unwrap().unwrap();
        assert_eq!(page.card.title, "first");
        assert!(!page.has_prev);
        assert!(page.has_next);
    }

    #[tokio::test]
    async fn cursor_steps_forward_and_back() {
        let engine = BrowseEngine::new(FakeStore::new(three_posts()));
        let forward = Cursor {
            post_id: 1,
            direction: Direction::After,
        };
        let page = engine
            .query(&home_filter(), Some(forward))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.card.title, "second");
        assert!(page.has_prev);
        assert!(!page.has_next);

        let back = Cursor {
            post_id: page.card.id,
            direction: Direction::Before,
        };
        let page = engine
            .query(&home_filter(), Some(back))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.card.title, "first");
    }

    #[tokio::test]
    async fn no_match_returns_none_without_probing() {
        let store = FakeStore::new(three_posts());
        let engine = BrowseEngine::new(store);
        let filter = PostFilter {
            category: Some(Category::NeedTemp),
            ..Default::default()
        };
        let page = engine.query(&filter, None).await.unwrap();
        assert!(page.is_none());
        assert_eq!(engine.store().exists_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stale_cursor_falls_back_to_first_match() {
        let engine = BrowseEngine::new(FakeStore::new(three_posts()));
        // Past the edge: nothing after id 99.
        let stale = Cursor {
            post_id: 99,
            direction: Direction::After,
        };
        let page = engine
            .query(&home_filter(), Some(stale))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.card.title, "first");
        // Primary select plus exactly one retry, never more.
        assert_eq!(engine.store().select_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fallback_is_bounded_when_filter_matches_nothing() {
        let engine = BrowseEngine::new(FakeStore::new(three_posts()));
        let filter = PostFilter {
            category: Some(Category::NeedOther),
            ..Default::default()
        };
        let stale = Cursor {
            post_id: 99,
            direction: Direction::After,
        };
        let page = engine.query(&filter, Some(stale)).await.unwrap();
        assert!(page.is_none());
        assert_eq!(engine.store().select_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn no_cursor_page_never_retries() {
        let engine = BrowseEngine::new(FakeStore::new(Vec::new()));
        let page = engine.query(&PostFilter::default(), None).await.unwrap();
        assert!(page.is_none());
        assert_eq!(engine.store().select_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn probes_run_against_returned_post_not_cursor() {
        let engine = BrowseEngine::new(FakeStore::new(three_posts()));
        // Stale cursor lands back on post 1; its neighbors are probed,
        // so next exists even though the cursor pointed past the end.
        let stale = Cursor {
            post_id: 99,
            direction: Direction::After,
        };
        let page = engine
            .query(&home_filter(), Some(stale))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.card.id, 1);
        assert!(page.has_next);
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let engine = BrowseEngine::new(FakeStore::failing());
        let result = engine.query(&PostFilter::default(), None).await;
        assert!(matches!(result, Err(PawbotError::Storage { .. })));
    }

    #[tokio::test]
    async fn single_post_has_no_neighbors() {
        let engine = BrowseEngine::new(FakeStore::new(vec![post(
            7,
            "only",
            1,
            vec![Category::NeedHome],
        )]));
        let page = engine.query(&home_filter(), None).await.unwrap().unwrap();
        assert!(!page.has_prev);
        assert!(!page.has_next);
        assert_eq!(engine.store().exists_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn has_neighbor_agrees_with_cursor_query() {
        let engine = BrowseEngine::new(FakeStore::new(three_posts()));
        let filter = home_filter();
        for post_id in [1, 2] {
            for direction in [Direction::Before, Direction::After] {
                let exists = engine
                    .has_neighbor(&filter, post_id, direction)
                    .await
                    .unwrap();
                let cursor = Cursor { post_id, direction };
                let fetched = engine
                    .store()
                    .select_post(&filter, Some(cursor))
                    .await
                    .unwrap();
                assert_eq!(exists, fetched.is_some(), "post {post_id} {direction:?}");
            }
        }
    }

    #[tokio::test]
    async fn any_match_checks_without_fetching() {
        let engine = BrowseEngine::new(FakeStore::new(three_posts()));
        assert!(engine.any_match(&home_filter()).await.unwrap());
        let empty = PostFilter {
            category: Some(Category::NeedTemp),
            ..Default::default()
        };
        assert!(!engine.any_match(&empty).await.unwrap());
        assert_eq!(engine.store().select_calls.load(Ordering::SeqCst), 0);
    }
}
