// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user photo upload cooldown.
//!
//! In-process only: a restart clears the table, which is acceptable for a
//! spam brake. Entries are dropped lazily when the user next uploads.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub struct UploadLimiter {
    cooldown: Duration,
    last_upload: Mutex<HashMap<i64, Instant>>,
}

impl UploadLimiter {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_upload: Mutex::new(HashMap::new()),
        }
    }

    /// Record an upload attempt. Returns the remaining cooldown when the
    /// user is still throttled, `None` when the upload may proceed.
    pub fn check(&self, user_id: i64) -> Option<Duration> {
        let now = Instant::now();
        let mut last = self.last_upload.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(at) = last.get(&user_id) {
            let elapsed = now.duration_since(*at);
            if elapsed < self.cooldown {
                return Some(self.cooldown - elapsed);
            }
        }
        last.insert(user_id, now);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_upload_passes_and_starts_cooldown() {
        let limiter = UploadLimiter::new(Duration::from_secs(60));
        assert!(limiter.check(1).is_none());
        let remaining = limiter.check(1).expect("second upload should throttle");
        assert!(remaining <= Duration::from_secs(60));
    }

    #[test]
    fn users_are_throttled_independently() {
        let limiter = UploadLimiter::new(Duration::from_secs(60));
        assert!(limiter.check(1).is_none());
        assert!(limiter.check(2).is_none());
        assert!(limiter.check(1).is_some());
    }

    #[test]
    fn cooldown_expires() {
        let limiter = UploadLimiter::new(Duration::ZERO);
        assert!(limiter.check(1).is_none());
        assert!(limiter.check(1).is_none());
    }
}
