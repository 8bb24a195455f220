//! Process-wide holder for the upstream session token.
//!
//! The cache stores at most one token together with the instant it stops
//! being valid. A token is only handed out while there is still a safety
//! margin left before that instant, so callers never start a request with a
//! token that is about to expire.

use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
pub struct SessionToken {
    value: String,
    expires_at: Instant,
}

impl SessionToken {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    fn usable_at(&self, now: Instant, margin: Duration) -> bool {
        match self.expires_at.checked_sub(margin) {
            Some(refresh_at) => now < refresh_at,
            None => false,
        }
    }
}

pub struct SessionCache {
    current: RwLock<Option<SessionToken>>,
    margin: Duration,
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionCache {
    pub fn new() -> Self {
        Self::with_margin(DEFAULT_SAFETY_MARGIN)
    }

    pub fn with_margin(margin: Duration) -> Self {
        SessionCache {
            current: RwLock::new(None),
            margin,
        }
    }

    pub fn margin(&self) -> Duration {
        self.margin
    }

    /// Returns the cached token if it is usable right now.
    pub fn get(&self) -> Option<String> {
        self.get_at(Instant::now())
    }

    /// Returns the cached token if `now` is still before `expires_at - margin`.
    pub fn get_at(&self, now: Instant) -> Option<String> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        current
            .as_ref()
            .filter(|token| token.usable_at(now, self.margin))
            .map(|token| token.value.clone())
    }

    /// Replaces the cached entry; the token expires `ttl` from now.
    pub fn set(&self, value: impl Into<String>, ttl: Duration) {
        self.set_at(value, ttl, Instant::now())
    }

    pub fn set_at(&self, value: impl Into<String>, ttl: Duration, now: Instant) {
        // An unrepresentable expiry is treated as already stale
        let expires_at = now.checked_add(ttl).unwrap_or(now);
        let token = SessionToken {
            value: value.into(),
            expires_at,
        };
        log::debug!("Caching session token for {}s", ttl.as_secs());
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Snapshot of the cached entry, stale or not.
    pub fn peek(&self) -> Option<SessionToken> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
