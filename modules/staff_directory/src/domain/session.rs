//! In-process session store: opaque token → authenticated user id.

use std::time::{Duration, Instant};

use dashmap::DashMap;

#[derive(Debug, Clone, Copy)]
struct SessionEntry {
    user_id: i32,
    last_seen: Instant,
}

/// Concurrent map of live sessions with an idle expiry.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, SessionEntry>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_ttl,
        }
    }

    /// Issue a fresh token for `user_id`.
    pub fn create(&self, user_id: i32) -> String {
        self.purge_expired();
        let token = nanoid::nanoid!(32);
        self.sessions.insert(
            token.clone(),
            SessionEntry {
                user_id,
                last_seen: Instant::now(),
            },
        );
        token
    }

    /// Resolve a token and refresh its idle timer. Expired tokens are removed.
    pub fn resolve(&self, token: &str) -> Option<i32> {
        let now = Instant::now();
        let user_id = {
            let mut entry = self.sessions.get_mut(token)?;
            if now.duration_since(entry.last_seen) >= self.idle_ttl {
                None
            } else {
                entry.last_seen = now;
                Some(entry.user_id)
            }
        };
        if user_id.is_none() {
            self.sessions.remove(token);
        }
        user_id
    }

    /// Returns true if the token was live.
    pub fn remove(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Drop every expired session; returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        let ttl = self.idle_ttl;
        self.sessions
            .retain(|_, entry| entry.last_seen.elapsed() < ttl);
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
