//! Per-user search session state
//!
//! The store is injected into the pagination and selection operations, so
//! the core owns no global state and tests never leak into each other.

use std::collections::HashMap;
use std::sync::Mutex;

use super::index::CustomerCandidate;

/// Opaque per-user key; chat user ids in practice
pub type UserId = i64;

/// Sessions kept before the least-recently-used one is evicted
pub const DEFAULT_SESSION_CAPACITY: usize = 1024;

/// One user's open search: the full ranked result list plus the page the
/// user is currently looking at
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSession {
    pub results: Vec<CustomerCandidate>,
    pub current_page: usize,
}

impl SearchSession {
    pub fn new(results: Vec<CustomerCandidate>) -> Self {
        Self {
            results,
            current_page: 0,
        }
    }
}

/// Keyed session storage owned by the application and injected into the
/// search core
pub trait SessionStore: Send + Sync {
    fn get(&self, user_id: UserId) -> Option<SearchSession>;
    fn set(&self, user_id: UserId, session: SearchSession);
    fn delete(&self, user_id: UserId);
}

/// In-process session store with an LRU capacity cap.
///
/// Sessions are ephemeral by design; the cap bounds memory under many
/// distinct users instead of letting abandoned searches pile up forever.
pub struct MemorySessionStore {
    capacity: usize,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    sessions: HashMap<UserId, Slot>,
    clock: u64,
}

struct Slot {
    session: SearchSession,
    touched: u64,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SESSION_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("session store poisoned").sessions.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, user_id: UserId) -> Option<SearchSession> {
        let mut inner = self.inner.lock().expect("session store poisoned");
        inner.clock += 1;
        let clock = inner.clock;
        inner.sessions.get_mut(&user_id).map(|slot| {
            slot.touched = clock;
            slot.session.clone()
        })
    }

    fn set(&self, user_id: UserId, session: SearchSession) {
        let mut inner = self.inner.lock().expect("session store poisoned");
        inner.clock += 1;
        let clock = inner.clock;

        if !inner.sessions.contains_key(&user_id) && inner.sessions.len() >= self.capacity {
            if let Some(&oldest) = inner
                .sessions
                .iter()
                .min_by_key(|(_, slot)| slot.touched)
                .map(|(user, _)| user)
            {
                inner.sessions.remove(&oldest);
            }
        }

        inner.sessions.insert(
            user_id,
            Slot {
                session,
                touched: clock,
            },
        );
    }

    fn delete(&self, user_id: UserId) {
        let mut inner = self.inner.lock().expect("session store poisoned");
        inner.sessions.remove(&user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_page(page: usize) -> SearchSession {
        SearchSession {
            results: Vec::new(),
            current_page: page,
        }
    }

    #[test]
    fn test_set_get_roundtrip() {
        let store = MemorySessionStore::new();
        store.set(1, session_with_page(2));
        assert_eq!(store.get(1).unwrap().current_page, 2);
        assert!(store.get(2).is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let store = MemorySessionStore::new();
        store.set(1, session_with_page(0));
        store.set(1, session_with_page(3));
        assert_eq!(store.get(1).unwrap().current_page, 3);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = MemorySessionStore::new();
        store.set(1, session_with_page(0));
        store.delete(1);
        store.delete(1);
        assert!(store.get(1).is_none());
    }

    #[test]
    fn test_capacity_evicts_least_recently_used() {
        let store = MemorySessionStore::with_capacity(2);
        store.set(1, session_with_page(0));
        store.set(2, session_with_page(0));
        // Touch user 1 so user 2 is the eviction victim.
        let _ = store.get(1);
        store.set(3, session_with_page(0));

        assert_eq!(store.len(), 2);
        assert!(store.get(1).is_some());
        assert!(store.get(2).is_none());
        assert!(store.get(3).is_some());
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let store = MemorySessionStore::with_capacity(2);
        store.set(1, session_with_page(0));
        store.set(2, session_with_page(0));
        store.set(1, session_with_page(5));
        assert_eq!(store.len(), 2);
        assert!(store.get(2).is_some());
    }
}
