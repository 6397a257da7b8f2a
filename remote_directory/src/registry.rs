//! Session registry
//!
//! Unlike a keyed map, the registry is an append-only list scanned under a
//! single lock. Expected cardinality is one entry per server/user pair an
//! application talks to, so a linear scan is cheap.

use crate::Session;
use directory_types::{NetAddr, UserName};
use std::sync::{Arc, Mutex, MutexGuard};

/// Cache of authenticated sessions
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<Vec<Arc<Session>>>,
}

impl SessionRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the session for `user` at `net_addr`
    pub fn find(&self, net_addr: &NetAddr, user: &UserName) -> Option<Arc<Session>> {
        self.lock()
            .iter()
            .find(|session| session.matches(net_addr, user))
            .cloned()
    }

    /// Appends a session
    ///
    /// No uniqueness check happens here; callers look up before inserting.
    pub fn insert(&self, session: Arc<Session>) {
        self.lock().push(session);
    }

    /// Removes every session for `user` at `net_addr` and returns them
    pub fn evict(&self, net_addr: &NetAddr, user: &UserName) -> Vec<Arc<Session>> {
        let mut sessions = self.lock();
        let (evicted, kept): (Vec<_>, Vec<_>) = sessions
            .drain(..)
            .partition(|session| session.matches(net_addr, user));
        *sessions = kept;
        evicted
    }

    /// Returns the number of registered sessions
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Checks whether no session is registered
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Appends and removals complete before the guard drops, so a panicking
    // holder cannot leave the list half-modified.
    fn lock(&self) -> MutexGuard<'_, Vec<Arc<Session>>> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
