//! Shared application state
//!
//! The snapshot is replaced wholesale on refresh; the search core only ever
//! borrows it for the duration of one operation.

use tokio::sync::RwLock;

use crate::backoffice::{self, DebtSnapshot};
use crate::search::MemorySessionStore;

pub struct AppState {
    pub snapshot: RwLock<DebtSnapshot>,
    pub sessions: MemorySessionStore,
    /// Absent when no back-office credentials were configured; refresh then
    /// reports an error and search runs over whatever snapshot is loaded.
    pub client: Option<backoffice::Client>,
}

impl AppState {
    pub fn new(client: Option<backoffice::Client>) -> Self {
        Self {
            snapshot: RwLock::new(DebtSnapshot::new()),
            sessions: MemorySessionStore::new(),
            client,
        }
    }

    #[cfg(test)]
    pub fn with_snapshot(snapshot: DebtSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            sessions: MemorySessionStore::new(),
            client: None,
        }
    }
}
