//! Shared router state

use std::sync::Arc;

use crate::storage::Database;

/// State shared by the menu handlers.
///
/// Holds the storage handle; there is no other cross-request state.
pub struct MenuState {
    pub db: Database,
}

impl MenuState {
    pub fn new(db: Database) -> Arc<Self> {
        Arc::new(Self { db })
    }
}
