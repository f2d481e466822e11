//! Persistence collaborator for the league aggregate.
//!
//! The core consumes this interface; it never depends on what sits behind
//! it. `JsonFileStore` backs the CLI with an on-disk JSON document,
//! `MemoryStore` backs tests.

pub mod error;
pub mod file;
pub mod format;
pub mod memory;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use format::{LeagueSave, SAVE_VERSION};
pub use memory::MemoryStore;

use crate::models::{Match, Team};

/// Called by the service layer after each successful in-memory mutation.
/// A failing store must not corrupt previously persisted state.
pub trait LeagueStore: Send + Sync {
    /// Previously persisted state, `None` on first run.
    fn load(&self) -> Result<Option<LeagueSave>, StoreError>;

    fn persist_match(&self, m: &Match) -> Result<(), StoreError>;

    fn persist_team(&self, team: &Team) -> Result<(), StoreError>;

    fn persist_week(&self, week: u32) -> Result<(), StoreError>;
}
