//! Persistence format, kept separate from the runtime aggregate.

use serde::{Deserialize, Serialize};

use crate::models::{Match, Team};

/// Save format version for forward migration.
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeagueSave {
    pub version: u32,
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
    pub current_week: u32,
}

impl LeagueSave {
    pub fn new(teams: Vec<Team>, matches: Vec<Match>, current_week: u32) -> Self {
        Self {
            version: SAVE_VERSION,
            teams,
            matches,
            current_week,
        }
    }

    /// Fresh bootstrap state: default teams, generated fixtures, week 0.
    pub fn bootstrap() -> Self {
        let teams = crate::models::default_teams();
        let matches = crate::schedule::generate_fixtures(&teams);
        Self::new(teams, matches, 0)
    }
}
