//! Scheduled and played matches.
//!
//! A match refers to its two teams by id; the league aggregate owns both
//! collections. The scoreline is meaningful only once `played` is set.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Match {
    pub id: u32,
    /// Scheduling unit this match belongs to (1-based).
    pub week: u32,
    pub home_id: u32,
    pub away_id: u32,
    pub home_score: u8,
    pub away_score: u8,
    pub played: bool,
}

impl Match {
    pub fn new(id: u32, week: u32, home_id: u32, away_id: u32) -> Self {
        Self {
            id,
            week,
            home_id,
            away_id,
            home_score: 0,
            away_score: 0,
            played: false,
        }
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home_id == team_id || self.away_id == team_id
    }
}
