//! Team identity and the running statistics ledger.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: u32,
    pub name: String,
    /// Strength rating (0-100), fixed for the simulation's lifetime.
    pub strength: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
}

impl Team {
    pub fn new(id: u32, name: &str, strength: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            strength,
            goals_for: 0,
            goals_against: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            points: 0,
        }
    }

    /// Matches played, always derived from the result counters.
    pub fn played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    /// Goal difference is recomputed from the tallies, never stored.
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// Apply one recorded scoreline to the ledger.
    ///
    /// Only the match outcome engine and result correction mutate the
    /// ledger; the standings builder reads it and nothing else.
    pub(crate) fn record_result(&mut self, scored: u8, conceded: u8) {
        self.goals_for += u32::from(scored);
        self.goals_against += u32::from(conceded);

        if scored > conceded {
            self.wins += 1;
            self.points += 3;
        } else if scored < conceded {
            self.losses += 1;
        } else {
            self.draws += 1;
            self.points += 1;
        }
    }

    /// Exact inverse of [`record_result`](Self::record_result) for the same
    /// scoreline. The delta is re-derived from the scores, not cached.
    pub(crate) fn revert_result(&mut self, scored: u8, conceded: u8) {
        self.goals_for -= u32::from(scored);
        self.goals_against -= u32::from(conceded);

        if scored > conceded {
            self.wins -= 1;
            self.points -= 3;
        } else if scored < conceded {
            self.losses -= 1;
        } else {
            self.draws -= 1;
            self.points -= 1;
        }
    }
}

/// The four seed teams used by the storage bootstrap, the CLI and tests.
pub fn default_teams() -> Vec<Team> {
    vec![
        Team::new(1, "Manchester United", 80),
        Team::new(2, "Liverpool", 85),
        Team::new(3, "Manchester City", 90),
        Team::new(4, "Chelsea", 88),
    ]
}
