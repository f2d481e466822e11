//! Standings builder: a stateless, derived projection of the team ledgers.

use serde::{Deserialize, Serialize};

use crate::models::Team;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandingsEntry {
    pub team_name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
    /// 1-based rank after sorting.
    pub position: u32,
}

/// Rebuild the table from scratch: points descending, goal difference
/// breaking ties. Teams level on both keep their input order (the sort is
/// stable; no tertiary key is defined).
pub fn build_table(teams: &[Team]) -> Vec<StandingsEntry> {
    let mut table: Vec<StandingsEntry> = teams
        .iter()
        .map(|team| StandingsEntry {
            team_name: team.name.clone(),
            played: team.played(),
            wins: team.wins,
            draws: team.draws,
            losses: team.losses,
            goals_for: team.goals_for,
            goals_against: team.goals_against,
            goal_difference: team.goal_difference(),
            points: team.points,
            position: 0,
        })
        .collect();

    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
    });

    for (i, entry) in table.iter_mut().enumerate() {
        entry.position = (i + 1) as u32;
    }

    table
}
