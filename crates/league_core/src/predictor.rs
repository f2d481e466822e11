//! Championship likelihood heuristic.
//!
//! A weighted blend of current points, raw strength, positive goal
//! difference and win count, with a multiplicative bonus for the top two
//! positions. This is a ranking heuristic, not a probabilistic forecast.

use std::collections::BTreeMap;

use crate::models::Team;
use crate::table::StandingsEntry;

pub const POINTS_WEIGHT: f64 = 0.4;
pub const STRENGTH_WEIGHT: f64 = 0.3;
pub const GOAL_DIFF_WEIGHT: f64 = 0.2;
pub const WINS_WEIGHT: f64 = 1.0;
pub const LEADER_BONUS: f64 = 1.2;
pub const RUNNER_UP_BONUS: f64 = 1.1;

/// Strength assumed for a table entry with no matching team record.
const FALLBACK_STRENGTH: f64 = 75.0;

/// Title chance per team name, normalized to sum to 100. When every weight
/// is zero the chances split evenly.
pub fn predict_title_chances(table: &[StandingsEntry], teams: &[Team]) -> BTreeMap<String, f64> {
    let mut weights: Vec<(String, f64)> = Vec::with_capacity(table.len());
    let mut total = 0.0;

    for entry in table {
        let strength = teams
            .iter()
            .find(|t| t.name == entry.team_name)
            .map(|t| f64::from(t.strength))
            .unwrap_or(FALLBACK_STRENGTH);

        let mut weight = POINTS_WEIGHT * f64::from(entry.points)
            + STRENGTH_WEIGHT * strength
            + GOAL_DIFF_WEIGHT * entry.goal_difference.max(0) as f64
            + WINS_WEIGHT * f64::from(entry.wins);

        match entry.position {
            1 => weight *= LEADER_BONUS,
            2 => weight *= RUNNER_UP_BONUS,
            _ => {}
        }

        total += weight;
        weights.push((entry.team_name.clone(), weight));
    }

    let count = weights.len().max(1);
    weights
        .into_iter()
        .map(|(name, weight)| {
            let pct = if total > 0.0 {
                weight / total * 100.0
            } else {
                100.0 / count as f64
            };
            (name, pct)
        })
        .collect()
}
