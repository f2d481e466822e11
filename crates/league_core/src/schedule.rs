//! Double round-robin fixture generation for the four-team league.

use crate::models::{Match, Team};

/// 1-factorization of the complete graph on four teams: three rounds in
/// which every team appears exactly once.
const ROUND_PAIRINGS: [[(usize, usize); 2]; 3] = [
    [(0, 1), (2, 3)],
    [(0, 2), (1, 3)],
    [(0, 3), (1, 2)],
];

pub const TEAM_COUNT: usize = 4;
pub const TOTAL_WEEKS: u32 = 6;
pub const MATCHES_PER_WEEK: usize = 2;

/// Generate the full schedule: weeks 1-3 from the pairings above, weeks 4-6
/// the same rounds with home and away reversed. Match ids are assigned
/// sequentially in generation order and are stable external references.
pub fn generate_fixtures(teams: &[Team]) -> Vec<Match> {
    debug_assert_eq!(teams.len(), TEAM_COUNT, "schedule is defined for exactly four teams");

    let mut matches = Vec::with_capacity(TOTAL_WEEKS as usize * MATCHES_PER_WEEK);
    let mut id = 1;
    let mut week = 1;

    for leg in 0..2 {
        for round in &ROUND_PAIRINGS {
            for &(a, b) in round {
                let (home, away) = if leg == 0 { (a, b) } else { (b, a) };
                matches.push(Match::new(id, week, teams[home].id, teams[away].id));
                id += 1;
            }
            week += 1;
        }
    }

    matches
}
