//! The league aggregate: teams, fixtures, the week counter and the current
//! table. Never a global — the service layer owns a `League` behind an
//! explicit lock and passes it into each operation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::engine;
use crate::error::{LeagueError, Result};
use crate::models::{Match, Team};
use crate::predictor;
use crate::schedule;
use crate::store::LeagueSave;
use crate::table::{self, StandingsEntry};

use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct League {
    teams: Vec<Team>,
    matches: Vec<Match>,
    current_week: u32,
    standings: Vec<StandingsEntry>,
    rng: ChaCha8Rng,
}

impl League {
    /// Create a fresh league: fixtures generated, nothing played, week 0.
    /// The seed fixes every scoreline of the season.
    pub fn new(teams: Vec<Team>, seed: u64) -> Self {
        let matches = schedule::generate_fixtures(&teams);
        Self::from_parts(teams, matches, 0, seed)
    }

    /// Restore a league from previously persisted state. The RNG is seeded
    /// fresh; only ledgers and scorelines are part of the saved state.
    ///
    /// An interrupted persist can leave the stored counter ahead of its
    /// unplayed matches. The counter is rolled back to just before the
    /// earliest unplayed week, so advancing reaches those matches instead of
    /// skipping them.
    pub fn from_parts(teams: Vec<Team>, matches: Vec<Match>, current_week: u32, seed: u64) -> Self {
        let earliest_unplayed = matches.iter().filter(|m| !m.played).map(|m| m.week).min();
        let current_week = match earliest_unplayed {
            Some(week) if week <= current_week => week.saturating_sub(1),
            _ => current_week,
        };

        let mut league = Self {
            teams,
            matches,
            current_week,
            standings: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        league.rebuild_standings();
        league
    }

    pub fn from_save(save: &LeagueSave, seed: u64) -> Self {
        Self::from_parts(save.teams.clone(), save.matches.clone(), save.current_week, seed)
    }

    pub fn to_save(&self) -> LeagueSave {
        LeagueSave::new(self.teams.clone(), self.matches.clone(), self.current_week)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn current_week(&self) -> u32 {
        self.current_week
    }

    pub fn standings(&self) -> &[StandingsEntry] {
        &self.standings
    }

    /// Highest week value present in the fixture set.
    pub fn total_weeks(&self) -> u32 {
        self.matches.iter().map(|m| m.week).max().unwrap_or(0)
    }

    pub fn season_complete(&self) -> bool {
        self.matches.iter().all(|m| m.played)
    }

    /// All matches, or only those of one week.
    pub fn matches_for(&self, week: Option<u32>) -> Vec<Match> {
        match week {
            Some(w) => self.matches.iter().filter(|m| m.week == w).cloned().collect(),
            None => self.matches.clone(),
        }
    }

    /// Advance the simulation by one week: simulate every unplayed match at
    /// the next week, then rebuild the table once.
    ///
    /// Validates before incrementing: when no unplayed match exists at the
    /// target week, the counter stays untouched and nothing is mutated.
    pub fn advance_week(&mut self) -> Result<&[StandingsEntry]> {
        let next = self.current_week + 1;
        if !self.matches.iter().any(|m| m.week == next && !m.played) {
            return Err(LeagueError::NoMoreMatches { week: next });
        }

        self.current_week = next;
        for idx in 0..self.matches.len() {
            if self.matches[idx].week == next && !self.matches[idx].played {
                self.play_match_at(idx);
            }
        }
        self.rebuild_standings();

        log::info!("week {} simulated", next);
        Ok(&self.standings)
    }

    /// Simulate every remaining week up to the final scheduling unit and
    /// return the resulting table. A no-op when the season is complete.
    pub fn advance_to_completion(&mut self) -> &[StandingsEntry] {
        while self.matches.iter().any(|m| !m.played) {
            if self.advance_week().is_err() {
                // Restore rolls the counter back behind any unplayed match,
                // so every unplayed match stays reachable; the break bounds
                // the loop if one ever is not.
                break;
            }
        }
        &self.standings
    }

    /// Replace an already-recorded result and reconcile both ledgers.
    ///
    /// The old delta is re-derived from the stored scoreline before it is
    /// overwritten, then the new delta is applied under the same
    /// win/draw/loss rule. Preconditions are checked before any mutation.
    pub fn correct_result(
        &mut self,
        match_id: u32,
        home_score: u8,
        away_score: u8,
    ) -> Result<&[StandingsEntry]> {
        let match_idx = self
            .matches
            .iter()
            .position(|m| m.id == match_id)
            .ok_or(LeagueError::MatchNotFound { id: match_id })?;

        if !self.matches[match_idx].played {
            return Err(LeagueError::MatchNotYetPlayed { id: match_id });
        }

        let m = &mut self.matches[match_idx];
        let (old_home, old_away) = (m.home_score, m.away_score);

        let (home, away) = pair_by_id(&mut self.teams, m.home_id, m.away_id);
        home.revert_result(old_home, old_away);
        away.revert_result(old_away, old_home);
        home.record_result(home_score, away_score);
        away.record_result(away_score, home_score);

        m.home_score = home_score;
        m.away_score = away_score;

        self.rebuild_standings();

        log::info!(
            "match {} corrected: {}-{} -> {}-{}",
            match_id,
            old_home,
            old_away,
            home_score,
            away_score
        );
        Ok(&self.standings)
    }

    /// Title chances per team, from the current table and strength ratings.
    pub fn predict_title_chances(&self) -> BTreeMap<String, f64> {
        predictor::predict_title_chances(&self.standings, &self.teams)
    }

    fn play_match_at(&mut self, match_idx: usize) {
        let m = &mut self.matches[match_idx];
        let (home, away) = pair_by_id(&mut self.teams, m.home_id, m.away_id);
        engine::play_match(m, home, away, &mut self.rng);
    }

    fn rebuild_standings(&mut self) {
        self.standings = table::build_table(&self.teams);
    }
}

/// Split-borrow two distinct teams out of the roster.
///
/// Fixture generation guarantees both ids exist and differ; a miss here is
/// state corruption, not a caller error.
fn pair_by_id(teams: &mut [Team], home_id: u32, away_id: u32) -> (&mut Team, &mut Team) {
    let a = teams
        .iter()
        .position(|t| t.id == home_id)
        .expect("match references unknown home team");
    let b = teams
        .iter()
        .position(|t| t.id == away_id)
        .expect("match references unknown away team");
    debug_assert_ne!(a, b);

    if a < b {
        let (left, right) = teams.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = teams.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_teams;
    use proptest::prelude::*;

    fn league() -> League {
        League::new(default_teams(), 42)
    }

    #[test]
    fn test_new_league_starts_at_week_zero() {
        let league = league();
        assert_eq!(league.current_week(), 0);
        assert_eq!(league.matches().len(), 12);
        assert_eq!(league.total_weeks(), 6);
        assert_eq!(league.standings().len(), 4);
        assert!(league.standings().iter().all(|e| e.played == 0));
    }

    #[test]
    fn test_advance_week_plays_exactly_two_matches() {
        let mut league = league();
        league.advance_week().unwrap();

        assert_eq!(league.current_week(), 1);
        let played: Vec<_> = league.matches().iter().filter(|m| m.played).collect();
        assert_eq!(played.len(), 2);
        assert!(played.iter().all(|m| m.week == 1));
    }

    #[test]
    fn test_advance_past_final_week_fails_without_increment() {
        let mut league = league();
        league.advance_to_completion();
        assert_eq!(league.current_week(), 6);

        let err = league.advance_week().unwrap_err();
        assert!(matches!(err, LeagueError::NoMoreMatches { week: 7 }));
        // Validate-before-increment: counter unchanged on failure.
        assert_eq!(league.current_week(), 6);
    }

    #[test]
    fn test_advance_to_completion_plays_full_season() {
        let mut league = league();
        league.advance_to_completion();

        assert!(league.season_complete());
        for entry in league.standings() {
            assert_eq!(entry.played, 6);
        }
        let positions: Vec<u32> = league.standings().iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_advance_to_completion_on_finished_season_is_noop() {
        let mut league = league();
        league.advance_to_completion();
        let before = league.standings().to_vec();

        league.advance_to_completion();
        assert_eq!(league.standings(), &before[..]);
        assert_eq!(league.current_week(), 6);
    }

    #[test]
    fn test_same_seed_reproduces_season() {
        let mut a = League::new(default_teams(), 1234);
        let mut b = League::new(default_teams(), 1234);

        a.advance_to_completion();
        b.advance_to_completion();

        assert_eq!(a.standings(), b.standings());
        assert_eq!(a.matches(), b.matches());
    }

    #[test]
    fn test_matches_for_week_filter() {
        let league = league();
        assert_eq!(league.matches_for(None).len(), 12);
        assert_eq!(league.matches_for(Some(3)).len(), 2);
        assert!(league.matches_for(Some(3)).iter().all(|m| m.week == 3));
        assert!(league.matches_for(Some(99)).is_empty());
    }

    #[test]
    fn test_correct_unknown_match_fails() {
        let mut league = league();
        let err = league.correct_result(99, 1, 0).unwrap_err();
        assert!(matches!(err, LeagueError::MatchNotFound { id: 99 }));
    }

    #[test]
    fn test_correct_unplayed_match_fails_without_mutation() {
        let mut league = league();
        let teams_before = league.teams().to_vec();

        let err = league.correct_result(1, 2, 2).unwrap_err();

        assert!(matches!(err, LeagueError::MatchNotYetPlayed { id: 1 }));
        assert_eq!(league.teams(), &teams_before[..]);
        assert!(!league.matches()[0].played);
    }

    #[test]
    fn test_correction_rewrites_ledgers_as_if_replayed() {
        let mut league = league();
        league.advance_week().unwrap();

        let m = league.matches_for(Some(1))[0].clone();
        league.correct_result(m.id, 5, 0).unwrap();

        // Ledgers now read as if 5-0 had always been the result.
        let mut replayed = League::new(default_teams(), 0);
        for other in league.matches_for(Some(1)) {
            let (h, a) = if other.id == m.id {
                (5, 0)
            } else {
                (other.home_score, other.away_score)
            };
            let (home, away) = pair_by_id(&mut replayed.teams, other.home_id, other.away_id);
            home.record_result(h, a);
            away.record_result(a, h);
        }

        for team in league.teams() {
            let expected = replayed.teams().iter().find(|t| t.id == team.id).unwrap();
            assert_eq!(team, expected);
        }
    }

    #[test]
    fn test_correction_round_trip_restores_statistics() {
        let mut league = league();
        league.advance_week().unwrap();

        let m = league.matches_for(Some(1))[0].clone();
        let teams_before = league.teams().to_vec();
        let standings_before = league.standings().to_vec();

        league.correct_result(m.id, 6, 6).unwrap();
        league.correct_result(m.id, m.home_score, m.away_score).unwrap();

        assert_eq!(league.teams(), &teams_before[..]);
        assert_eq!(league.standings(), &standings_before[..]);
    }

    #[test]
    fn test_save_round_trip() {
        let mut league = league();
        league.advance_week().unwrap();

        let save = league.to_save();
        let restored = League::from_save(&save, 42);

        assert_eq!(restored.teams(), league.teams());
        assert_eq!(restored.matches(), league.matches());
        assert_eq!(restored.current_week(), 1);
        assert_eq!(restored.standings(), league.standings());
    }

    #[test]
    fn test_restore_rolls_counter_back_to_unplayed_matches() {
        let mut league = league();
        league.advance_week().unwrap();

        // A persist interrupted between counter and matches leaves the
        // stored counter ahead of its unplayed matches.
        let mut save = league.to_save();
        save.current_week = 3;

        let mut restored = League::from_save(&save, 42);
        assert_eq!(restored.current_week(), 1);

        restored.advance_week().unwrap();
        assert_eq!(restored.current_week(), 2);
        assert!(restored.matches_for(Some(2)).iter().all(|m| m.played));
    }

    #[test]
    fn test_predictions_follow_full_season() {
        let mut league = league();
        league.advance_to_completion();

        let chances = league.predict_title_chances();
        assert_eq!(chances.len(), 4);
        let sum: f64 = chances.values().sum();
        assert!((sum - 100.0).abs() < 1e-6, "sum was {}", sum);

        // The champion carries the leader bonus and at least as much of
        // everything the weight rewards, so it cannot rank last.
        let champion = &league.standings()[0].team_name;
        let min = chances.values().cloned().fold(f64::INFINITY, f64::min);
        assert!(chances[champion] > min);
    }

    proptest! {
        #[test]
        fn prop_correction_round_trip(
            seed in 0u64..1000,
            new_home in 0u8..=6,
            new_away in 0u8..=6,
        ) {
            let mut league = League::new(default_teams(), seed);
            league.advance_week().unwrap();

            let m = league.matches_for(Some(1))[1].clone();
            let teams_before = league.teams().to_vec();

            league.correct_result(m.id, new_home, new_away).unwrap();
            league.correct_result(m.id, m.home_score, m.away_score).unwrap();

            prop_assert_eq!(league.teams(), &teams_before[..]);
        }

        #[test]
        fn prop_ledger_invariants_hold_all_season(seed in 0u64..200) {
            let mut league = League::new(default_teams(), seed);
            while league.advance_week().is_ok() {
                for team in league.teams() {
                    prop_assert_eq!(team.points, 3 * team.wins + team.draws);
                    prop_assert_eq!(
                        team.goal_difference(),
                        i64::from(team.goals_for) - i64::from(team.goals_against)
                    );
                }
                let total_played: u32 = league.teams().iter().map(|t| t.played()).sum();
                let matches_played =
                    league.matches().iter().filter(|m| m.played).count() as u32;
                prop_assert_eq!(total_played, 2 * matches_played);
            }
        }
    }
}
