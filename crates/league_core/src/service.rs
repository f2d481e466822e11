//! Orchestration layer over the league aggregate.
//!
//! Owns a single `League` behind an explicit `RwLock` and a persistence
//! collaborator. Mutating operations hold the write lock end to end and run
//! on a clone of the aggregate; the clone is only swapped in after every
//! persist call succeeded, so a failing store never leaves memory ahead of
//! disk.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::Result;
use crate::league::League;
use crate::models::{default_teams, Match};
use crate::store::LeagueStore;
use crate::table::StandingsEntry;

pub struct LeagueService<S: LeagueStore> {
    league: RwLock<League>,
    store: S,
}

impl<S: LeagueStore> LeagueService<S> {
    pub fn new(league: League, store: S) -> Self {
        Self {
            league: RwLock::new(league),
            store,
        }
    }

    /// Restore the league from the store, or start a fresh season with the
    /// default teams when the store holds nothing yet.
    pub fn load(store: S, seed: u64) -> Result<Self> {
        let league = match store.load()? {
            Some(save) => {
                log::info!("restored league at week {}", save.current_week);
                League::from_save(&save, seed)
            }
            None => {
                log::info!("no saved league, starting a fresh season");
                League::new(default_teams(), seed)
            }
        };
        Ok(Self::new(league, store))
    }

    pub fn current_week(&self) -> u32 {
        self.league.read().expect("league lock poisoned").current_week()
    }

    pub fn season_complete(&self) -> bool {
        self.league.read().expect("league lock poisoned").season_complete()
    }

    pub fn current_standings(&self) -> Vec<StandingsEntry> {
        self.league
            .read()
            .expect("league lock poisoned")
            .standings()
            .to_vec()
    }

    pub fn matches_for(&self, week: Option<u32>) -> Vec<Match> {
        self.league.read().expect("league lock poisoned").matches_for(week)
    }

    pub fn team_name(&self, team_id: u32) -> Option<String> {
        self.league
            .read()
            .expect("league lock poisoned")
            .teams()
            .iter()
            .find(|t| t.id == team_id)
            .map(|t| t.name.clone())
    }

    /// Simulate the next week and persist its outcome.
    pub fn advance_week(&self) -> Result<Vec<StandingsEntry>> {
        let mut guard = self.league.write().expect("league lock poisoned");
        let mut working = guard.clone();
        let week_before = working.current_week();

        working.advance_week()?;
        self.persist_weeks(&working, week_before)?;

        let standings = working.standings().to_vec();
        *guard = working;
        Ok(standings)
    }

    /// Simulate every remaining week and persist all of them.
    pub fn advance_to_completion(&self) -> Result<Vec<StandingsEntry>> {
        let mut guard = self.league.write().expect("league lock poisoned");
        let mut working = guard.clone();
        let week_before = working.current_week();

        working.advance_to_completion();
        self.persist_weeks(&working, week_before)?;

        let standings = working.standings().to_vec();
        *guard = working;
        Ok(standings)
    }

    /// Replace a recorded result and persist the reconciled state.
    pub fn correct_result(
        &self,
        match_id: u32,
        home_score: u8,
        away_score: u8,
    ) -> Result<Vec<StandingsEntry>> {
        let mut guard = self.league.write().expect("league lock poisoned");
        let mut working = guard.clone();
        working.correct_result(match_id, home_score, away_score)?;

        let corrected = working
            .matches()
            .iter()
            .find(|m| m.id == match_id)
            .cloned()
            .expect("corrected match vanished from fixture set");
        self.store.persist_match(&corrected)?;
        for team in working.teams() {
            if corrected.involves(team.id) {
                self.store.persist_team(team)?;
            }
        }

        let standings = working.standings().to_vec();
        *guard = working;
        Ok(standings)
    }

    pub fn predict_outcome(&self) -> BTreeMap<String, f64> {
        self.league
            .read()
            .expect("league lock poisoned")
            .predict_title_chances()
    }

    /// Persist the new week counter, every match played since `week_before`
    /// and the team ledgers.
    ///
    /// The counter goes first: the durable copy must never hold played
    /// matches its counter has not reached, or a restart would report
    /// `NoMoreMatches` with weeks still left. An interrupted persist in the
    /// other direction (counter ahead of unplayed matches) is rolled back
    /// when the save is restored.
    fn persist_weeks(&self, working: &League, week_before: u32) -> Result<()> {
        self.store.persist_week(working.current_week())?;
        for m in working.matches() {
            if m.played && m.week > week_before {
                self.store.persist_match(m)?;
            }
        }
        for team in working.teams() {
            self.store.persist_team(team)?;
        }
        Ok(())
    }
}
