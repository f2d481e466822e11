//! In-memory store for tests. Can be armed to fail every write in order to
//! exercise the persistence-error path.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use super::error::StoreError;
use super::format::LeagueSave;
use super::LeagueStore;
use crate::models::{Match, Team};

pub struct MemoryStore {
    state: Mutex<Option<LeagueSave>>,
    /// Persist calls left before the store starts failing; negative means
    /// it never fails.
    writes_before_failure: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            state: Mutex::new(None),
            writes_before_failure: AtomicI64::new(-1),
        }
    }
}

impl MemoryStore {
    /// Empty store: `load` reports a first run.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(save: LeagueSave) -> Self {
        Self {
            state: Mutex::new(Some(save)),
            ..Self::default()
        }
    }

    /// Make every subsequent persist call fail with `StoreError::Unavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.writes_before_failure
            .store(if fail { 0 } else { -1 }, Ordering::SeqCst);
    }

    /// Let the next `count` persist calls succeed, then fail every one
    /// after, simulating a store that dies mid-sequence.
    pub fn fail_after_writes(&self, count: u32) {
        self.writes_before_failure
            .store(i64::from(count), Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Option<LeagueSave> {
        self.state.lock().expect("memory store lock poisoned").clone()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        match self.writes_before_failure.load(Ordering::SeqCst) {
            n if n < 0 => Ok(()),
            0 => Err(StoreError::Unavailable),
            _ => {
                self.writes_before_failure.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            }
        }
    }
}

impl LeagueStore for MemoryStore {
    fn load(&self) -> Result<Option<LeagueSave>, StoreError> {
        Ok(self.snapshot())
    }

    fn persist_match(&self, m: &Match) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut guard = self.state.lock().expect("memory store lock poisoned");
        let state = guard.get_or_insert_with(LeagueSave::bootstrap);
        if let Some(slot) = state.matches.iter_mut().find(|x| x.id == m.id) {
            *slot = m.clone();
        } else {
            state.matches.push(m.clone());
        }
        Ok(())
    }

    fn persist_team(&self, team: &Team) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut guard = self.state.lock().expect("memory store lock poisoned");
        let state = guard.get_or_insert_with(LeagueSave::bootstrap);
        if let Some(slot) = state.teams.iter_mut().find(|t| t.id == team.id) {
            *slot = team.clone();
        } else {
            state.teams.push(team.clone());
        }
        Ok(())
    }

    fn persist_week(&self, week: u32) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut guard = self.state.lock().expect("memory store lock poisoned");
        guard.get_or_insert_with(LeagueSave::bootstrap).current_week = week;
        Ok(())
    }
}
