//! JSON file-backed store with atomic whole-file rewrites.

use std::fs::{rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::error::StoreError;
use super::format::{LeagueSave, SAVE_VERSION};
use super::LeagueStore;
use crate::models::{Match, Team};

/// Keeps the full save in memory and rewrites the file on every persist
/// call. The state is small (four teams, twelve matches), so a whole-file
/// rewrite per entity is cheaper than partial updates would be to get right.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<LeagueSave>,
}

impl JsonFileStore {
    /// Open an existing store, or bootstrap a fresh one with the default
    /// teams and generated fixtures.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let state = if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            let save: LeagueSave = serde_json::from_str(&data)?;
            if save.version != SAVE_VERSION {
                return Err(StoreError::VersionMismatch {
                    found: save.version,
                    expected: SAVE_VERSION,
                });
            }
            save
        } else {
            let save = LeagueSave::bootstrap();
            Self::write_file(&path, &save)?;
            log::info!("bootstrapped league store at {}", path.display());
            save
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    fn write_file(path: &Path, save: &LeagueSave) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_string_pretty(save)?;

        // Atomic save: write to temp file, then rename.
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(data.as_bytes())?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, path)?;

        log::debug!("wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}

impl LeagueStore for JsonFileStore {
    fn load(&self) -> Result<Option<LeagueSave>, StoreError> {
        let state = self.state.lock().expect("league store lock poisoned");
        Ok(Some(state.clone()))
    }

    fn persist_match(&self, m: &Match) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("league store lock poisoned");
        if let Some(slot) = state.matches.iter_mut().find(|x| x.id == m.id) {
            *slot = m.clone();
        } else {
            state.matches.push(m.clone());
        }
        Self::write_file(&self.path, &state)
    }

    fn persist_team(&self, team: &Team) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("league store lock poisoned");
        if let Some(slot) = state.teams.iter_mut().find(|t| t.id == team.id) {
            *slot = team.clone();
        } else {
            state.teams.push(team.clone());
        }
        Self::write_file(&self.path, &state)
    }

    fn persist_week(&self, week: u32) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("league store lock poisoned");
        state.current_week = week;
        Self::write_file(&self.path, &state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_bootstraps_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("league.json");

        let store = JsonFileStore::open(&path).unwrap();

        assert!(path.exists());
        let save = store.load().unwrap().unwrap();
        assert_eq!(save.teams.len(), 4);
        assert_eq!(save.matches.len(), 12);
        assert_eq!(save.current_week, 0);
    }

    #[test]
    fn test_persist_and_reopen_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("league.json");

        {
            let store = JsonFileStore::open(&path).unwrap();
            let mut save = store.load().unwrap().unwrap();

            save.matches[0].home_score = 3;
            save.matches[0].away_score = 1;
            save.matches[0].played = true;
            save.teams[0].record_result(3, 1);
            save.teams[1].record_result(1, 3);

            store.persist_match(&save.matches[0]).unwrap();
            store.persist_team(&save.teams[0]).unwrap();
            store.persist_team(&save.teams[1]).unwrap();
            store.persist_week(1).unwrap();
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        let save = reopened.load().unwrap().unwrap();

        assert_eq!(save.current_week, 1);
        assert!(save.matches[0].played);
        assert_eq!((save.matches[0].home_score, save.matches[0].away_score), (3, 1));
        assert_eq!(save.teams[0].points, 3);
        assert_eq!(save.teams[1].losses, 1);
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("league.json");

        let mut save = LeagueSave::bootstrap();
        save.version = 99;
        std::fs::write(&path, serde_json::to_string(&save).unwrap()).unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(
            err,
            StoreError::VersionMismatch { found: 99, expected: SAVE_VERSION }
        ));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("league.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.persist_week(3).unwrap();

        assert!(!path.with_extension("tmp").exists());
    }
}
