use thiserror::Error;

use crate::store::StoreError;

/// Every failure the simulation core can surface. All variants are
/// recoverable by the caller retrying or supplying corrected input.
#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("match {id} not found")]
    MatchNotFound { id: u32 },

    #[error("invalid score: {value}")]
    InvalidScore { value: i64 },

    #[error("no more matches to simulate at week {week}")]
    NoMoreMatches { week: u32 },

    #[error("match {id} has not been played yet")]
    MatchNotYetPlayed { id: u32 },

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl LeagueError {
    /// Stable code for the JSON boundary.
    pub fn code(&self) -> &'static str {
        match self {
            LeagueError::MatchNotFound { .. } => "match_not_found",
            LeagueError::InvalidScore { .. } => "invalid_score",
            LeagueError::NoMoreMatches { .. } => "no_more_matches",
            LeagueError::MatchNotYetPlayed { .. } => "match_not_yet_played",
            LeagueError::Storage(_) => "storage",
        }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
