//! Deterministic simulation core for a four-team double round-robin league.
//!
//! The crate simulates a six-week season: fixtures are generated up front,
//! each week's matches get strength-based scorelines, the table is rebuilt
//! after every change, and a weighted predictor estimates title chances.
//! All randomness flows through a seeded RNG, so a seed fixes the whole
//! season.
//!
//! `League` is the aggregate; `LeagueService` wraps it behind an explicit
//! lock together with a `LeagueStore` persistence collaborator; `api`
//! provides the JSON boundary consumed by frontends.

pub mod api;
pub mod engine;
pub mod error;
pub mod league;
pub mod models;
pub mod predictor;
pub mod schedule;
pub mod service;
pub mod store;
pub mod table;

pub use error::{LeagueError, Result};
pub use league::League;
pub use models::{default_teams, Match, Team};
pub use service::LeagueService;
pub use store::{JsonFileStore, LeagueStore, MemoryStore, StoreError};
pub use table::StandingsEntry;

/// Crate version, exposed for frontends.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
