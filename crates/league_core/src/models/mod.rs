pub mod fixture;
pub mod team;

pub use fixture::Match;
pub use team::{default_teams, Team};
