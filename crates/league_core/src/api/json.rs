//! Serialized views over the service operations.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{LeagueError, Result};
use crate::service::LeagueService;
use crate::store::LeagueStore;

/// Upper bound a corrected scoreline may carry. Wide enough for any real
/// result while still rejecting garbage input.
pub const MAX_SCORE: i64 = 99;

/// Body of a result-correction request. Scores arrive as signed integers so
/// that negative input is rejected with a useful error instead of failing
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionRequest {
    pub match_id: u32,
    pub home_score: i64,
    pub away_score: i64,
}

fn render(doc: &serde_json::Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc).map_err(crate::store::StoreError::from)?)
}

/// Validate a caller-supplied score into the engine's range. Every frontend
/// routes corrections through this bound, so the contract is enforced once.
pub fn validate_score(value: i64) -> Result<u8> {
    if (0..=MAX_SCORE).contains(&value) {
        Ok(value as u8)
    } else {
        Err(LeagueError::InvalidScore { value })
    }
}

/// Uniform error body for every boundary function.
pub fn error_json(err: &LeagueError) -> String {
    json!({
        "error": err.to_string(),
        "code": err.code(),
    })
    .to_string()
}

/// The current table, plus where the season stands.
pub fn standings_json<S: LeagueStore>(service: &LeagueService<S>) -> Result<String> {
    let doc = json!({
        "current_week": service.current_week(),
        "season_complete": service.season_complete(),
        "standings": service.current_standings(),
    });
    render(&doc)
}

/// All matches, or one week's worth.
pub fn matches_json<S: LeagueStore>(
    service: &LeagueService<S>,
    week: Option<u32>,
) -> Result<String> {
    let doc = json!({
        "week": week,
        "matches": service.matches_for(week),
    });
    render(&doc)
}

/// Simulate the next week; the response carries the week's results and the
/// refreshed table.
pub fn advance_week_json<S: LeagueStore>(service: &LeagueService<S>) -> Result<String> {
    let standings = service.advance_week()?;
    let week = service.current_week();
    let doc = json!({
        "week": week,
        "results": service.matches_for(Some(week)),
        "standings": standings,
    });
    render(&doc)
}

/// Simulate every remaining week and return the final table.
pub fn play_all_json<S: LeagueStore>(service: &LeagueService<S>) -> Result<String> {
    let standings = service.advance_to_completion()?;
    let doc = json!({
        "current_week": service.current_week(),
        "season_complete": service.season_complete(),
        "standings": standings,
    });
    render(&doc)
}

/// Apply a result correction after validating both scorelines.
pub fn correct_result_json<S: LeagueStore>(
    service: &LeagueService<S>,
    request: &CorrectionRequest,
) -> Result<String> {
    let home = validate_score(request.home_score)?;
    let away = validate_score(request.away_score)?;
    let standings = service.correct_result(request.match_id, home, away)?;

    let doc = json!({
        "match_id": request.match_id,
        "standings": standings,
    });
    render(&doc)
}

/// Title chances per team.
pub fn predictions_json<S: LeagueStore>(service: &LeagueService<S>) -> Result<String> {
    let doc = json!({
        "current_week": service.current_week(),
        "predictions": service.predict_outcome(),
    });
    render(&doc)
}
