//! Match outcome engine.
//!
//! Rolls a scoreline from the two sides' strength ratings and applies it to
//! both ledgers. This is the single place where a result changes standings;
//! result correction inverts exactly the effect recorded here.

use rand::Rng;

use crate::models::{Match, Team};

/// Additive strength bonus for the home side.
pub const HOME_ADVANTAGE: f64 = 5.0;
/// Strength 0-100 scales into an expected-goal baseline of 0.5-4.5.
pub const ATTACK_SCALE: f64 = 4.0;
pub const ATTACK_FLOOR: f64 = 0.5;
/// Symmetric uniform noise added to each side's intensity.
pub const NOISE_RANGE: f64 = 1.0;
/// Per-side scoreline cap.
pub const MAX_GOALS: u8 = 6;

fn expected_goals(strength: f64) -> f64 {
    strength / 100.0 * ATTACK_SCALE + ATTACK_FLOOR
}

/// Roll a scoreline for a pairing: baseline from strength (home side gets
/// the home-advantage bonus first), plus noise, floored at zero, rounded to
/// the nearest goal and capped at [`MAX_GOALS`].
pub fn roll_scoreline<R: Rng>(home: &Team, away: &Team, rng: &mut R) -> (u8, u8) {
    let home_attack = expected_goals(f64::from(home.strength) + HOME_ADVANTAGE);
    let away_attack = expected_goals(f64::from(away.strength));

    let home_intensity = (home_attack + rng.gen_range(-NOISE_RANGE..=NOISE_RANGE)).max(0.0);
    let away_intensity = (away_attack + rng.gen_range(-NOISE_RANGE..=NOISE_RANGE)).max(0.0);

    let home_goals = (home_intensity.round() as u8).min(MAX_GOALS);
    let away_goals = (away_intensity.round() as u8).min(MAX_GOALS);

    (home_goals, away_goals)
}

/// Simulate one match in place and apply the result to both ledgers.
/// A no-op on an already-played match.
pub fn play_match<R: Rng>(m: &mut Match, home: &mut Team, away: &mut Team, rng: &mut R) {
    if m.played {
        return;
    }

    debug_assert_eq!(m.home_id, home.id);
    debug_assert_eq!(m.away_id, away.id);

    let (home_goals, away_goals) = roll_scoreline(home, away, rng);

    m.home_score = home_goals;
    m.away_score = away_goals;
    m.played = true;

    home.record_result(home_goals, away_goals);
    away.record_result(away_goals, home_goals);

    log::debug!(
        "match {}: {} {} - {} {}",
        m.id,
        home.name,
        home_goals,
        away_goals,
        away.name
    );
}
