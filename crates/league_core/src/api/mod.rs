//! JSON boundary for the service layer.
//!
//! Each function takes a service and returns a serialized document, so any
//! transport (the CLI today, a network frontend later) gets identical
//! payloads and identical error bodies.

pub mod json;

pub use json::{
    advance_week_json, correct_result_json, error_json, matches_json, play_all_json,
    predictions_json, standings_json, validate_score, CorrectionRequest, MAX_SCORE,
};
