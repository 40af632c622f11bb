//! Input validation
//!
//! Two levels: [`validate_input`] is the minimal check the store repeats before
//! accepting anything, [`validate_form`] is the stricter per-field rule set a
//! form front-end shows to the user.

use crate::consts::{NAME_MAX_CHARS, NAME_MIN_CHARS, SCORE_MAX, SCORE_MIN, TIME_MAX, TIME_MIN};
use crate::error::ValidationError;
use crate::submission::SubmissionInput;

fn score_in_range(score: f64) -> bool {
    score.is_finite() && (SCORE_MIN..=SCORE_MAX).contains(&score)
}

fn time_in_range(time: f64) -> bool {
    time.is_finite() && (TIME_MIN..=TIME_MAX).contains(&time)
}

/// Store-side check: trimmed name present, score and time in range.
/// Stops at the first problem.
pub fn validate_input(input: &SubmissionInput) -> Result<(), ValidationError> {
    if input.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !score_in_range(input.score) {
        return Err(ValidationError::ScoreOutOfRange(input.score));
    }
    if !time_in_range(input.time) {
        return Err(ValidationError::TimeOutOfRange(input.time));
    }
    Ok(())
}

/// Form rules: name of 2-50 letters/spaces, plus the range checks.
/// Returns one error per failing field so all of them can be shown at once.
pub fn validate_form(input: &SubmissionInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let name = input.name.trim();
    let len = name.chars().count();
    if len == 0 {
        errors.push(ValidationError::EmptyName);
    } else if len < NAME_MIN_CHARS {
        errors.push(ValidationError::NameTooShort { min: NAME_MIN_CHARS });
    } else if len > NAME_MAX_CHARS {
        errors.push(ValidationError::NameTooLong { max: NAME_MAX_CHARS });
    } else if !name.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        errors.push(ValidationError::InvalidNameCharacters);
    }

    if !score_in_range(input.score) {
        errors.push(ValidationError::ScoreOutOfRange(input.score));
    }
    if !time_in_range(input.time) {
        errors.push(ValidationError::TimeOutOfRange(input.time));
    }

    errors
}
