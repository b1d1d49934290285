use crate::error::{Result, SyncError};

/// Parses a high score typed by the user.
///
/// Surrounding whitespace is ignored; the rest must be an integer that fits in `i64`.
pub fn parse_high_score(input: &str) -> Result<i64> {
    input.trim().parse::<i64>().map_err(|e| {
        SyncError::Validation(format!("High score {input:?} is not an integer: {e}"))
    })
}

/// Checks the user id handed over by the identity provider.
///
/// Only emptiness is checked; the id is otherwise opaque.
pub fn validate_user_id(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(SyncError::Configuration(
            "user id is required but was empty".to_string(),
        ));
    }
    Ok(())
}
