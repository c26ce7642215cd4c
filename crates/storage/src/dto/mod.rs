pub mod game;
pub mod participant;
pub mod score;
pub mod statistics;
pub mod team;

use validator::ValidationError;

/// Names are stored trimmed, so whitespace alone counts as missing
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Must not be blank".into());
        return Err(error);
    }
    Ok(())
}
