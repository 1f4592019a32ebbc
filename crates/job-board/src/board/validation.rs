use super::error::BoardError;

/// Reject blank text, naming the offending field.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), BoardError> {
    if value.trim().is_empty() {
        return Err(BoardError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Same as [`require_text`] for merge updates, where `None` means "leave unchanged".
pub(crate) fn require_optional_text(field: &str, value: Option<&str>) -> Result<(), BoardError> {
    match value {
        Some(value) => require_text(field, value),
        None => Ok(()),
    }
}

pub(crate) fn require_year_order(
    start_field: &str,
    start: u32,
    end_field: &str,
    end: u32,
) -> Result<(), BoardError> {
    if end < start {
        return Err(BoardError::validation(format!(
            "{end_field} ({end}) must not be earlier than {start_field} ({start})"
        )));
    }
    Ok(())
}

pub(crate) fn require_gpa(gpa: f64) -> Result<(), BoardError> {
    if !(0.0..=4.0).contains(&gpa) {
        return Err(BoardError::validation(format!(
            "gpa must be between 0.0 and 4.0, got {gpa}"
        )));
    }
    Ok(())
}
