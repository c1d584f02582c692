//! Input validation for insert and patch payloads

use thiserror::Error;

/// Longest accepted comment body, in characters
pub const MAX_COMMENT_LEN: usize = 500;

/// Longest accepted video caption, in characters
pub const MAX_CAPTION_LEN: usize = 2200;

/// A payload failed schema validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} must not be blank")]
    Blank(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{0}")]
    Invalid(String),
}

/// Schema check run on every request payload before it reaches storage
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Reject empty or whitespace-only text
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(())
}

/// Reject text longer than `max` characters
pub fn limit_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Unwrap a required identifier from an optional request field
pub fn require_id<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(ValidationError::Blank(field)),
        None => Err(ValidationError::Missing(field)),
    }
}
