//! Validation rules applied to caller input before it reaches the service.
//!
//! The rules are pure predicates: a required text field must be present and
//! contain at least one non-whitespace character.

use std::fmt;

/// Name of the title field in notebook and note representations.
pub const TITLE_FIELD: &str = "title";

/// Name of the id field in update representations.
pub const ID_FIELD: &str = "id";

/// A required field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The field was absent or null.
    Missing {
        /// Offending field name.
        field: &'static str,
    },
    /// The field was empty or whitespace only.
    Blank {
        /// Offending field name.
        field: &'static str,
    },
}

impl ValidationError {
    /// The name of the field that failed.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Missing { field } | Self::Blank { field } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::Blank { field } => write!(f, "{} must not be blank", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Require a non-blank text value for `field`, returning it unchanged.
///
/// # Errors
///
/// [`ValidationError::Missing`] for `None`, [`ValidationError::Blank`] when
/// the value trims to the empty string.
pub fn require_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::Missing { field }),
        Some(v) if v.trim().is_empty() => Err(ValidationError::Blank { field }),
        Some(v) => Ok(v),
    }
}

/// Require a non-blank `title`.
///
/// # Errors
///
/// See [`require_text`].
pub fn require_title(value: Option<String>) -> Result<String, ValidationError> {
    require_text(TITLE_FIELD, value)
}

/// Require a non-blank `id`.
///
/// # Errors
///
/// See [`require_text`].
pub fn require_id(value: Option<String>) -> Result<String, ValidationError> {
    require_text(ID_FIELD, value)
}
