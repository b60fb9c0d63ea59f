//! Validation helpers
//!
//! Small guards that turn a missing value or a false condition into a
//! `ValidationError` instead of panicking. Callers propagate with `?`.

use thiserror::Error;

/// A violated precondition, optionally explaining what was expected.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
#[error("{}", .message.as_deref().unwrap_or("precondition violated"))]
pub struct ValidationError {
    message: Option<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Unwrap a value that must be present.
pub fn not_null<T>(value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or_else(ValidationError::default)
}

/// Unwrap a value that must be present, explaining why it may be missing.
pub fn not_null_or<T>(value: Option<T>, message: &str) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::new(message))
}

/// Require that `expression` holds.
pub fn ensure(expression: bool) -> Result<(), ValidationError> {
    if expression {
        Ok(())
    } else {
        Err(ValidationError::default())
    }
}

/// Require that `expression` holds, explaining why it may not.
pub fn ensure_or(expression: bool, message: &str) -> Result<(), ValidationError> {
    if expression {
        Ok(())
    } else {
        Err(ValidationError::new(message))
    }
}
