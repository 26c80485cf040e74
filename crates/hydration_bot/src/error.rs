//! Error types for the bot and its engine.

use std::fmt;

use thiserror::Error;

/// What kind of user input failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Profile text does not split into sex, age, weight and height.
    MalformedProfile,
    /// A quantity (grams, minutes, millilitres) is not a usable number.
    MalformedAmount,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::MalformedProfile => f.write_str("malformed profile"),
            ValidationErrorKind::MalformedAmount => f.write_str("malformed amount"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub detail: String,
}

impl ValidationError {
    pub fn malformed_profile(detail: impl Into<String>) -> Self {
        Self {
            kind: ValidationErrorKind::MalformedProfile,
            detail: detail.into(),
        }
    }

    pub fn malformed_amount(detail: impl Into<String>) -> Self {
        Self {
            kind: ValidationErrorKind::MalformedAmount,
            detail: detail.into(),
        }
    }
}

/// Bot errors.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Lookup error: {0}")]
    Provider(#[from] hydration_client::ProviderError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("No profile stored for user {0}")]
    ProfileMissing(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for bot operations.
pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_includes_kind_and_detail() {
        let e = ValidationError::malformed_profile("age `thirty` is not an integer");
        assert_eq!(
            e.to_string(),
            "malformed profile: age `thirty` is not an integer"
        );
    }

    #[test]
    fn provider_errors_convert() {
        let e: BotError = hydration_client::ProviderError::NotFound("Atlantis".into()).into();
        assert!(matches!(e, BotError::Provider(_)));
        assert!(e.to_string().contains("Atlantis"));
    }
}
