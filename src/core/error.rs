use thiserror::Error;

/// Errors that can occur while composing, validating or assembling an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FawtaraError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// A line-item edit could not be applied (bad index, last row).
    #[error("edit error: {0}")]
    Edit(String),

    /// An amount left the representable `Decimal` range.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// Date cannot be expressed in the Hijri calendar.
    #[error("calendar error: {0}")]
    Calendar(String),

    /// Invoice is not in a state that can be assembled into a document.
    #[error("assembly error: {0}")]
    Assembly(String),

    /// QR payload encoding or decoding failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Invoice defaults could not be loaded.
    #[error("config error: {0}")]
    Config(String),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "buyer.vat_number").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Business rule ID if applicable (e.g. "BR-16").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule ID.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error with a business rule ID.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

/// Join validation errors into one message, `"; "` separated.
pub fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
