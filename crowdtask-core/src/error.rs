use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A raw answer could not be converted into the field's value type.
    #[error("Coercion error: cannot read {value:?} for question {question} as {expected}")]
    Coercion {
        question: String,
        value: String,
        expected: &'static str,
    },

    /// A mandatory task field is missing. Only the first missing field is reported.
    #[error("Validation error: task is missing {0}")]
    Validation(String),

    #[error("Unknown answer field: {0}")]
    UnknownField(String),

    #[error("Invalid HIT given.")]
    InvalidHit,

    #[error("None HIT id for disposal.")]
    MissingHitId,
}

impl CoreError {
    pub fn coercion(question: &str, value: impl Into<String>, expected: &'static str) -> Self {
        CoreError::Coercion {
            question: question.to_string(),
            value: value.into(),
            expected,
        }
    }

    pub fn missing_field(field: &str) -> Self {
        CoreError::Validation(field.to_string())
    }

    /// Name of the missing task field, when this is a validation error.
    pub fn missing_field_name(&self) -> Option<&str> {
        match self {
            CoreError::Validation(field) => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
