use thiserror::Error;

/// A rejected parameter value. Callers log it and keep the previous value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("unknown function '{0}': expected sin, cos or tan")]
    UnknownFunction(String),

    #[error("invalid number for '{field}': '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("non-finite value for '{field}'")]
    NonFinite { field: &'static str },
}

pub type ParamResult<T> = Result<T, ParamError>;
