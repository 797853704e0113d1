//! Error types for configuration building

use thiserror::Error;

/// Result type alias for configuration operations
pub type ConfResult<T> = Result<T, ConfError>;

/// Configuration building errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfError {
    /// No builder registered under this name or type tag
    #[error("Unknown configuration: {0}")]
    Unknown(String),

    /// A required parameter was not supplied
    #[error("{conf}: missing parameter '{param}'")]
    MissingParam {
        conf: &'static str,
        param: &'static str,
    },

    /// A parameter value is outside its domain
    #[error("{conf}: invalid parameter '{param}': {message}")]
    InvalidParam {
        conf: &'static str,
        param: &'static str,
        message: String,
    },

    /// The JSON document is malformed or lacks a type tag
    #[error("JSON error: {0}")]
    Json(String),
}

impl ConfError {
    /// Create an invalid parameter error
    pub fn invalid(conf: &'static str, param: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParam {
            conf,
            param,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ConfError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

/// Unwrap a required parameter
pub(crate) fn require<T: Clone>(
    value: &Option<T>,
    conf: &'static str,
    param: &'static str,
) -> ConfResult<T> {
    value.clone().ok_or(ConfError::MissingParam { conf, param })
}
