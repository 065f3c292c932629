use thiserror::Error;

/// Request-level failures. Anything that goes wrong with a single feature or
/// coordinate is reported as a [`crate::CoordinateWarning`] instead.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing required field '{field}' at {path}")]
    MissingField { field: &'static str, path: String },

    #[error("Malformed request body: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error("Internal error while converting stations")]
    Internal(String),
}

impl ConversionError {
    /// Whether the caller sent something we cannot convert, as opposed to a
    /// fault on our side.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ConversionError::Internal(_))
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
