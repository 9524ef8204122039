// --- File: crates/smsify_common/src/error.rs ---
use thiserror::Error;

/// The base error type for all Smsify errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// Each crate can extend this by implementing From<SpecificError> for SmsifyError.
#[derive(Error, Debug)]
pub enum SmsifyError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a conflict (e.g., resource already exists)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SmsifyError {
    fn status_code(&self) -> u16 {
        match self {
            SmsifyError::ConfigError(_) => 500,
            SmsifyError::ValidationError(_) => 400,
            SmsifyError::ParseError(_) => 400,
            SmsifyError::ExternalServiceError { .. } => 502,
            SmsifyError::ConflictError(_) => 409,
            SmsifyError::InternalError(_) => 500,
        }
    }
}

/// Creates a validation error with the given message.
pub fn validation_error(message: impl Into<String>) -> SmsifyError {
    SmsifyError::ValidationError(message.into())
}

/// Creates a conflict error with the given message.
pub fn conflict(message: impl Into<String>) -> SmsifyError {
    SmsifyError::ConflictError(message.into())
}

/// Creates a configuration error with the given message.
pub fn config_error(message: impl Into<String>) -> SmsifyError {
    SmsifyError::ConfigError(message.into())
}

/// Creates an external service error for the given service.
pub fn external_service_error(
    service_name: impl Into<String>,
    message: impl Into<String>,
) -> SmsifyError {
    SmsifyError::ExternalServiceError {
        service_name: service_name.into(),
        message: message.into(),
    }
}
