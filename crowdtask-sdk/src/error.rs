//! SDK error types and handling
//!
//! Service faults carry an error code and message; they are surfaced
//! unchanged as [`SdkError::ApiError`].

use aws_sdk_mturk::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError as AwsSdkError};
use crowdtask_core::CoreError;
use thiserror::Error;

/// Error codes that signal bad or missing credentials.
const AUTH_ERROR_CODES: &[&str] = &[
    "UnrecognizedClientException",
    "InvalidSignatureException",
    "IncompleteSignature",
    "MissingAuthenticationToken",
    "ExpiredTokenException",
    "AccessDeniedException",
];

const REQUEST_ID_HEADER: &str = "x-amzn-requestid";

/// The main error type for the SDK
#[derive(Error, Debug)]
pub enum SdkError {
    /// The marketplace rejected the request
    #[error("API error: {status} - {message}")]
    ApiError {
        status: u16,
        error_type: Option<String>,
        message: String,
        request_id: Option<String>,
    },

    /// The request never produced a service response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Credentials were refused
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// No credentials could be resolved
    #[error("Marketplace connection is not configured: {0}")]
    NotConfigured(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Environment could not be loaded
    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// A request could not be assembled
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An assignment's answer document is not well-formed
    #[error("Invalid answer document: {0}")]
    AnswerDocument(String),

    /// Validation or decoding failure raised by the core crate
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for SDK operations
pub type SdkResult<T> = Result<T, SdkError>;

impl SdkError {
    /// Build the error for a service fault.
    pub fn from_service(
        status: u16,
        code: Option<&str>,
        message: Option<&str>,
        request_id: Option<String>,
    ) -> Self {
        let message = message
            .map(str::to_string)
            .unwrap_or_else(|| format!("request failed with status {status}"));

        if status == 401 || code.is_some_and(|c| AUTH_ERROR_CODES.contains(&c)) {
            return SdkError::AuthenticationError(message);
        }

        SdkError::ApiError {
            status,
            error_type: code.map(str::to_string),
            message,
            request_id,
        }
    }

    /// Whether repeating the same call may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            SdkError::Transport(_) | SdkError::Timeout => true,
            SdkError::ApiError {
                status, error_type, ..
            } => *status >= 500 || error_type.as_deref() == Some("ServiceFault"),
            _ => false,
        }
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SdkError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the request ID if available
    pub fn request_id(&self) -> Option<&str> {
        match self {
            SdkError::ApiError { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }
}

impl<E> From<AwsSdkError<E>> for SdkError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    fn from(err: AwsSdkError<E>) -> Self {
        match &err {
            AwsSdkError::ServiceError(context) => {
                let raw = context.raw();
                let request_id = raw.headers().get(REQUEST_ID_HEADER).map(str::to_string);
                SdkError::from_service(
                    raw.status().as_u16(),
                    context.err().code(),
                    context.err().message(),
                    request_id,
                )
            }
            AwsSdkError::TimeoutError(_) => SdkError::Timeout,
            AwsSdkError::DispatchFailure(failure) if failure.is_timeout() => SdkError::Timeout,
            _ => SdkError::Transport(DisplayErrorContext(&err).to_string()),
        }
    }
}
