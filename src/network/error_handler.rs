//! Centralized error classification for backend calls

use crate::backend::error::BackendError;
use crate::logging::LogLevel;

/// Centralized error handler for all backend operations
#[derive(Debug, Clone, Default)]
pub struct ErrorHandler;

impl ErrorHandler {
    pub fn new() -> Self {
        Self
    }

    /// Classify error and determine appropriate log level
    pub fn classify_error(&self, error: &BackendError) -> LogLevel {
        match error {
            // Rate limiting - low priority
            BackendError::Http { status, .. } if *status == 429 => LogLevel::Debug,

            // Server errors - temporary issues
            BackendError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Authentication errors - critical
            BackendError::Http { status, .. } if *status == 401 => LogLevel::Error,
            BackendError::Http { status, .. } if *status == 403 => LogLevel::Error,

            // Network issues - usually temporary
            BackendError::Reqwest(_) => LogLevel::Warn,

            // Unexpected payloads keep the previous board; worth a warning
            BackendError::Decode(_) => LogLevel::Warn,

            // Other errors
            _ => LogLevel::Warn,
        }
    }

    /// Whether the next scheduled refresh can be expected to fix the error
    pub fn is_transient(&self, error: &BackendError) -> bool {
        !error.is_auth_failure()
    }
}
