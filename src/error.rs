//! Error types for gnip-cli
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! The binary maps each error to a process exit code via [`Error::exit_code`].

use thiserror::Error;

/// Exit code for network-level failures (connection, DNS, timeout)
pub const EXIT_TRANSPORT: i32 = 120;

/// Exit code for every other failure
pub const EXIT_FAILURE: i32 = 1;

/// The main error type for gnip-cli
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Pagination / Historical Errors
    // ============================================================================
    #[error("Pagination did not terminate: {reason} (after {pages} pages)")]
    InfiniteLoopDetected { reason: String, pages: u32 },

    #[error("Invalid Historical PowerTrack results manifest: {message}")]
    Manifest { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a results manifest error
    pub fn manifest(message: impl Into<String>) -> Self {
        Self::Manifest {
            message: message.into(),
        }
    }

    /// Create an infinite loop error
    pub fn infinite_loop(reason: impl Into<String>, pages: u32) -> Self {
        Self::InfiniteLoopDetected {
            reason: reason.into(),
            pages,
        }
    }

    /// Check if this is a network-level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        if self.is_transport() {
            EXIT_TRANSPORT
        } else {
            EXIT_FAILURE
        }
    }

    /// Check if a stream consumer should reconnect after this error.
    ///
    /// Client errors (bad credentials, malformed request) would fail the same
    /// way on every attempt, so only transport failures and 5xx qualify.
    pub fn is_reconnectable(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::HttpStatus { status, .. } => is_reconnectable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code warrants a stream reconnect
fn is_reconnectable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

/// Result type alias for gnip-cli
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("ACCOUNT_NAME");
        assert_eq!(
            err.to_string(),
            "Missing required config field: ACCOUNT_NAME"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::infinite_loop("token 'x' repeated", 2);
        assert_eq!(
            err.to_string(),
            "Pagination did not terminate: token 'x' repeated (after 2 pages)"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::config("bad").exit_code(), EXIT_FAILURE);
        assert_eq!(Error::http_status(500, "").exit_code(), EXIT_FAILURE);
        assert_eq!(Error::infinite_loop("x", 1).exit_code(), EXIT_FAILURE);
        assert!(!Error::manifest("no urlList").is_transport());
        assert_eq!(
            Error::manifest("no urlList").to_string(),
            "Invalid Historical PowerTrack results manifest: no urlList"
        );
    }

    #[test]
    fn test_is_reconnectable() {
        assert!(Error::http_status(503, "").is_reconnectable());
        assert!(Error::http_status(429, "").is_reconnectable());

        assert!(!Error::http_status(401, "").is_reconnectable());
        assert!(!Error::http_status(400, "").is_reconnectable());
        assert!(!Error::config("test").is_reconnectable());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
