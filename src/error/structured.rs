//! Structured error output.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - HTTP status and process exit code per category
//! - Hints for self-correction
//! - Context for debugging

use crate::error::TrackingError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Machine-readable error codes.
///
/// These codes are stable and can be used for programmatic error handling.
/// Format: `SCREAMING_SNAKE_CASE` for easy parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Database Errors (exit code 2) ===
    /// Database already exists
    AlreadyInitialized,
    /// Database operation failed
    DatabaseError,

    // === Issue Errors (exit code 3) ===
    /// Issue with specified ID not found
    IssueNotFound,
    /// Store mutation received an unusable entity
    InvalidArgument,

    // === Request Errors (exit code 4) ===
    /// Anti-forgery token rejected
    AntiForgery,

    // === Config Errors (exit code 7) ===
    /// Configuration error
    ConfigError,

    // === I/O Errors (exit code 8) ===
    /// File I/O error
    IoError,
    /// JSON serialization error
    JsonError,
    /// YAML parsing error
    YamlError,

    // === Internal Errors (exit code 1) ===
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyInitialized => "ALREADY_INITIALIZED",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::IssueNotFound => "ISSUE_NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::AntiForgery => "ANTI_FORGERY",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::YamlError => "YAML_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller might succeed by fixing input and retrying.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::AntiForgery)
    }

    /// Get the exit code for this error category.
    ///
    /// - 1: Internal/unknown errors
    /// - 2: Database errors
    /// - 3: Issue errors
    /// - 4: Rejected requests
    /// - 7: Config errors
    /// - 8: I/O errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::AlreadyInitialized | Self::DatabaseError => 2,
            Self::IssueNotFound | Self::InvalidArgument => 3,
            Self::AntiForgery => 4,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError | Self::YamlError => 8,
            Self::InternalError => 1,
        }
    }

    /// HTTP status code used when this error reaches the web boundary.
    ///
    /// Store-level argument errors are fatal, not user recoverable, so they
    /// surface as 500 like any other unexpected failure.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::IssueNotFound => 404,
            Self::AntiForgery => 400,
            _ => 500,
        }
    }
}

/// Structured error for machine-parseable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether the operation can be retried
    pub retryable: bool,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `TrackingError`.
    #[must_use]
    pub fn from_error(err: &TrackingError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);
        let hint = Self::generate_hint(err);

        Self {
            code,
            message: err.to_string(),
            hint,
            retryable: code.is_retryable(),
            context,
        }
    }

    /// Format as JSON for machine output.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "retryable": self.retryable,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }

        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                output.push_str("\x1b[33mHint:\x1b[0m ");
            } else {
                output.push_str("Hint: ");
            }
            output.push_str(hint);
        }

        output
    }

    fn extract_code_and_context(err: &TrackingError) -> (ErrorCode, Option<Value>) {
        match err {
            TrackingError::AlreadyInitialized { path } => (
                ErrorCode::AlreadyInitialized,
                Some(json!({"path": path.display().to_string()})),
            ),
            TrackingError::Database(_) => (ErrorCode::DatabaseError, None),
            TrackingError::IssueNotFound { id } => {
                (ErrorCode::IssueNotFound, Some(json!({"searched_id": id})))
            }
            TrackingError::InvalidArgument { name, reason } => (
                ErrorCode::InvalidArgument,
                Some(json!({"argument": name, "reason": reason})),
            ),
            TrackingError::AntiForgery => (ErrorCode::AntiForgery, None),
            TrackingError::Config(_) => (ErrorCode::ConfigError, None),
            TrackingError::Io(_) => (ErrorCode::IoError, None),
            TrackingError::Json(_) => (ErrorCode::JsonError, None),
            TrackingError::Yaml(_) => (ErrorCode::YamlError, None),
            TrackingError::Other(_) => (ErrorCode::InternalError, None),
        }
    }

    fn generate_hint(err: &TrackingError) -> Option<String> {
        if let Some(suggestion) = err.suggestion() {
            return Some(suggestion.to_string());
        }

        match err {
            TrackingError::IssueNotFound { .. } => {
                Some("Open /Issue to see the available issues.".to_string())
            }
            TrackingError::Database(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                Some("The database is busy; raise --lock-timeout and retry.".to_string())
            }
            _ => None,
        }
    }
}
