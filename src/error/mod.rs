//! Error types and handling for `tracking`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Supports `anyhow` integration for blocking-task and startup failures
//! - Provides recovery hints for user-facing errors
//! - Maps every error onto a stable code, HTTP status and exit code
//!   (see [`StructuredError`])

mod structured;

pub use structured::{ErrorCode, StructuredError};

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for `tracking` operations.
#[derive(Error, Debug)]
pub enum TrackingError {
    // === Storage Errors ===
    /// Database file already exists where `init` would create one.
    #[error("Database already exists at '{path}'")]
    AlreadyInitialized { path: PathBuf },

    /// `SQLite` database error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // === Issue Errors ===
    /// Issue with the specified ID was not found.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: i64 },

    /// A store mutation received an entity it cannot act on.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    // === Request Errors ===
    /// Form submission carried a missing or stale anti-forgery token.
    #[error("Anti-forgery token missing or invalid")]
    AntiForgery,

    // === Configuration Errors ===
    /// Configuration file or value error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Wrapped anyhow error (blocking task failures, startup plumbing).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A single field validation error, rendered next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// The reason for the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl TrackingError {
    /// Is this the "record does not exist" condition?
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::IssueNotFound { .. })
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::AlreadyInitialized { .. } => Some("Use --force to recreate the database"),
            Self::AntiForgery => Some("Reload the form and submit it again"),
            Self::Config(_) => Some("Check tracking.yaml and TRACKING_* environment variables"),
            _ => None,
        }
    }

    /// Create an invalid-argument error for a store call.
    #[must_use]
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type using `TrackingError`.
pub type Result<T> = std::result::Result<T, TrackingError>;
