//! Error types for `helpdesk-lib`.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for ticket store and service operations.
#[derive(Error, Debug)]
pub enum HelpdeskError {
    // === Ticket Errors ===
    /// Ticket with the specified ID was not found.
    #[error("Ticket not found: {id}")]
    TicketNotFound { id: String },

    // === Validation Errors ===
    /// A required field was missing or malformed.
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    // === Storage Errors ===
    /// The store could not be read even after resetting it to seed content.
    #[error("Store at {path} is unrecoverable: {reason}")]
    StoreUnrecoverable { path: PathBuf, reason: String },

    /// Generic storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    // === Configuration Errors ===
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HelpdeskError {
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::TicketNotFound { id: id.into() }
    }
}

/// Result type using `HelpdeskError`.
pub type Result<T> = std::result::Result<T, HelpdeskError>;
