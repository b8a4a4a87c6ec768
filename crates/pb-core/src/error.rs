//! # AppError
//!
//! Centralized error handling for the Pulse-Board ecosystem.
//!
//! Note that "record not found" for id- or slug-keyed lookups is NOT an
//! error here: port methods signal it with `Ok(None)` and callers check
//! for absence explicitly. `NotFound` exists for boundaries (the API
//! layer) that need to name the missing resource.

use thiserror::Error;

/// The primary error type for all pb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Board, Post, Comment)
    #[error("{0} not found: {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., blank title, unknown status string)
    #[error("validation error: {0}")]
    Validation(String),

    /// Backing-store failure (seed parse error, poisoned state)
    #[error("storage error: {0}")]
    Storage(String),
}

/// A specialized Result type for Pulse-Board logic.
pub type Result<T> = std::result::Result<T, AppError>;
