//! # Error Types
//!
//! This module defines error types used throughout the hagaki library.
//!
//! Per-record layout problems (missing postal code, oversized text, empty
//! co-addressee field) are not errors; they degrade locally while composing
//! the page. Only conditions that abort a whole generation call appear here.

use thiserror::Error;

/// Main error type for hagaki operations
#[derive(Debug, Error)]
pub enum HagakiError {
    /// A recipient record is structurally unusable (blank name or address)
    #[error("Invalid record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// Generation was requested for an empty batch
    #[error("No records to render")]
    NoRecords,

    /// Layout configuration rejected by validation
    #[error("Invalid layout configuration: {0}")]
    Config(String),

    /// Font data could not be parsed
    #[error("Font error: {0}")]
    Font(String),

    /// Image processing error (preview, background)
    #[error("Image error: {0}")]
    Image(String),

    /// JSON input or configuration error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
