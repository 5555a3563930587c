//! Error types for wc_image_alt

use thiserror::Error;

/// Unified error type for export and import operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Remote API answered with a non-success status code
    #[error("HTTP error: {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// CSV encoding or decoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Pagination header absent from a list response
    #[error("Response is missing the {0} header")]
    MissingHeader(&'static str),
    /// Pagination header present but not an integer
    #[error("Invalid {name} header value: {value:?}")]
    InvalidHeader { name: &'static str, value: String },
    /// Required environment variables are unset or empty
    #[error("Credentials not provided from environment (missing: {})", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
    /// Interchange file header lacks a required column
    #[error("CSV is missing required column {0:?}")]
    MissingColumn(&'static str),
    /// Interchange record has an empty required field
    #[error("CSV line {line}: empty value in required column {column:?}")]
    MissingValue { line: u64, column: &'static str },
    /// User answered no at the confirmation prompt
    #[error("Operation declined by user")]
    Declined,
}

/// Result alias for wc_image_alt operations
pub type Result<T> = std::result::Result<T, Error>;
