// src/error.rs

use thiserror::Error;

/// Core error types for debstat
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport failures and non-success HTTP statuses
    #[error("Download error: {0}")]
    Download(String),

    /// Gzip or UTF-8 failure while decoding a fetched file
    #[error("Decode error: {0}")]
    Decode(String),

    /// Requested remote filename is absent from the mirror directory
    #[error("\"{filename}\" not found on mirror; available files: {}", available.join(", "))]
    NotFound {
        filename: String,
        available: Vec<String>,
    },

    /// Requested architecture has no Contents index on the mirror
    #[error("architecture \"{arch}\" is invalid; please use one of: {}", available.join(", "))]
    ArchitectureNotFound {
        arch: String,
        available: Vec<String>,
    },

    /// Contents line cannot be split into path and package fields
    #[error("malformed line {number}: {line:?}")]
    MalformedLine { number: usize, line: String },

    /// Same path appears on more than one Contents line
    #[error("duplicate path \"{0}\" in Contents index")]
    DuplicatePath(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using debstat's Error type
pub type Result<T> = std::result::Result<T, Error>;
