//! Error types for the protonkey library.
//!
//! All failure modes surface through a single [`Error`] enum; the rendered
//! `Display` message is the caller-facing error string.

use thiserror::Error;

/// The main error type for key lookup operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The keyserver did not return a usable armored public key
    /// (non-200 status or missing armor marker in the body).
    #[error("Failed to retrieve a valid PGP public key from ProtonMail.")]
    Fetch,

    /// Certificate parsing failed
    #[error("Certificate parsing failed: {0}")]
    Parse(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network error (network feature)
    #[error("Network error: {0}")]
    Network(String),
}

/// A specialized Result type for protonkey operations.
pub type Result<T> = std::result::Result<T, Error>;
