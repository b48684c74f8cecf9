//! Error types for the Optim spatial library
//!
//! Normal edge cases (empty inputs, single items, missing offload target) are valid
//! states and never surface here. Errors are reserved for caller contract violations
//! and compute device failures.

use std::fmt;

/// Result type for Optim operations
pub type Result<T> = std::result::Result<T, Error>;

/// Optim errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A configuration value violates its precondition (e.g. `leaf_size == 0`)
    InvalidConfiguration(String),

    /// Malformed input data (e.g. triangle index outside the vertex buffer)
    InvalidInput(String),

    /// The offloaded strategy could not complete on its compute device
    OffloadFailure(String),

    /// Compute backend specific error
    BackendError(String),

    /// Compute device memory budget exhausted
    OutOfMemory,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::OffloadFailure(msg) => write!(f, "Offload failure: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of device memory"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
