//! Error types for network construction, evaluation and training

use thiserror::Error;

/// Result type for network operations
pub type Result<T> = std::result::Result<T, NetError>;

/// Errors that can occur while building, evaluating or updating a network
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetError {
    /// Layer sizes (or supplied parameter arrays) do not describe a valid network
    #[error("Invalid architecture: {0}")]
    InvalidArchitecture(String),

    /// A vector or matrix does not have the width the network expects
    #[error("Shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Introspection of a layer or unit that does not exist
    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),

    /// Training configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl NetError {
    pub(crate) fn shape(what: &'static str, expected: usize, actual: usize) -> Self {
        NetError::ShapeMismatch {
            what,
            expected,
            actual,
        }
    }
}

impl From<serde_json::Error> for NetError {
    fn from(err: serde_json::Error) -> Self {
        NetError::Config(err.to_string())
    }
}
