//! Error types for respwire
//!
//! Provides a unified error type for all codec operations.

use thiserror::Error;

/// Result type alias using RespError
pub type Result<T> = std::result::Result<T, RespError>;

/// Unified error type for respwire operations
#[derive(Debug, Error)]
pub enum RespError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Protocol error: nesting depth exceeds maximum of {max}")]
    DepthExceeded { max: usize },

    #[error("Protocol error: command argument {index} is {found}, expected bulk string")]
    UnexpectedCommandType { index: usize, found: &'static str },

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Wrong variant: expected {expected}, found {found}")]
    WrongVariant {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Construction error: {0}")]
    Construction(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RespError {
    /// True for framing violations on otherwise well-formed I/O
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            RespError::Protocol(_)
                | RespError::DepthExceeded { .. }
                | RespError::UnexpectedCommandType { .. }
        )
    }

    /// True when the byte stream can no longer be realigned to frame boundaries.
    ///
    /// Connection handlers should close the connection on a fatal error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RespError::Io(_)) || self.is_protocol()
    }
}
