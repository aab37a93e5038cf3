//! Error types for the blog frontend
//!
//! Errors fall into two audiences: validation failures go to the user
//! (inline markers or a blocking alert), everything else goes to the
//! developer console only.

use thiserror::Error;

/// Result type alias for frontend operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the blog frontend
#[derive(Debug, Error)]
pub enum Error {
    // ==========================================================================
    // Validation Errors
    // ==========================================================================
    #[error("Required field is blank: {0}")]
    BlankField(String),

    #[error("Recipient is not among the suggested names: {0:?}")]
    UnknownRecipient(String),

    // ==========================================================================
    // Transport Errors
    // ==========================================================================
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ==========================================================================
    // Decoding Errors
    // ==========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    // ==========================================================================
    // Configuration / Host Errors
    // ==========================================================================
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Host error: {0}")]
    Host(String),

    // ==========================================================================
    // Cancellation
    // ==========================================================================
    #[error("Cancelled by user")]
    Cancelled,
}

impl Error {
    /// Returns the error type string (stable, for console output)
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::BlankField(_) => "BLANK_FIELD",
            Self::UnknownRecipient(_) => "UNKNOWN_RECIPIENT",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::HttpStatus { .. } => "HTTP_STATUS",
            Self::Serialization(_) | Self::Decode(_) => "DECODE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::ElementNotFound(_) => "ELEMENT_NOT_FOUND",
            Self::Host(_) => "HOST_ERROR",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether this error is surfaced to the user rather than only logged.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::BlankField(_) | Self::UnknownRecipient(_))
    }
}
