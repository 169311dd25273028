//! Error taxonomy for the reCAPTCHA and Mailhide client.
//!
//! A wrong answer is not an error: it comes back as a negative
//! [`VerificationOutcome`](crate::VerificationOutcome).

use thiserror::Error;

/// Errors raised by key handling, address masking, and the verification exchange
#[derive(Debug, Error)]
pub enum RecaptchaError {
    /// Missing, empty, or unusable key material
    #[error("Configuration error: {0}")]
    Config(String),

    /// Address has no `@`
    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    /// Connection could not be opened, or broke mid-exchange
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response has no header/body boundary
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl RecaptchaError {
    /// Returns true if a caller-side retry could succeed.
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<std::io::Error> for RecaptchaError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result alias used across the client crates
pub type Result<T> = std::result::Result<T, RecaptchaError>;
