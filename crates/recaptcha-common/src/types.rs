//! Core types shared across the client crates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::error_codes;
use crate::error::{RecaptchaError, Result};

/// Public/private key pair issued by the verification service.
///
/// The public key travels as-is in widget and Mailhide URLs. The private key
/// is hex text; Mailhide decodes it into the AES key, verification sends it
/// verbatim as the `privatekey` field.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub private_key: String,
}

impl KeyPair {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    /// Fails unless both halves are non-empty
    pub fn ensure_complete(&self) -> Result<()> {
        if self.public_key.is_empty() {
            return Err(RecaptchaError::Config("public key is empty".into()));
        }
        self.ensure_private()
    }

    /// Fails unless the private key is non-empty
    pub fn ensure_private(&self) -> Result<()> {
        if self.private_key.is_empty() {
            return Err(RecaptchaError::Config("private key is empty".into()));
        }
        Ok(())
    }
}

// Keep the private key out of logs.
impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Partially masked form of an address, e.g. `john` + `example.com`
/// for `johndoe@example.com`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedAddressParts {
    /// Leading characters of the local part that stay visible
    pub visible_prefix: String,
    /// Everything after the first `@`
    pub domain: String,
}

impl fmt::Display for MaskedAddressParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}...@{}", self.visible_prefix, self.domain)
    }
}

/// Result of a verification exchange.
///
/// `error_code` is `None` exactly when `is_valid` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl VerificationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_code: None,
        }
    }

    pub fn invalid(error_code: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_code: Some(error_code.into()),
        }
    }

    /// Outcome for a submission with no challenge or no response
    pub fn incorrect_solution() -> Self {
        Self::invalid(error_codes::INCORRECT_SOLUTION)
    }
}
