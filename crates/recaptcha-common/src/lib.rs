//! # reCAPTCHA Common
//!
//! Shared types, errors, and constants used by the verification client,
//! the Mailhide encoder, and the command-line front end.
//!
//! ## Modules
//! - `types` - Data model (KeyPair, VerificationOutcome, MaskedAddressParts)
//! - `error` - The error taxonomy
//! - `constants` - Service hosts, paths, and protocol constants

pub mod constants;
pub mod error;
pub mod types;

pub use error::{RecaptchaError, Result};
pub use types::*;
