//! # reCAPTCHA Core
//!
//! Client side of two services:
//! - **Verification**: send a solved challenge to the verification host and
//!   read back a [`VerificationOutcome`].
//! - **Mailhide**: encrypt an email address into a reveal link so it never
//!   appears in page source.
//!
//! ## Architecture
//! ```text
//! ReCaptcha (keys) ─┬─> VerificationClient ──> Transport (TcpTransport)
//!                   ├─> mailhide (AES-CBC, url-safe base64, masking)
//!                   └─> markup (widget + reveal link HTML)
//! ```

pub mod facade;
pub mod mailhide;
pub mod markup;
pub mod transport;
pub mod verify;

pub use facade::ReCaptcha;
pub use transport::{TcpTransport, Transport};
pub use verify::VerificationClient;

pub use recaptcha_common::{
    KeyPair, MaskedAddressParts, RecaptchaError, Result, VerificationOutcome,
};
