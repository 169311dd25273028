//! Parsing of the verification service reply.
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! ...headers...\r\n
//! \r\n
//! false\n
//! incorrect-captcha-sol
//! ```

use recaptcha_common::constants::error_codes;
use recaptcha_common::{RecaptchaError, Result, VerificationOutcome};

/// Body of a raw HTTP response (everything after the first blank line)
pub fn split_body(raw: &str) -> Result<&str> {
    if let Some((_, body)) = raw.split_once("\r\n\r\n") {
        return Ok(body);
    }
    // Some intermediaries normalise line endings
    if let Some((_, body)) = raw.split_once("\n\n") {
        return Ok(body);
    }
    Err(RecaptchaError::Protocol(
        "response has no header/body boundary".into(),
    ))
}

/// Interpret the body: line 0 is `true`/`false`, line 1 the error code
pub fn parse_answer(body: &str) -> VerificationOutcome {
    let mut lines = body.split('\n');
    let verdict = lines.next().unwrap_or_default().trim();

    if verdict == "true" {
        return VerificationOutcome::valid();
    }

    match lines.next().map(str::trim).filter(|code| !code.is_empty()) {
        Some(code) => VerificationOutcome::invalid(code),
        None => VerificationOutcome::invalid(error_codes::UNKNOWN),
    }
}

/// [`split_body`] followed by [`parse_answer`]
pub fn parse_response(raw: &str) -> Result<VerificationOutcome> {
    split_body(raw).map(parse_answer)
}
