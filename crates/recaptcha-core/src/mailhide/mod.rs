//! Mailhide: publish an encrypted reveal link instead of a plaintext address.
//!
//! The reveal service decrypts `c` with the site's private key after the
//! visitor solves a challenge.

mod cipher;
mod mask;

pub use cipher::{decode_key, encrypt, pkcs7_pad, url_safe_base64};
pub use mask::mask_address;

use recaptcha_common::constants::MAILHIDE_URL;
use recaptcha_common::{KeyPair, Result};

/// Build the reveal link for `address`.
///
/// Fails with a configuration error if either key is empty or the private
/// key is not a usable hex AES key.
pub fn hide_url(keys: &KeyPair, address: &str) -> Result<String> {
    keys.ensure_complete()?;

    let key = decode_key(&keys.private_key)?;
    let ciphertext = encrypt(&key, address.as_bytes())?;

    tracing::debug!(
        public_key = %keys.public_key,
        ciphertext_len = ciphertext.len(),
        "Built Mailhide link"
    );

    Ok(format!(
        "{}?k={}&c={}",
        MAILHIDE_URL,
        keys.public_key,
        url_safe_base64(&ciphertext)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recaptcha_common::RecaptchaError;

    fn keys() -> KeyPair {
        KeyPair::new("01AbCdEfGhIjKlMnOpQrStUv==", "deadbeefdeadbeefdeadbeefdeadbeef")
    }

    #[test]
    fn test_hide_url_shape() {
        let url = hide_url(&keys(), "johndoe@example.com").unwrap();
        let expected_prefix = format!("{MAILHIDE_URL}?k=01AbCdEfGhIjKlMnOpQrStUv==&c=");
        assert!(url.starts_with(&expected_prefix));

        let c = &url[expected_prefix.len()..];
        // 19 bytes pad to 32, which base64-encodes to 44 characters
        assert_eq!(c.len(), 44);
        assert!(!c.contains('+') && !c.contains('/'));
    }

    #[test]
    fn test_hide_url_is_deterministic() {
        let a = hide_url(&keys(), "a@b.c").unwrap();
        let b = hide_url(&keys(), "a@b.c").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hide_url_requires_keys() {
        let no_public = KeyPair::new("", "deadbeefdeadbeefdeadbeefdeadbeef");
        let no_private = KeyPair::new("pub", "");
        assert!(matches!(hide_url(&no_public, "a@b.c"), Err(RecaptchaError::Config(_))));
        assert!(matches!(hide_url(&no_private, "a@b.c"), Err(RecaptchaError::Config(_))));
    }

    #[test]
    fn test_hide_url_rejects_bad_key() {
        let bad = KeyPair::new("pub", "not-hex");
        assert!(matches!(hide_url(&bad, "a@b.c"), Err(RecaptchaError::Config(_))));
    }
}
