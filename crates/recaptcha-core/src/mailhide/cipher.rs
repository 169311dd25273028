//! Mailhide address encryption.
//!
//! Wire format expected by the reveal service:
//! ```text
//! c = url_safe_base64( AES-CBC(key, iv = 0^16, pkcs7_pad(address)) )
//! ```
//! Both the all-zero IV and the extra padding block on aligned input are
//! part of that format. Changing either breaks decryption on the service.

use aes::cipher::{BlockEncryptMut, InvalidLength, KeyIvInit, block_padding::NoPadding};
use base64::{Engine, engine::general_purpose::URL_SAFE};
use recaptcha_common::constants::BLOCK_SIZE;
use recaptcha_common::{RecaptchaError, Result};

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes192CbcEnc = cbc::Encryptor<aes::Aes192>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

const ZERO_IV: [u8; BLOCK_SIZE] = [0u8; BLOCK_SIZE];

/// Pad `data` to a multiple of `block_size`.
///
/// Always appends between 1 and `block_size` bytes, each holding the pad
/// count, so block-aligned input gains a whole block.
pub fn pkcs7_pad(data: &[u8], block_size: usize) -> Vec<u8> {
    let pad = block_size - (data.len() % block_size);
    let mut padded = Vec::with_capacity(data.len() + pad);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad, pad as u8);
    padded
}

/// Decode the hex private key into raw AES key bytes (16, 24 or 32 bytes)
pub fn decode_key(private_key: &str) -> Result<Vec<u8>> {
    if private_key.is_empty() {
        return Err(RecaptchaError::Config("private key is empty".into()));
    }

    let key = hex::decode(private_key)
        .map_err(|e| RecaptchaError::Config(format!("private key is not valid hex: {e}")))?;

    match key.len() {
        16 | 24 | 32 => Ok(key),
        n => Err(RecaptchaError::Config(format!(
            "private key decodes to {n} bytes, expected 16, 24 or 32"
        ))),
    }
}

/// Pad and encrypt `plaintext` under `key` in CBC mode with a zero IV
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let padded = pkcs7_pad(plaintext, BLOCK_SIZE);
    let invalid =
        |_: InvalidLength| RecaptchaError::Config(format!("unusable AES key length {}", key.len()));

    // The input is already padded, so the cipher must not pad again.
    let ciphertext = match key.len() {
        16 => Aes128CbcEnc::new_from_slices(key, &ZERO_IV)
            .map_err(invalid)?
            .encrypt_padded_vec_mut::<NoPadding>(&padded),
        24 => Aes192CbcEnc::new_from_slices(key, &ZERO_IV)
            .map_err(invalid)?
            .encrypt_padded_vec_mut::<NoPadding>(&padded),
        32 => Aes256CbcEnc::new_from_slices(key, &ZERO_IV)
            .map_err(invalid)?
            .encrypt_padded_vec_mut::<NoPadding>(&padded),
        n => {
            return Err(RecaptchaError::Config(format!(
                "unusable AES key length {n}"
            )));
        }
    };

    Ok(ciphertext)
}

/// Standard base64 with `+` -> `-` and `/` -> `_`, `=` padding kept
pub fn url_safe_base64(bytes: &[u8]) -> String {
    URL_SAFE.encode(bytes)
}
