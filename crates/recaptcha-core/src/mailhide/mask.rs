//! Display masking for hidden addresses.

use recaptcha_common::{MaskedAddressParts, RecaptchaError, Result};

/// Number of local-part characters left visible
fn visible_len(local_len: usize) -> usize {
    match local_len {
        0..=4 => 1,
        5..=6 => 3,
        _ => 4,
    }
}

/// Split `address` at its first `@` and keep a short prefix of the local part.
///
/// `johndoe@example.com` becomes `("john", "example.com")`, shown as
/// `john...@example.com`. Lengths count characters, not bytes. The address
/// syntax is not otherwise validated.
pub fn mask_address(address: &str) -> Result<MaskedAddressParts> {
    let (local, domain) = address
        .split_once('@')
        .ok_or_else(|| RecaptchaError::MalformedAddress(format!("no '@' in {address:?}")))?;

    let keep = visible_len(local.chars().count());
    let visible_prefix: String = local.chars().take(keep).collect();

    Ok(MaskedAddressParts {
        visible_prefix,
        domain: domain.to_string(),
    })
}
