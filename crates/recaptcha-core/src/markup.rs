//! HTML snippets for the challenge widget and Mailhide links.

use recaptcha_common::constants::{API_SECURE_SERVER, API_SERVER};
use recaptcha_common::{KeyPair, RecaptchaError, Result};

use crate::mailhide;

/// Popup features for the reveal window
const REVEAL_WINDOW_FEATURES: &str =
    "toolbar=0,scrollbars=0,location=0,statusbar=0,menubar=0,resizable=0,width=500,height=300";

/// Escape text for use inside a quoted HTML attribute
pub fn escape_attribute(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Script tag plus `<noscript>` fallback that renders the challenge widget.
///
/// `error` is the code from a previous failed attempt, if any.
pub fn challenge_html(public_key: &str, error: Option<&str>, use_ssl: bool) -> Result<String> {
    if public_key.is_empty() {
        return Err(RecaptchaError::Config("public key is empty".into()));
    }

    let server = if use_ssl { API_SECURE_SERVER } else { API_SERVER };
    let mut query = format!("k={}", urlencoding::encode(public_key));
    if let Some(error) = error.filter(|e| !e.is_empty()) {
        query.push_str("&error=");
        query.push_str(&urlencoding::encode(error));
    }
    let query = escape_attribute(&query);

    Ok(format!(
        r#"<script type="text/javascript" src="{server}/challenge?{query}"></script>

<noscript>
    <iframe src="{server}/noscript?{query}" height="300" width="500" frameborder="0"></iframe><br/>
    <textarea name="recaptcha_challenge_field" rows="3" cols="40"></textarea>
    <input type="hidden" name="recaptcha_response_field" value="manual_challenge"/>
</noscript>"#
    ))
}

/// Masked address with the hidden part as a reveal link, e.g.
/// `john<a href='...'>...</a>@example.com`.
pub fn mailhide_html(keys: &KeyPair, address: &str) -> Result<String> {
    let parts = mailhide::mask_address(address)?;
    let url = escape_attribute(&mailhide::hide_url(keys, address)?);

    Ok(format!(
        "{prefix}<a href='{url}' onclick=\"window.open('{url}', '', '{REVEAL_WINDOW_FEATURES}'); \
         return false;\" title=\"Reveal this e-mail address\">...</a>@{domain}",
        prefix = escape_attribute(&parts.visible_prefix),
        domain = escape_attribute(&parts.domain),
    ))
}
