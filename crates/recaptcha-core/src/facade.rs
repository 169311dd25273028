//! Key-holding entry point over the verification client and Mailhide.

use recaptcha_common::{KeyPair, MaskedAddressParts, RecaptchaError, Result, VerificationOutcome};

use crate::mailhide;
use crate::markup;
use crate::transport::Transport;
use crate::verify::{self, VerificationClient};

/// Configured keys plus a verification client.
///
/// Site keys drive the challenge widget and answer checks; Mailhide has its
/// own key pair and is optional.
pub struct ReCaptcha<T> {
    keys: KeyPair,
    mailhide_keys: Option<KeyPair>,
    client: VerificationClient<T>,
}

impl<T: Transport> ReCaptcha<T> {
    pub fn new(keys: KeyPair, client: VerificationClient<T>) -> Self {
        Self {
            keys,
            mailhide_keys: None,
            client,
        }
    }

    pub fn with_mailhide_keys(mut self, keys: KeyPair) -> Self {
        self.mailhide_keys = Some(keys);
        self
    }

    /// Widget markup for the configured public key
    pub fn challenge_html(&self, error: Option<&str>, use_ssl: bool) -> Result<String> {
        markup::challenge_html(&self.keys.public_key, error, use_ssl)
    }

    /// Verify an answer with the configured private key
    pub fn check_answer(
        &self,
        challenge: &str,
        response: &str,
        remote_ip: &str,
        extra: &[(&str, &str)],
    ) -> Result<VerificationOutcome> {
        self.client
            .check_answer(challenge, response, &self.keys.private_key, remote_ip, extra)
    }

    pub fn signup_url(&self, domain: &str, app_name: &str) -> String {
        verify::signup_url(domain, app_name)
    }

    pub fn hide_url(&self, address: &str) -> Result<String> {
        mailhide::hide_url(self.mailhide_keys()?, address)
    }

    pub fn mailhide_html(&self, address: &str) -> Result<String> {
        markup::mailhide_html(self.mailhide_keys()?, address)
    }

    pub fn mask_address(&self, address: &str) -> Result<MaskedAddressParts> {
        mailhide::mask_address(address)
    }

    fn mailhide_keys(&self) -> Result<&KeyPair> {
        self.mailhide_keys
            .as_ref()
            .ok_or_else(|| RecaptchaError::Config("Mailhide keys are not configured".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::tests::RecordingTransport;

    const MAILHIDE_KEY: &str = "0123456789abcdef0123456789abcdef";

    fn facade(transport: &RecordingTransport) -> ReCaptcha<&RecordingTransport> {
        ReCaptcha::new(
            KeyPair::new("site-public", "site-private"),
            VerificationClient::new(transport),
        )
    }

    #[test]
    fn test_check_answer_uses_configured_private_key() {
        let transport = RecordingTransport::replying("H\r\n\r\nfalse\nincorrect-captcha-sol");
        let outcome = facade(&transport)
            .check_answer("ch", "resp", "10.0.0.1", &[])
            .unwrap();

        assert_eq!(outcome, VerificationOutcome::invalid("incorrect-captcha-sol"));
        assert!(transport.calls()[0].body.starts_with("privatekey=site-private&"));
    }

    #[test]
    fn test_missing_site_private_key() {
        let transport = RecordingTransport::replying("H\r\n\r\ntrue\n");
        let recaptcha = ReCaptcha::new(KeyPair::new("pub", ""), VerificationClient::new(&transport));

        assert!(matches!(
            recaptcha.check_answer("ch", "resp", "10.0.0.1", &[]),
            Err(RecaptchaError::Config(_))
        ));
    }

    #[test]
    fn test_challenge_html_uses_public_key() {
        let transport = RecordingTransport::replying("");
        let html = facade(&transport).challenge_html(None, true).unwrap();
        assert!(html.contains("challenge?k=site-public"));
    }

    #[test]
    fn test_mailhide_requires_its_own_keys() {
        let transport = RecordingTransport::replying("");
        let recaptcha = facade(&transport);
        assert!(matches!(recaptcha.hide_url("a@b.c"), Err(RecaptchaError::Config(_))));
        assert!(matches!(recaptcha.mailhide_html("a@b.c"), Err(RecaptchaError::Config(_))));

        let recaptcha = recaptcha.with_mailhide_keys(KeyPair::new("mh-public", MAILHIDE_KEY));
        assert!(recaptcha.hide_url("a@b.c").unwrap().contains("k=mh-public"));
        assert!(recaptcha.mailhide_html("johndoe@example.com").unwrap().starts_with("john<a"));
    }

    #[test]
    fn test_mask_and_signup_need_no_keys() {
        let transport = RecordingTransport::replying("");
        let recaptcha = ReCaptcha::new(KeyPair::default(), VerificationClient::new(&transport));

        assert_eq!(recaptcha.mask_address("abcde@x.com").unwrap().visible_prefix, "abc");
        assert!(recaptcha.signup_url("example.com", "MyApp").contains("domains=example.com"));
        assert!(transport.calls().is_empty());
    }
}
