//! Verification of solved challenges against the remote service.
//!
//! One request, one answer: the client encodes the form, hands it to the
//! [`Transport`], and reads `true`/`false` plus an error code back. It keeps
//! no state between calls and never retries.

mod form;
mod response;

pub use form::{build_fields, encode_form};
pub use response::{parse_answer, parse_response, split_body};

use recaptcha_common::constants::{DEFAULT_VERIFY_PORT, SIGNUP_URL, VERIFY_HOST, VERIFY_PATH};
use recaptcha_common::{RecaptchaError, Result, VerificationOutcome};

use crate::transport::Transport;

/// Verification service client
#[derive(Debug, Clone)]
pub struct VerificationClient<T> {
    transport: T,
    host: String,
    port: u16,
}

impl<T: Transport> VerificationClient<T> {
    /// Client for the public service on its default host and port
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            host: VERIFY_HOST.to_string(),
            port: DEFAULT_VERIFY_PORT,
        }
    }

    /// Point the client at another host/port (mirrors, test doubles)
    pub fn with_endpoint(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Ask the service whether `response` solves `challenge`.
    ///
    /// An empty challenge or response is rejected locally with
    /// `incorrect-captcha-sol` and nothing is sent. A wrong answer is an
    /// `Ok` outcome with `is_valid == false`; `Err` is reserved for
    /// misconfiguration and transport/protocol failures.
    pub fn check_answer(
        &self,
        challenge: &str,
        response: &str,
        private_key: &str,
        remote_ip: &str,
        extra: &[(&str, &str)],
    ) -> Result<VerificationOutcome> {
        if private_key.is_empty() {
            return Err(RecaptchaError::Config("private key is empty".into()));
        }

        if challenge.is_empty() || response.is_empty() {
            tracing::debug!(remote_ip = %remote_ip, "Rejecting incomplete submission without a round trip");
            return Ok(VerificationOutcome::incorrect_solution());
        }

        if remote_ip.is_empty() {
            return Err(RecaptchaError::Config(
                "remote IP must be supplied for verification".into(),
            ));
        }

        let fields = build_fields(private_key, remote_ip, challenge, response, extra);
        let body = encode_form(&fields);

        tracing::debug!(
            host = %self.host,
            path = VERIFY_PATH,
            remote_ip = %remote_ip,
            fields = ?fields.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            "Sending verification request"
        );

        let raw = self.transport.post(&self.host, VERIFY_PATH, &body, self.port)?;
        let outcome = parse_response(&raw).inspect_err(|e| {
            tracing::warn!(host = %self.host, error = %e, "Unreadable verification response");
        })?;

        tracing::debug!(
            remote_ip = %remote_ip,
            is_valid = outcome.is_valid,
            error_code = ?outcome.error_code,
            "Verification answered"
        );

        Ok(outcome)
    }
}

/// Registration link for a site, pre-filled with its domain and app name
pub fn signup_url(domain: &str, app_name: &str) -> String {
    format!(
        "{}?{}",
        SIGNUP_URL,
        encode_form(&[("domains", domain), ("app", app_name)])
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use recaptcha_common::constants::error_codes;
    use std::sync::Mutex;

    /// One recorded `post` call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedPost {
        pub host: String,
        pub path: String,
        pub body: String,
        pub port: u16,
    }

    /// Transport double that records calls and replays a canned reply
    pub struct RecordingTransport {
        reply: std::result::Result<String, String>,
        pub calls: Mutex<Vec<RecordedPost>>,
    }

    impl RecordingTransport {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<RecordedPost> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn post(&self, host: &str, path: &str, body: &str, port: u16) -> Result<String> {
            self.calls.lock().unwrap().push(RecordedPost {
                host: host.to_string(),
                path: path.to_string(),
                body: body.to_string(),
                port,
            });
            self.reply.clone().map_err(RecaptchaError::Transport)
        }
    }

    #[test]
    fn test_empty_submission_skips_network() {
        let transport = RecordingTransport::replying("H\r\n\r\ntrue\n");
        let client = VerificationClient::new(&transport);

        let outcome = client.check_answer("", "", "key", "10.0.0.1", &[]).unwrap();
        assert_eq!(outcome, VerificationOutcome::invalid("incorrect-captcha-sol"));

        let outcome = client.check_answer("ch", "", "key", "10.0.0.1", &[]).unwrap();
        assert!(!outcome.is_valid);
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_empty_private_key_is_config_error() {
        let transport = RecordingTransport::replying("H\r\n\r\ntrue\n");
        let client = VerificationClient::new(&transport);

        let err = client.check_answer("ch", "resp", "", "10.0.0.1", &[]).unwrap_err();
        assert!(matches!(err, RecaptchaError::Config(_)));
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_empty_remote_ip_is_config_error() {
        let transport = RecordingTransport::replying("H\r\n\r\ntrue\n");
        let client = VerificationClient::new(&transport);

        let err = client.check_answer("ch", "resp", "key", "", &[]).unwrap_err();
        assert!(matches!(err, RecaptchaError::Config(_)));
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_valid_response() {
        let transport = RecordingTransport::replying("HTTP/1.0 200 OK\r\n\r\ntrue\n");
        let client = VerificationClient::new(&transport);

        let outcome = client.check_answer("ch", "resp", "key", "10.0.0.1", &[]).unwrap();
        assert!(outcome.is_valid);
        assert_eq!(outcome.error_code, None);
    }

    #[test]
    fn test_invalid_response() {
        let transport =
            RecordingTransport::replying(&format!(
                "HTTP/1.0 200 OK\r\n\r\nfalse\n{}",
                error_codes::INVALID_PRIVATE_KEY
            ));
        let client = VerificationClient::new(&transport);

        let outcome = client.check_answer("ch", "resp", "key", "10.0.0.1", &[]).unwrap();
        assert_eq!(outcome, VerificationOutcome::invalid(error_codes::INVALID_PRIVATE_KEY));
    }

    #[test]
    fn test_request_goes_to_verify_endpoint() {
        let transport = RecordingTransport::replying("H\r\n\r\ntrue\n");
        let client = VerificationClient::new(&transport);

        client
            .check_answer("03AHJ_abc", "two words", "pk", "10.0.0.1", &[("privatekey", "x"), ("lang", "en")])
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].host, "www.google.com");
        assert_eq!(calls[0].path, "/recaptcha/api/verify");
        assert_eq!(calls[0].port, 80);
        assert_eq!(
            calls[0].body,
            "privatekey=pk&remoteip=10.0.0.1&challenge=03AHJ_abc&response=two%20words&lang=en"
        );
    }

    #[test]
    fn test_custom_endpoint() {
        let transport = RecordingTransport::replying("H\r\n\r\ntrue\n");
        let client = VerificationClient::new(&transport).with_endpoint("localhost", 8080);

        client.check_answer("ch", "resp", "pk", "10.0.0.1", &[]).unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].host, "localhost");
        assert_eq!(calls[0].port, 8080);
    }

    #[test]
    fn test_transport_failure_propagates_once() {
        let transport = RecordingTransport::failing("connection refused");
        let client = VerificationClient::new(&transport);

        let err = client.check_answer("ch", "resp", "pk", "10.0.0.1", &[]).unwrap_err();
        assert!(matches!(err, RecaptchaError::Transport(_)));
        assert_eq!(transport.calls().len(), 1);
    }

    #[test]
    fn test_garbled_response_is_protocol_error() {
        let transport = RecordingTransport::replying("garbage");
        let client = VerificationClient::new(&transport);

        let err = client.check_answer("ch", "resp", "pk", "10.0.0.1", &[]).unwrap_err();
        assert!(matches!(err, RecaptchaError::Protocol(_)));
    }

    #[test]
    fn test_signup_url() {
        let url = signup_url("example.com", "MyApp");
        assert_eq!(
            url,
            "https://www.google.com/recaptcha/admin/create?domains=example.com&app=MyApp"
        );

        let (_, query) = url.split_once('?').unwrap();
        let parsed: Vec<(String, String)> = query
            .split('&')
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap();
                (
                    urlencoding::decode(k).unwrap().into_owned(),
                    urlencoding::decode(v).unwrap().into_owned(),
                )
            })
            .collect();
        assert_eq!(
            parsed,
            vec![
                ("domains".to_string(), "example.com".to_string()),
                ("app".to_string(), "MyApp".to_string()),
            ]
        );
    }

    #[test]
    fn test_signup_url_encodes_fields() {
        let url = signup_url("a.com,b.com", "My App");
        assert!(url.ends_with("?domains=a.com%2Cb.com&app=My%20App"));
    }
}
