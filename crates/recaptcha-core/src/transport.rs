//! Outbound HTTP POST used by the verification client.
//!
//! The client only needs "send this form body, give me the raw reply".
//! [`TcpTransport`] does that over a plain socket with HTTP/1.0 framing;
//! anything else (TLS, pooling, proxies) plugs in through [`Transport`].

use std::io::{ErrorKind, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use recaptcha_common::constants::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_VERIFY_PORT, MAX_RESPONSE_BYTES, USER_AGENT,
};
use recaptcha_common::{RecaptchaError, Result};

/// Sends a form-encoded POST and returns the full raw response (headers and body)
pub trait Transport {
    fn post(&self, host: &str, path: &str, body: &str, port: u16) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, host: &str, path: &str, body: &str, port: u16) -> Result<String> {
        (**self).post(host, path, body, port)
    }
}

/// Raw-socket transport, one connection per request
#[derive(Debug, Clone)]
pub struct TcpTransport {
    /// Bound on connect, and on the whole write + read exchange
    timeout: Duration,
}

impl TcpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn connect(&self, host: &str, port: u16) -> Result<TcpStream> {
        let addrs = (host, port)
            .to_socket_addrs()
            .map_err(|e| RecaptchaError::Transport(format!("cannot resolve {host}:{port}: {e}")))?;

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_err = Some(e),
            }
        }

        Err(RecaptchaError::Transport(match last_err {
            Some(e) => format!("could not open socket to {host}:{port}: {e}"),
            None => format!("no addresses for {host}:{port}"),
        }))
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

/// Read until EOF, failing once `deadline` passes or the reply outgrows
/// [`MAX_RESPONSE_BYTES`]
fn read_response(stream: &mut TcpStream, deadline: Instant) -> Result<Vec<u8>> {
    let mut limited = (&mut *stream).take(MAX_RESPONSE_BYTES as u64 + 1);
    let mut raw = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(RecaptchaError::Transport(
                "verification response not complete before deadline".into(),
            ));
        }
        limited.get_ref().set_read_timeout(Some(remaining))?;

        match limited.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => raw.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                return Err(RecaptchaError::Transport(format!(
                    "verification response timed out: {e}"
                )));
            }
            Err(e) => return Err(e.into()),
        }

        if raw.len() > MAX_RESPONSE_BYTES {
            return Err(RecaptchaError::Transport(format!(
                "verification response exceeds {MAX_RESPONSE_BYTES} bytes"
            )));
        }
    }

    Ok(raw)
}

/// HTTP/1.0 request text for a form POST
pub fn format_request(host: &str, port: u16, path: &str, body: &str) -> String {
    let host = if port == DEFAULT_VERIFY_PORT {
        host.to_string()
    } else {
        format!("{host}:{port}")
    };

    format!(
        "POST {path} HTTP/1.0\r\n\
         Host: {host}\r\n\
         Content-Type: application/x-www-form-urlencoded;\r\n\
         Content-Length: {}\r\n\
         User-Agent: {USER_AGENT}\r\n\
         \r\n\
         {body}",
        body.len()
    )
}

impl Transport for TcpTransport {
    fn post(&self, host: &str, path: &str, body: &str, port: u16) -> Result<String> {
        let mut stream = self.connect(host, port).inspect_err(|e| {
            tracing::warn!(host = %host, port = port, error = %e, "Verification connect failed");
        })?;

        let deadline = Instant::now() + self.timeout;
        stream.set_write_timeout(Some(self.timeout))?;
        stream.write_all(format_request(host, port, path, body).as_bytes())?;

        // HTTP/1.0: the server closes the connection after the response
        let raw = read_response(&mut stream, deadline).inspect_err(|e| {
            tracing::warn!(host = %host, port = port, error = %e, "Verification read failed");
        })?;

        tracing::debug!(host = %host, bytes = raw.len(), "Received verification response");

        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}
