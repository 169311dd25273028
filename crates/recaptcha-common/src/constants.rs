//! Shared constants for the reCAPTCHA and Mailhide client.

/// Host that answers verification requests
pub const VERIFY_HOST: &str = "www.google.com";

/// Path of the verification endpoint on [`VERIFY_HOST`]
pub const VERIFY_PATH: &str = "/recaptcha/api/verify";

/// Plain HTTP port used by the raw-socket transport
pub const DEFAULT_VERIFY_PORT: u16 = 80;

/// Bound on connect, and on the whole request/response exchange (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Largest raw response the transport will buffer
pub const MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// Widget script/iframe base, plain HTTP
pub const API_SERVER: &str = "http://www.google.com/recaptcha/api";

/// Widget script/iframe base, HTTPS
pub const API_SECURE_SERVER: &str = "https://www.google.com/recaptcha/api";

/// Base of every Mailhide reveal link; `k` and `c` are appended as query parameters
pub const MAILHIDE_URL: &str = "https://www.google.com/recaptcha/mailhide/d";

/// Where site owners register for a key pair
pub const SIGNUP_URL: &str = "https://www.google.com/recaptcha/admin/create";

/// Cipher block size in bytes (AES)
pub const BLOCK_SIZE: usize = 16;

/// User-Agent sent with verification requests
pub const USER_AGENT: &str = "reCAPTCHA/Rust";

/// Form fields the client always sends; caller extras may not replace them
pub mod fields {
    pub const PRIVATE_KEY: &str = "privatekey";
    pub const REMOTE_IP: &str = "remoteip";
    pub const CHALLENGE: &str = "challenge";
    pub const RESPONSE: &str = "response";
}

/// Error codes reported in negative verification outcomes
pub mod error_codes {
    /// Answer was wrong, or the submission was incomplete
    pub const INCORRECT_SOLUTION: &str = "incorrect-captcha-sol";

    /// Service rejected the private key
    pub const INVALID_PRIVATE_KEY: &str = "invalid-site-private-key";

    /// Body said "false" but carried no error code line
    pub const UNKNOWN: &str = "unknown-error";
}
