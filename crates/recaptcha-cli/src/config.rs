//! Configuration management for the CLI.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use recaptcha_common::KeyPair;
use recaptcha_common::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_VERIFY_PORT, VERIFY_HOST};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecaptchaSettings {
    /// Site keys for the challenge widget and verification
    #[serde(default)]
    pub recaptcha: KeyPair,

    /// Mailhide keys (separate registration)
    #[serde(default)]
    pub mailhide: KeyPair,

    /// Verification endpoint and socket bounds
    #[serde(default)]
    pub transport: TransportSettings,
}

/// Verification transport configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TransportSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Connect/read timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl TransportSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_host() -> String { VERIFY_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_VERIFY_PORT }
fn default_timeout() -> u64 { DEFAULT_TIMEOUT_SECS }

impl RecaptchaSettings {
    /// Load from file and `RECAPTCHA__*` environment, then apply CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut builder = config::Config::builder();

        if Path::new(config_path).exists() {
            builder = builder.add_source(config::File::with_name(config_path));
        } else {
            tracing::debug!(path = %config_path, "Config file not found, using defaults and environment");
        }

        let mut settings: RecaptchaSettings = builder
            .add_source(config::Environment::with_prefix("RECAPTCHA").separator("__"))
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")?;

        // Apply CLI overrides
        if let Some(ref key) = args.public_key {
            settings.recaptcha.public_key = key.clone();
        }
        if let Some(ref key) = args.private_key {
            settings.recaptcha.private_key = key.clone();
        }
        if let Some(ref key) = args.mailhide_public_key {
            settings.mailhide.public_key = key.clone();
        }
        if let Some(ref key) = args.mailhide_private_key {
            settings.mailhide.private_key = key.clone();
        }
        if let Some(ref host) = args.verify_host {
            settings.transport.host = host.clone();
        }
        if let Some(port) = args.verify_port {
            settings.transport.port = port;
        }

        Ok(settings)
    }
}
