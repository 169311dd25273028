//! # recaptcha - reCAPTCHA and Mailhide from the command line
//!
//! Verifies solved challenges, prints widget markup, and builds Mailhide
//! reveal links using keys from `config/recaptcha.toml`, the environment,
//! or flags.
//!
//! ## Usage
//! ```bash
//! # Reveal link for an address
//! recaptcha hide-url johndoe@example.com
//!
//! # Check an answer
//! recaptcha verify --challenge 03AHJ_... --response "two words" --remote-ip 203.0.113.7
//! ```

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use recaptcha_common::KeyPair;
use recaptcha_core::{ReCaptcha, TcpTransport, VerificationClient};

mod config;

use crate::config::RecaptchaSettings;

/// reCAPTCHA verification and Mailhide link builder
#[derive(Parser, Debug)]
#[command(name = "recaptcha")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/recaptcha.toml")]
    config: String,

    /// Site public key (overrides config)
    #[arg(long, env = "RECAPTCHA_PUBLIC_KEY")]
    public_key: Option<String>,

    /// Site private key (overrides config)
    #[arg(long, env = "RECAPTCHA_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Mailhide public key (overrides config)
    #[arg(long, env = "MAILHIDE_PUBLIC_KEY")]
    mailhide_public_key: Option<String>,

    /// Mailhide private key, hex (overrides config)
    #[arg(long, env = "MAILHIDE_PRIVATE_KEY", hide_env_values = true)]
    mailhide_private_key: Option<String>,

    /// Verification host (overrides config)
    #[arg(long)]
    verify_host: Option<String>,

    /// Verification port (overrides config)
    #[arg(long)]
    verify_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the Mailhide reveal link for an address
    HideUrl { address: String },

    /// Print the masked display form of an address
    Mask { address: String },

    /// Print the masked address with an embedded reveal link
    MailhideHtml { address: String },

    /// Print the challenge widget markup
    ChallengeHtml {
        /// Error code from a previous attempt
        #[arg(long)]
        error: Option<String>,

        /// Load the widget over plain HTTP
        #[arg(long)]
        insecure: bool,
    },

    /// Verify a solved challenge and print the outcome as JSON
    Verify {
        #[arg(long)]
        challenge: String,

        #[arg(long)]
        response: String,

        /// Address of the user who solved the challenge
        #[arg(long)]
        remote_ip: String,

        /// Extra form field, as name=value (repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// Print the key registration link for a site
    SignupUrl {
        #[arg(long)]
        domain: String,

        #[arg(long)]
        app: String,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got {raw:?}"))
}

fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_logging(&args.log_level, args.json_logs)?;

    let settings = RecaptchaSettings::load(&args.config, &args)?;
    info!(
        host = %settings.transport.host,
        port = settings.transport.port,
        "Configuration loaded from {}",
        args.config
    );

    let recaptcha = build_facade(&settings);
    let output = run(&recaptcha, args.command)?;
    println!("{output}");

    Ok(())
}

fn build_facade(settings: &RecaptchaSettings) -> ReCaptcha<TcpTransport> {
    let client = VerificationClient::new(TcpTransport::new(settings.transport.timeout()))
        .with_endpoint(settings.transport.host.clone(), settings.transport.port);

    let recaptcha = ReCaptcha::new(settings.recaptcha.clone(), client);
    if settings.mailhide == KeyPair::default() {
        recaptcha
    } else {
        recaptcha.with_mailhide_keys(settings.mailhide.clone())
    }
}

fn run<T: recaptcha_core::Transport>(recaptcha: &ReCaptcha<T>, command: Command) -> Result<String> {
    let output = match command {
        Command::HideUrl { address } => recaptcha
            .hide_url(&address)
            .context("Failed to build Mailhide link")?,
        Command::Mask { address } => recaptcha.mask_address(&address)?.to_string(),
        Command::MailhideHtml { address } => recaptcha
            .mailhide_html(&address)
            .context("Failed to build Mailhide markup")?,
        Command::ChallengeHtml { error, insecure } => {
            recaptcha.challenge_html(error.as_deref(), !insecure)?
        }
        Command::Verify {
            challenge,
            response,
            remote_ip,
            fields,
        } => {
            let extra: Vec<(&str, &str)> = fields
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let outcome = recaptcha
                .check_answer(&challenge, &response, &remote_ip, &extra)
                .context("Verification request failed")?;
            info!(is_valid = outcome.is_valid, "Verification complete");
            serde_json::to_string_pretty(&outcome)?
        }
        Command::SignupUrl { domain, app } => {
            if domain.is_empty() {
                bail!("--domain must not be empty");
            }
            recaptcha.signup_url(&domain, &app)
        }
    };

    Ok(output)
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so stdout stays clean for piping
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
            .context("Failed to initialize logging")?;
    }

    Ok(())
}
