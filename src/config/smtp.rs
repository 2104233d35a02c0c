use crate::utils::error::{OutreachError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Connection security for the SMTP session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Implicit TLS from the first byte (classic port 465).
    Tls,
    /// Plaintext upgraded via STARTTLS (port 587).
    StartTls,
    /// No encryption at all; only sensible against a local relay.
    None,
}

impl TlsMode {
    pub fn default_port(self) -> u16 {
        match self {
            TlsMode::Tls => 465,
            TlsMode::StartTls => 587,
            TlsMode::None => 25,
        }
    }
}

impl FromStr for TlsMode {
    type Err = OutreachError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tls" => Ok(TlsMode::Tls),
            "starttls" => Ok(TlsMode::StartTls),
            "none" => Ok(TlsMode::None),
            other => Err(OutreachError::InvalidConfigValueError {
                field: "SMTP_TLS".to_string(),
                value: other.to_string(),
                reason: "Expected one of: tls, starttls, none".to_string(),
            }),
        }
    }
}

/// SMTP server and sender credentials, read from the process environment.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub tls: TlsMode,
    /// Optional display name for the From mailbox (`SENDER_NAME`).
    pub sender_name: Option<String>,
}

impl SmtpConfig {
    /// Reads `SMTP_HOST`, `SMTP_USER`, `SMTP_PASS` (required) plus `SMTP_PORT`,
    /// `SMTP_TLS`, and `SENDER_NAME` (optional). Loading a `.env` file first
    /// is the caller's job.
    pub fn from_env() -> Result<Self> {
        let host = require_env("SMTP_HOST")?;
        let user = require_env("SMTP_USER")?;
        let pass = require_env("SMTP_PASS")?;

        let tls = match std::env::var("SMTP_TLS") {
            Ok(value) => value.parse()?,
            Err(_) => TlsMode::Tls,
        };

        let port = match std::env::var("SMTP_PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| OutreachError::InvalidConfigValueError {
                    field: "SMTP_PORT".to_string(),
                    value: value.clone(),
                    reason: "Not a valid port number".to_string(),
                })?,
            Err(_) => tls.default_port(),
        };

        let sender_name = std::env::var("SENDER_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty());

        Ok(Self {
            host,
            port,
            user,
            pass,
            tls,
            sender_name,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(OutreachError::config(format!(
            "Missing required environment variable: {}",
            name
        ))),
    }
}
