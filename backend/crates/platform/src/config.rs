//! Environment Configuration
//!
//! Small helpers for reading settings from the process environment
//! (populated from `.env` by the binary). Parsing is split from the
//! `std::env` lookup so it can be tested without touching global state.

use std::fmt::Display;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(String),

    #[error("{name} has an invalid value: {reason}")]
    Invalid { name: String, reason: String },
}

/// Outbound SMTP relay settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
}

impl SmtpConfig {
    /// `EMAIL_USER`/`EMAIL_PASS` are required; the sender defaults to the login.
    pub fn from_env() -> Result<Self, ConfigError> {
        let username = require_env("EMAIL_USER")?;
        Ok(Self {
            host: env_or("SMTP_HOST", "smtp.gmail.com"),
            port: parse_env_or("SMTP_PORT", 587)?,
            password: require_secret("EMAIL_PASS")?,
            from_address: env_or("EMAIL_FROM", &username),
            username,
        })
    }
}

/// Cloudinary account credentials
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: SecretString,
}

impl CloudinaryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            cloud_name: require_env("CLOUDINARY_CLOUD_NAME")?,
            api_key: require_env("CLOUDINARY_API_KEY")?,
            api_secret: require_secret("CLOUDINARY_API_SECRET")?,
        })
    }
}

fn lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Read a required, non-empty variable.
pub fn require_env(name: &str) -> Result<String, ConfigError> {
    require_value(name, lookup(name))
}

/// Read a required variable and keep it out of `Debug` output.
pub fn require_secret(name: &str) -> Result<SecretString, ConfigError> {
    require_value(name, lookup(name)).map(SecretString::from)
}

/// Read an optional variable, falling back to `default`.
pub fn env_or(name: &str, default: &str) -> String {
    value_or(lookup(name), default)
}

/// Read and parse an optional variable, falling back to `default`.
pub fn parse_env_or<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    parse_value_or(name, lookup(name), default)
}

pub fn require_value(name: &str, raw: Option<String>) -> Result<String, ConfigError> {
    match raw {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name.to_string())),
    }
}

pub fn value_or(raw: Option<String>, default: &str) -> String {
    raw.filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub fn parse_value_or<T>(name: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match raw.filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name: name.to_string(),
            reason: e.to_string(),
        }),
    }
}
