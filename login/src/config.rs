//! Login configuration with environment overrides.
//!
//! The browser build uses [`LoginConfig::default`]; native callers can
//! override each field through `ARVON_*` variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::challenge::{DEFAULT_CHALLENGE_SCRIPT_URL, DEFAULT_SITE_KEY};
use crate::error::ConfigError;
use crate::notice::DEFAULT_TOAST_DURATION_MS;
use crate::service::DEFAULT_LOGIN_URL;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginConfig {
    pub login_url: String,
    pub challenge_script_url: String,
    pub site_key: String,
    pub toast_duration_ms: u32,
    pub request_timeout_secs: u64,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_owned(),
            challenge_script_url: DEFAULT_CHALLENGE_SCRIPT_URL.to_owned(),
            site_key: DEFAULT_SITE_KEY.to_owned(),
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl LoginConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `ARVON_AUTH_URL`: login endpoint (default `http://localhost:3005/auth/login`)
    /// - `ARVON_CHALLENGE_SCRIPT_URL`: challenge provider script
    /// - `ARVON_SITE_KEY`: challenge site key
    /// - `ARVON_TOAST_DURATION_MS`: default 5000
    /// - `ARVON_REQUEST_TIMEOUT_SECS`: default 30
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a URL is not http(s) or the site key is blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LoginConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a URL is not http(s) or the site key is blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let login_url = match lookup("ARVON_AUTH_URL") {
            Some(raw) => parse_url("ARVON_AUTH_URL", &raw)?,
            None => defaults.login_url,
        };
        let challenge_script_url = match lookup("ARVON_CHALLENGE_SCRIPT_URL") {
            Some(raw) => parse_url("ARVON_CHALLENGE_SCRIPT_URL", &raw)?,
            None => defaults.challenge_script_url,
        };
        let site_key = match lookup("ARVON_SITE_KEY") {
            Some(raw) if raw.trim().is_empty() => return Err(ConfigError::Empty { var: "ARVON_SITE_KEY" }),
            Some(raw) => raw.trim().to_owned(),
            None => defaults.site_key,
        };
        let toast_duration_ms = parse_or(&lookup, "ARVON_TOAST_DURATION_MS", defaults.toast_duration_ms);
        let request_timeout_secs = parse_or(&lookup, "ARVON_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs);

        Ok(Self { login_url, challenge_script_url, site_key, toast_duration_ms, request_timeout_secs })
    }
}

fn parse_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidUrl { var, value: raw.to_owned() });
    }
    Ok(trimmed.to_owned())
}

fn parse_or<T, F>(lookup: &F, var: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(var, value = %raw, "ignoring malformed number");
            default
        }
    }
}
