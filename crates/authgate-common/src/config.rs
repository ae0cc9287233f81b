//! Application settings.
//!
//! The browser build has no process environment, so the web crate bakes
//! these in at compile time and feeds them through [`AppConfig::from_lookup`].

use thiserror::Error;

use crate::locale::Locale;

pub const BACKEND_URL_VAR: &str = "BACKEND_URL";
pub const LOGIN_DELAY_VAR: &str = "LOGIN_REDIRECT_DELAY_MS";
pub const REGISTER_DELAY_VAR: &str = "REGISTER_REDIRECT_DELAY_MS";
pub const CLEAR_ON_REJECTION_VAR: &str = "CLEAR_SESSION_ON_REJECTION";
pub const LOCALE_VAR: &str = "LOCALE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got `{value}`")]
    InvalidDelay { var: &'static str, value: String },
    #[error("{var} must be true or false, got `{value}`")]
    InvalidFlag { var: &'static str, value: String },
    #[error("{0}")]
    InvalidLocale(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend origin. Empty means same origin.
    pub backend_url: String,
    /// Pause between the login success alert and navigation.
    pub login_redirect_delay_ms: u32,
    /// Pause between the registration success message and navigation.
    pub register_redirect_delay_ms: u32,
    /// Drop the stored session when `/private` rejects its token.
    pub clear_session_on_rejection: bool,
    pub locale: Locale,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            login_redirect_delay_ms: 200,
            register_redirect_delay_ms: 1_500,
            clear_session_on_rejection: true,
            locale: Locale::En,
        }
    }
}

impl AppConfig {
    /// Build from a variable lookup; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(BACKEND_URL_VAR) {
            config.backend_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(value) = lookup(LOGIN_DELAY_VAR) {
            config.login_redirect_delay_ms = parse_delay(LOGIN_DELAY_VAR, value)?;
        }
        if let Some(value) = lookup(REGISTER_DELAY_VAR) {
            config.register_redirect_delay_ms = parse_delay(REGISTER_DELAY_VAR, value)?;
        }
        if let Some(value) = lookup(CLEAR_ON_REJECTION_VAR) {
            config.clear_session_on_rejection = parse_flag(CLEAR_ON_REJECTION_VAR, value)?;
        }
        if let Some(value) = lookup(LOCALE_VAR) {
            config.locale = value.parse().map_err(ConfigError::InvalidLocale)?;
        }

        Ok(config)
    }
}

fn parse_delay(var: &'static str, value: String) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidDelay { var, value })
}

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { var, value }),
    }
}
