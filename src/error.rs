use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(orbit_digest::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(orbit_digest::config))]
    Config(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(orbit_digest::google_calendar))]
    GoogleCalendar(String),

    #[error("Email error: {0}")]
    #[diagnostic(code(orbit_digest::email))]
    Email(String),

    #[error(transparent)]
    #[diagnostic(code(orbit_digest::io))]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    #[diagnostic(code(orbit_digest::other))]
    Other(String),
}

/// Type alias for Result with our Error type
pub type DigestResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(message: &str) -> Error {
    Error::Environment(message.to_string())
}

/// Helper to create configuration errors
#[allow(dead_code)]
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create email errors
#[allow(dead_code)]
pub fn email_error(message: &str) -> Error {
    Error::Email(message.to_string())
}
