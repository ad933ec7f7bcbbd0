use crate::error::{env_error, DigestResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use std::env;

/// Main configuration structure for the digest run
#[derive(Debug, Clone)]
pub struct Config {
    /// Google OAuth client ID
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Google OAuth refresh token
    pub google_refresh_token: String,
    /// Resend API key for outbound email
    pub resend_api_key: String,
    /// Address the digest is sent from
    pub sender_email: String,
    /// Address the digest is sent to
    pub email_recipient: String,
    /// Timezone the digest is computed in
    pub timezone: Tz,
    /// Hour of day the external scheduler fires the digest
    pub digest_hour: u32,
    /// First hour of the quiet window
    pub quiet_hours_start: u32,
    /// First hour after the quiet window
    pub quiet_hours_end: u32,
}

impl Config {
    /// Load configuration from the process environment, reading a `.env`
    /// file first if one exists.
    pub fn load() -> DigestResult<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from a variable lookup. Every missing variable,
    /// unparseable hour, out-of-range hour and unrecognized timezone is
    /// collected so the error names all of them at once.
    pub fn from_lookup<F>(lookup: F) -> DigestResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut invalid = Vec::new();

        let google_client_id = required(&lookup, "GOOGLE_CLIENT_ID", &mut missing);
        let google_client_secret = required(&lookup, "GOOGLE_CLIENT_SECRET", &mut missing);
        let google_refresh_token = required(&lookup, "GOOGLE_REFRESH_TOKEN", &mut missing);
        let resend_api_key = required(&lookup, "RESEND_API_KEY", &mut missing);
        let sender_email = required(&lookup, "SENDER_EMAIL", &mut missing);
        let email_recipient = required(&lookup, "EMAIL_RECIPIENT", &mut missing);

        let timezone = match required(&lookup, "TIMEZONE", &mut missing).as_str() {
            "" => Tz::UTC,
            name => name.parse::<Tz>().unwrap_or_else(|_| {
                invalid.push(format!("Invalid timezone: {name}"));
                Tz::UTC
            }),
        };

        let digest_hour = hour(&lookup, "DIGEST_HOUR", &mut missing, &mut invalid);
        let quiet_hours_start = hour(&lookup, "QUIET_HOURS_START", &mut missing, &mut invalid);
        let quiet_hours_end = hour(&lookup, "QUIET_HOURS_END", &mut missing, &mut invalid);

        let mut problems = Vec::new();
        if !missing.is_empty() {
            problems.push(format!(
                "Missing required environment variable: {}",
                missing.join(", ")
            ));
        }
        problems.extend(invalid);

        if !problems.is_empty() {
            return Err(env_error(&problems.join("; ")));
        }

        Ok(Config {
            google_client_id,
            google_client_secret,
            google_refresh_token,
            resend_api_key,
            sender_email,
            email_recipient,
            timezone,
            digest_hour,
            quiet_hours_start,
            quiet_hours_end,
        })
    }
}

/// Read a required variable, recording it as missing when absent or empty.
/// The placeholder value is never observable: a non-empty `missing` list
/// fails the load before the config is returned.
fn required<F>(lookup: &F, name: &'static str, missing: &mut Vec<&'static str>) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.is_empty() => value,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

/// Read a required hour-of-day variable, constrained to 0-23.
fn hour<F>(
    lookup: &F,
    name: &'static str,
    missing: &mut Vec<&'static str>,
    invalid: &mut Vec<String>,
) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match lookup(name) {
        Some(value) if !value.is_empty() => value,
        _ => {
            missing.push(name);
            return 0;
        }
    };

    match raw.parse::<u32>() {
        Ok(value) if value <= 23 => value,
        Ok(value) => {
            invalid.push(format!("Invalid hour value for {name}: {value}"));
            0
        }
        Err(_) => {
            invalid.push(format!("Invalid hour value for {name}: {raw}"));
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("GOOGLE_CLIENT_ID", "client-id"),
            ("GOOGLE_CLIENT_SECRET", "client-secret"),
            ("GOOGLE_REFRESH_TOKEN", "refresh-token"),
            ("RESEND_API_KEY", "re_123"),
            ("SENDER_EMAIL", "digest@example.com"),
            ("EMAIL_RECIPIENT", "user@example.com"),
            ("TIMEZONE", "Europe/London"),
            ("DIGEST_HOUR", "7"),
            ("QUIET_HOURS_START", "22"),
            ("QUIET_HOURS_END", "7"),
        ])
    }

    fn lookup_in(
        vars: HashMap<&'static str, &'static str>,
    ) -> impl Fn(&str) -> Option<String> {
        move |name| vars.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_loads_complete_config() {
        let config = Config::from_lookup(lookup_in(full_vars())).unwrap();

        assert_eq!(config.google_client_id, "client-id");
        assert_eq!(config.email_recipient, "user@example.com");
        assert_eq!(config.timezone, chrono_tz::Europe::London);
        assert_eq!(config.digest_hour, 7);
        assert_eq!(config.quiet_hours_start, 22);
        assert_eq!(config.quiet_hours_end, 7);
    }

    #[test]
    fn test_missing_variables_reported_together() {
        let mut vars = full_vars();
        vars.remove("GOOGLE_CLIENT_ID");
        vars.remove("RESEND_API_KEY");

        let err = Config::from_lookup(lookup_in(vars)).unwrap_err();
        let message = err.to_string();

        assert!(message.contains("GOOGLE_CLIENT_ID"));
        assert!(message.contains("RESEND_API_KEY"));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut vars = full_vars();
        vars.insert("SENDER_EMAIL", "");

        let err = Config::from_lookup(lookup_in(vars)).unwrap_err();
        assert!(err.to_string().contains("SENDER_EMAIL"));
    }

    #[test]
    fn test_invalid_hours_and_timezone_batched() {
        let mut vars = full_vars();
        vars.insert("TIMEZONE", "Not/AZone");
        vars.insert("DIGEST_HOUR", "seven");
        vars.insert("QUIET_HOURS_START", "24");

        let err = Config::from_lookup(lookup_in(vars)).unwrap_err();
        let message = err.to_string();

        assert!(message.contains("Invalid timezone: Not/AZone"));
        assert!(message.contains("Invalid hour value for DIGEST_HOUR: seven"));
        assert!(message.contains("Invalid hour value for QUIET_HOURS_START: 24"));
    }

    #[test]
    fn test_hour_boundaries_accepted() {
        let mut vars = full_vars();
        vars.insert("QUIET_HOURS_START", "0");
        vars.insert("QUIET_HOURS_END", "23");

        let config = Config::from_lookup(lookup_in(vars)).unwrap();
        assert_eq!(config.quiet_hours_start, 0);
        assert_eq!(config.quiet_hours_end, 23);
    }
}
