use crate::config::Config;
use chrono::Local;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{error, info};

const SEND_ENDPOINT: &str = "https://api.resend.com/emails";

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern is valid");
}

/// Sends digest emails through the Resend API
pub struct EmailSender {
    api_key: String,
    sender_email: String,
    client: Client,
}

impl EmailSender {
    pub fn new(config: &Config) -> Self {
        info!("Email sender initialized with sender: {}", config.sender_email);

        Self {
            api_key: config.resend_api_key.clone(),
            sender_email: config.sender_email.clone(),
            client: Client::new(),
        }
    }

    /// Send an email.
    ///
    /// Returns whether the transport accepted the message. Invalid input
    /// and delivery failures are logged and reported as `false`; nothing
    /// here propagates an error.
    pub async fn send_email(&self, recipient: &str, subject: &str, body: &str) -> bool {
        if !validate_email(recipient) {
            error!("Invalid recipient email: {}", recipient);
            return false;
        }

        if subject.trim().is_empty() {
            error!("Empty email subject");
            return false;
        }

        if body.trim().is_empty() {
            error!("Empty email body");
            return false;
        }

        let payload = json!({
            "from": self.sender_email,
            "to": [recipient],
            "subject": subject,
            "text": body,
        });

        let response = match self
            .client
            .post(SEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to send email to {}: {}", recipient, e);
                return false;
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            error!(
                "Failed to send email to {}: HTTP {} - {}",
                recipient, status, error_body
            );
            return false;
        }

        match response.json::<Value>().await {
            Ok(body) => {
                let id = body.get("id").and_then(Value::as_str).unwrap_or("unknown");
                info!("Email sent successfully to {}, ID: {}", recipient, id);
            }
            Err(_) => info!("Email sent successfully to {}", recipient),
        }

        true
    }

    /// Send a digest email with the dated subject line.
    pub async fn send_digest(&self, recipient: &str, content: &str) -> bool {
        let today = Local::now().format("%Y-%m-%d");
        let subject = format!("Your schedule for today - {}", today);

        self.send_email(recipient, &subject, content).await
    }
}

/// Check an address against the expected `local@domain.tld` shape
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_addresses() {
        assert!(validate_email("user@domain.co"));
        assert!(validate_email("first.last+tag@sub.domain.com"));
        assert!(validate_email("user_name%x@domain-name.org"));
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        assert!(!validate_email(""));
        assert!(!validate_email("user@"));
        assert!(!validate_email("@domain.com"));
        assert!(!validate_email("user@domain"));
        assert!(!validate_email("user@domain.c"));
        assert!(!validate_email("user domain.com"));
    }
}
