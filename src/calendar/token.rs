use crate::config::Config;
use crate::error::{google_calendar_error, DigestResult};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Manages the OAuth access token for the Calendar API.
///
/// The long-lived refresh token comes from the configuration; the
/// short-lived access token is cached in memory together with its expiry.
pub struct TokenManager {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    client: Client,
    cached: Option<CachedToken>,
}

struct CachedToken {
    access_token: String,
    expires_at: i64,
}

impl TokenManager {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            refresh_token: config.google_refresh_token.clone(),
            client,
            cached: None,
        }
    }

    /// Get a valid access token, refreshing through the OAuth endpoint when
    /// the cached one is missing or expired.
    pub async fn access_token(&mut self) -> DigestResult<String> {
        if let Some(cached) = &self.cached {
            if cached.expires_at > Utc::now().timestamp() {
                return Ok(cached.access_token.clone());
            }
        }

        self.refresh().await
    }

    /// Exchange the refresh token for a new access token
    async fn refresh(&mut self) -> DigestResult<String> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let token: Value = response.json().await.map_err(|e| {
            google_calendar_error(&format!("Failed to parse token response: {}", e))
        })?;

        let access_token = token
            .get("access_token")
            .and_then(|t| t.as_str())
            .ok_or_else(|| google_calendar_error("Token response missing 'access_token' field"))?
            .to_string();

        let expires_in = token
            .get("expires_in")
            .and_then(|v| v.as_i64())
            .unwrap_or(3600);
        debug!("Access token refreshed, valid for {}s", expires_in);

        self.cached = Some(CachedToken {
            access_token: access_token.clone(),
            expires_at: Utc::now().timestamp() + expires_in,
        });

        Ok(access_token)
    }
}
