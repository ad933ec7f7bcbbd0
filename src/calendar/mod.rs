pub mod models;
pub mod token;

pub use models::Event;

use crate::config::Config;
use crate::error::{google_calendar_error, DigestResult};
use crate::utils::time::is_quiet_hours;
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use models::{EventTime, EventsResponse, RawEvent, UNTITLED_EVENT};
use reqwest::Client;
use token::TokenManager;
use tracing::info;
use url::Url;

const EVENTS_ENDPOINT: &str = "https://www.googleapis.com/calendar/v3/calendars/primary/events";

/// Service for fetching the day's events from Google Calendar
pub struct CalendarService {
    token_manager: TokenManager,
    client: Client,
    timezone: Tz,
}

impl CalendarService {
    pub fn new(config: &Config) -> Self {
        let client = Client::new();

        Self {
            token_manager: TokenManager::new(config, client.clone()),
            client,
            timezone: config.timezone,
        }
    }

    /// Get today's events from the primary calendar.
    ///
    /// "Today" is the local midnight-to-midnight window in the configured
    /// timezone; the server expands recurring events and orders by start
    /// time. Cancelled and all-day records are dropped, and when both quiet
    /// bounds are given, events starting inside the quiet window are
    /// dropped too.
    pub async fn get_today_events(
        &mut self,
        quiet_start: Option<u32>,
        quiet_end: Option<u32>,
    ) -> DigestResult<Vec<Event>> {
        let now = Utc::now().with_timezone(&self.timezone);
        let today = now.date_naive();

        let start_naive = today
            .and_hms_micro_opt(0, 0, 0, 0)
            .ok_or_else(|| google_calendar_error("Failed to create datetime"))?;
        let end_naive = today
            .and_hms_micro_opt(23, 59, 59, 999_999)
            .ok_or_else(|| google_calendar_error("Failed to create datetime"))?;

        let start_of_day = local_datetime(&self.timezone, start_naive)?;
        let end_of_day = local_datetime(&self.timezone, end_naive)?;

        info!("Fetching events for {} in {}", today, self.timezone);

        let access_token = self.token_manager.access_token().await?;

        let mut url = Url::parse(EVENTS_ENDPOINT)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;

        let time_min = start_of_day.with_timezone(&Utc).to_rfc3339();
        let time_max = end_of_day.with_timezone(&Utc).to_rfc3339();

        url.query_pairs_mut()
            .append_pair("timeMin", &time_min)
            .append_pair("timeMax", &time_max)
            .append_pair("singleEvents", "true")
            .append_pair("orderBy", "startTime");

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to fetch events: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to fetch events: HTTP {} - {}",
                status, error_body
            )));
        }

        let response_data: EventsResponse = response.json().await.map_err(|e| {
            google_calendar_error(&format!("Failed to parse events response: {}", e))
        })?;

        info!("Found {} events", response_data.items.len());

        let events = filter_events(response_data.items, self.timezone, quiet_start, quiet_end);
        info!("Returning {} filtered events", events.len());

        Ok(events)
    }
}

/// Resolve a naive local time in the given timezone
fn local_datetime(tz: &Tz, naive: NaiveDateTime) -> DigestResult<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(_, _) => Err(google_calendar_error("Ambiguous local time")),
        LocalResult::None => Err(google_calendar_error("Invalid local time")),
    }
}

/// Convert raw records into `Event`s, dropping the ones the digest skips.
///
/// Order is preserved; cancelled records go first, then anything without a
/// timed start and end (all-day events), then events starting inside the
/// quiet window when both bounds are supplied.
pub fn filter_events(
    items: Vec<RawEvent>,
    tz: Tz,
    quiet_start: Option<u32>,
    quiet_end: Option<u32>,
) -> Vec<Event> {
    let mut events = Vec::new();

    for item in items {
        if item.status.as_deref() == Some("cancelled") {
            continue;
        }

        let (Some(start), Some(end)) = (
            item.start.as_ref().and_then(EventTime::as_timed),
            item.end.as_ref().and_then(EventTime::as_timed),
        ) else {
            continue;
        };

        let start = start.with_timezone(&tz);
        let end = end.with_timezone(&tz);

        if let (Some(quiet_start), Some(quiet_end)) = (quiet_start, quiet_end) {
            if is_quiet_hours(&start, quiet_start, quiet_end) {
                continue;
            }
        }

        let attendees = item
            .attendees
            .map(|list| {
                list.into_iter()
                    .map(|attendee| attendee.email.unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();

        events.push(Event {
            summary: item.summary.unwrap_or_else(|| UNTITLED_EVENT.to_string()),
            start,
            end,
            location: item.location,
            attendees,
            description: item.description,
        });
    }

    events
}
