use crate::calendar::Event;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

const NO_MEETINGS: &str = "You have no meetings scheduled today. Enjoy your day!";
const EVENT_SEPARATOR: &str = "\n<============================================================>\n";
const SIGN_OFF: &str = "\nHere's to a day full of wins, big and small!";

/// Formats calendar events into the plain-text digest body
pub struct DigestFormatter {
    timezone: Tz,
}

impl DigestFormatter {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Format events into a digest, dating the header from the current
    /// wall clock in the configured timezone.
    pub fn format_digest(&self, events: &[Event]) -> String {
        self.format_digest_at(events, Utc::now().with_timezone(&self.timezone))
    }

    /// Format events into a digest with an explicit header date.
    ///
    /// Deterministic: the same events and `now` always produce the same
    /// bytes. Events are listed in start order; ties keep their input
    /// order.
    pub fn format_digest_at(&self, events: &[Event], now: DateTime<Tz>) -> String {
        if events.is_empty() {
            return NO_MEETINGS.to_string();
        }

        let mut sorted_events = events.to_vec();
        sorted_events.sort_by_key(|event| event.start);

        let mut lines = vec![
            "Dear Olusegun! ".to_string(),
            String::new(),
            format!(
                "Here's your schedule for today ({}, {} {}):",
                now.format("%a"),
                now.format("%B"),
                now.day()
            ),
            String::new(),
        ];

        for event in &sorted_events {
            lines.push(format!(
                "- {} – {} \n Summary: {}",
                event.start.format("%H:%M"),
                event.end.format("%H:%M"),
                event.summary
            ));

            if let Some(location) = &event.location {
                lines.push(format!("  Location: {}", location));
            }

            if !event.attendees.is_empty() {
                lines.push(format!("  Attendees: {}", event.attendees.join(", ")));
            }

            if let Some(description) = &event.description {
                lines.push(format!("  Description: {}", description));
            }

            lines.push(EVENT_SEPARATOR.to_string());
        }

        lines.push(SIGN_OFF.to_string());

        // Remove a trailing empty line
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        lines.join("\n")
    }
}
