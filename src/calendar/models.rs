use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::Tz;
use serde::Deserialize;

/// Summary substituted when a record carries no title
pub const UNTITLED_EVENT: &str = "No title";

/// Start or end of a raw calendar record.
///
/// The API sends either a date-only object for all-day events or a
/// `dateTime` object for timed ones; decoding picks the branch up front so
/// the all-day case is an explicit variant rather than a field-presence
/// check. When both fields are present the all-day reading wins.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    AllDay {
        date: NaiveDate,
    },
    Timed {
        #[serde(rename = "dateTime")]
        date_time: DateTime<FixedOffset>,
    },
}

impl EventTime {
    /// The instant of a timed record, `None` for all-day records.
    pub fn as_timed(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            EventTime::Timed { date_time } => Some(*date_time),
            EventTime::AllDay { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAttendee {
    pub email: Option<String>,
}

/// Raw event record as returned by the Calendar API
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub status: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    pub attendees: Option<Vec<RawAttendee>>,
}

/// Envelope of the events list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub items: Vec<RawEvent>,
}

/// A timed calendar event, start and end converted into the digest's
/// target timezone.
#[derive(Debug, Clone)]
pub struct Event {
    pub summary: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub location: Option<String>,
    pub attendees: Vec<String>,
    pub description: Option<String>,
}
