//! Typed view of a scheduling provider's availability feed.
//!
//! The provider returns a JSON document shaped like
//! `{ "days": [ { "date", "status", "spots": [ { "status", "start_time", ... } ] } ] }`.
//! Fields this crate does not use are ignored during deserialization.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Bookability of a single spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotStatus {
    Available,
    /// Any status other than `available`.
    #[serde(other)]
    Other,
}

/// Bookability of a whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Available,
    #[serde(other)]
    Unavailable,
}

/// One bookable start-time instant returned by the provider.
///
/// The end of the meeting is never stored; it is always `start_time + duration`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spot {
    pub status: SpotStatus,
    /// Start of the slot, in the offset the provider reported it in.
    pub start_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub invitees_remaining: u32,
}

impl Spot {
    /// An available spot with a single remaining invitee.
    pub fn available(start_time: DateTime<FixedOffset>) -> Self {
        Spot {
            status: SpotStatus::Available,
            start_time,
            invitees_remaining: 1,
        }
    }

    /// End of the meeting if it were booked for `duration_minutes`.
    pub fn end_time(&self, duration_minutes: u32) -> DateTime<FixedOffset> {
        self.start_time + Duration::minutes(i64::from(duration_minutes))
    }
}

/// A calendar day and the spots the provider offers on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityDay {
    pub date: NaiveDate,
    pub status: DayStatus,
    #[serde(default)]
    pub spots: Vec<Spot>,
}

/// The provider's response for a date range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRange {
    #[serde(default)]
    pub days: Vec<AvailabilityDay>,
}

impl AvailabilityRange {
    /// Parse a provider availability payload.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidAvailability` if the payload is not valid JSON
    /// or does not match the expected shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An event type configured on the scheduling account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    /// Resource URI, e.g. `https://api.calendly.com/event_types/ABC123`.
    pub uri: String,
    /// Meeting length in minutes.
    pub duration: u32,
    pub active: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl EventType {
    /// The provider's identifier for this event type: the last segment of its URI.
    pub fn id(&self) -> &str {
        self.uri
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

/// One batch of slot suggestions intended for a single recipient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalSet(pub Vec<Spot>);

impl ProposalSet {
    pub fn spots(&self) -> &[Spot] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The set's spots in ascending `start_time` order.
    pub fn sorted(&self) -> Vec<&Spot> {
        let mut spots: Vec<&Spot> = self.0.iter().collect();
        spots.sort_by_key(|spot| spot.start_time);
        spots
    }
}
