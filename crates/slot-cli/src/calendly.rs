//! Calendly-backed [`AvailabilitySource`].
//!
//! Account lookups go through the authenticated v2 API. Availability comes from
//! the public booking endpoint that backs Calendly's own scheduling page.

use chrono::NaiveDate;
use chrono_tz::Tz;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use slot_engine::{AvailabilityDay, AvailabilityRange, AvailabilitySource, EventType, SourceError};
use tracing::{debug, warn};

const API_BASE: &str = "https://api.calendly.com";
const BOOKING_BASE: &str = "https://calendly.com/api/booking";

#[derive(Debug, Deserialize)]
struct UserResponse {
    resource: UserResource,
}

#[derive(Debug, Deserialize)]
struct UserResource {
    uri: String,
}

#[derive(Debug, Deserialize)]
struct EventTypePage {
    collection: Vec<EventType>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    #[serde(default)]
    next_page: Option<String>,
}

/// Blocking Calendly client authenticated with a personal access token.
#[derive(Debug, Clone)]
pub struct CalendlyClient {
    http: Client,
    api_key: String,
}

impl CalendlyClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        CalendlyClient {
            http: Client::new(),
            api_key: api_key.into(),
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, reqwest::Error> {
        debug!(url, "GET");
        self.http
            .get(url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()?
            .error_for_status()?
            .json()
    }
}

impl AvailabilitySource for CalendlyClient {
    fn current_user(&self) -> Result<String, SourceError> {
        let user: UserResponse = self.get_json(&format!("{API_BASE}/users/me"), &[])?;
        Ok(user.resource.uri)
    }

    fn event_types(&self, user_uri: &str) -> Result<Vec<EventType>, SourceError> {
        let mut page: EventTypePage =
            self.get_json(&format!("{API_BASE}/event_types"), &[("user", user_uri)])?;
        let mut events = std::mem::take(&mut page.collection);

        while let Some(next) = page.pagination.take().and_then(|p| p.next_page) {
            page = self.get_json(&next, &[])?;
            events.append(&mut page.collection);
        }

        Ok(events)
    }

    fn availability(
        &self,
        event_id: &str,
        range_start: NaiveDate,
        range_end: NaiveDate,
        timezone: Tz,
    ) -> Result<Vec<AvailabilityDay>, SourceError> {
        let url = availability_url(event_id);
        let range_start = range_start.format("%Y-%m-%d").to_string();
        let range_end = range_end.format("%Y-%m-%d").to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("timezone", timezone.name()),
                ("diagnostics", "false"),
                ("range_start", range_start.as_str()),
                ("range_end", range_end.as_str()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, event_id, "error fetching slots");
            return range_days(status, "");
        }

        let body = response.text()?;
        range_days(status, &body)
    }
}

/// Days from an availability response. Any non-success status means no
/// availability rather than an error.
fn range_days(status: StatusCode, body: &str) -> Result<Vec<AvailabilityDay>, SourceError> {
    if !status.is_success() {
        return Ok(Vec::new());
    }
    Ok(AvailabilityRange::from_json(body)?.days)
}

fn availability_url(event_id: &str) -> String {
    format!("{BOOKING_BASE}/event_types/{event_id}/calendar/range")
}
