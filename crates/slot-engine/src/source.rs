//! The boundary to the scheduling provider.
//!
//! Implementations do the network I/O; everything in this crate only consumes
//! what they return.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::debug;

use crate::error::{Result, SlotError, SourceError};
use crate::event::select_event;
use crate::model::{AvailabilityDay, EventType};

/// Read-only access to a scheduling account and its availability.
pub trait AvailabilitySource {
    /// URI of the authenticated account.
    fn current_user(&self) -> std::result::Result<String, SourceError>;

    /// Event types configured on the account, in provider order.
    fn event_types(&self, user_uri: &str) -> std::result::Result<Vec<EventType>, SourceError>;

    /// Per-day availability for `event_id` between two dates, inclusive,
    /// with spot times expressed in `timezone`.
    ///
    /// A non-success response from the provider should be reported as
    /// `Ok(vec![])`; only transport-level failures are errors.
    fn availability(
        &self,
        event_id: &str,
        range_start: NaiveDate,
        range_end: NaiveDate,
        timezone: Tz,
    ) -> std::result::Result<Vec<AvailabilityDay>, SourceError>;
}

/// Account and event type resolved once at the start of a run and passed to
/// every later step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_uri: String,
    pub event: EventType,
}

impl Session {
    /// Look up the account and select its active event type of `duration` minutes.
    ///
    /// # Errors
    /// Returns `SlotError::Provider` if either lookup fails and
    /// `SlotError::NoMatchingEvent` if no active event type has that duration.
    pub fn open<S: AvailabilitySource + ?Sized>(source: &S, duration: u32) -> Result<Self> {
        let user_uri = source.current_user().map_err(SlotError::Provider)?;
        let events = source.event_types(&user_uri).map_err(SlotError::Provider)?;
        debug!(user = %user_uri, event_types = events.len(), "loaded account");

        let event = select_event(&events, duration)?.clone();
        Ok(Session { user_uri, event })
    }

    /// Fetch this session's event availability for a date range.
    pub fn availability<S: AvailabilitySource + ?Sized>(
        &self,
        source: &S,
        range_start: NaiveDate,
        range_end: NaiveDate,
        timezone: Tz,
    ) -> Result<Vec<AvailabilityDay>> {
        source
            .availability(self.event.id(), range_start, range_end, timezone)
            .map_err(SlotError::Provider)
    }
}
