//! End-to-end proposal generation: fetch, filter, allocate, render.

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use rand::Rng;
use tracing::{debug, warn};

use crate::allocate::{allocate, AllocationLimits};
use crate::error::Result;
use crate::filter::SlotFilter;
use crate::format::render_at;
use crate::source::{AvailabilitySource, Session};

/// Everything a caller can tune about one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalRequest {
    /// Meeting length in minutes; also selects the event type.
    pub duration_minutes: u32,
    /// How many days ahead of today to look for availability.
    pub days: u32,
    /// Timezone the provider reports spot times in.
    pub timezone: Tz,
    /// Only propose spots whose local hour is strictly greater than this.
    pub after_hour: Option<u32>,
    pub exclude_weekends: bool,
    /// Maximum spots per proposal set.
    pub total: usize,
    /// Number of proposal sets.
    pub events: usize,
    /// Maximum spots one day contributes to a proposal set.
    pub slots_per_day: usize,
}

impl Default for ProposalRequest {
    fn default() -> Self {
        ProposalRequest {
            duration_minutes: 30,
            days: 30,
            timezone: chrono_tz::America::Denver,
            after_hour: None,
            exclude_weekends: false,
            total: 5,
            events: 3,
            slots_per_day: 3,
        }
    }
}

impl ProposalRequest {
    pub fn slot_filter(&self) -> SlotFilter {
        SlotFilter {
            duration_minutes: self.duration_minutes,
            after_hour: self.after_hour,
            exclude_weekends: self.exclude_weekends,
        }
    }

    pub fn limits(&self) -> AllocationLimits {
        AllocationLimits {
            sets: self.events,
            total_per_set: self.total,
            per_day_cap: self.slots_per_day,
        }
    }
}

/// Produce the proposal report for `request`, using the current time.
pub fn propose<S, R>(source: &S, request: &ProposalRequest, rng: &mut R) -> Result<String>
where
    S: AvailabilitySource + ?Sized,
    R: Rng + ?Sized,
{
    propose_at(source, request, Utc::now(), rng)
}

/// Produce the proposal report for `request` as if run at `now`.
///
/// `now` fixes both the first day of the availability window (today in the
/// request's timezone) and the moment zone labels are resolved against.
///
/// # Errors
/// Fails if the account lookups fail, if no active event type matches the
/// requested duration, or if a spot's offset cannot be labelled. A provider
/// that reports no availability yields empty proposal sets, not an error.
pub fn propose_at<S, R>(
    source: &S,
    request: &ProposalRequest,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<String>
where
    S: AvailabilitySource + ?Sized,
    R: Rng + ?Sized,
{
    let session = Session::open(source, request.duration_minutes)?;

    let range_start = now.with_timezone(&request.timezone).date_naive();
    let range_end = window_end(range_start, request.days);

    let raw_days = session.availability(source, range_start, range_end, request.timezone)?;
    debug!(
        event = session.event.id(),
        %range_start,
        %range_end,
        days = raw_days.len(),
        "fetched availability"
    );

    let mut days = request.slot_filter().apply(raw_days, rng);
    let sets = allocate(&mut days, request.limits());

    render_at(&sets, now)
}

/// Last day of a `days`-long lookahead window, clamped to the latest
/// representable date.
fn window_end(range_start: NaiveDate, days: u32) -> NaiveDate {
    range_start
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or_else(|| {
            warn!(%range_start, days, "lookahead window overflows; clamping");
            NaiveDate::MAX
        })
}
