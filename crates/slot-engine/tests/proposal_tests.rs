//! End-to-end tests for the proposal pipeline against an in-memory provider.

use std::cell::RefCell;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use rand::rngs::StdRng;
use rand::SeedableRng;
use slot_engine::{
    propose_at, AvailabilityDay, AvailabilityRange, AvailabilitySource, EventType,
    ProposalRequest, Session, SlotError, SourceError,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

struct FakeProvider {
    events: Vec<EventType>,
    range: Option<AvailabilityRange>,
    calls: RefCell<Vec<String>>,
}

impl FakeProvider {
    fn new(events: Vec<EventType>, range: Option<AvailabilityRange>) -> Self {
        FakeProvider {
            events,
            range,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl AvailabilitySource for FakeProvider {
    fn current_user(&self) -> Result<String, SourceError> {
        self.calls.borrow_mut().push("me".to_string());
        Ok("https://api.calendly.com/users/ME".to_string())
    }

    fn event_types(&self, user_uri: &str) -> Result<Vec<EventType>, SourceError> {
        self.calls.borrow_mut().push(format!("event_types {user_uri}"));
        Ok(self.events.clone())
    }

    fn availability(
        &self,
        event_id: &str,
        range_start: NaiveDate,
        range_end: NaiveDate,
        timezone: Tz,
    ) -> Result<Vec<AvailabilityDay>, SourceError> {
        self.calls.borrow_mut().push(format!(
            "range {event_id} {range_start} {range_end} {}",
            timezone.name()
        ));
        // `None` stands in for a non-success response.
        Ok(self.range.clone().map(|r| r.days).unwrap_or_default())
    }
}

struct BrokenProvider;

impl AvailabilitySource for BrokenProvider {
    fn current_user(&self) -> Result<String, SourceError> {
        Err("connection refused".into())
    }

    fn event_types(&self, _user_uri: &str) -> Result<Vec<EventType>, SourceError> {
        unreachable!("identity lookup failed first")
    }

    fn availability(
        &self,
        _event_id: &str,
        _range_start: NaiveDate,
        _range_end: NaiveDate,
        _timezone: Tz,
    ) -> Result<Vec<AvailabilityDay>, SourceError> {
        unreachable!("identity lookup failed first")
    }
}

fn event(id: &str, duration: u32, active: bool) -> EventType {
    EventType {
        uri: format!("https://api.calendly.com/event_types/{id}"),
        duration,
        active,
        name: Some(format!("{duration} Minute Meeting")),
        slug: None,
    }
}

fn fixture_range() -> AvailabilityRange {
    let json = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/range.json"
    ))
    .expect("range.json fixture must exist");
    AvailabilityRange::from_json(&json).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 2, 15, 18, 0, 0).unwrap()
}

fn blocks(report: &str) -> Vec<Vec<&str>> {
    report
        .split("\n\n")
        .filter(|b| !b.is_empty())
        .map(|b| b.lines().collect())
        .collect()
}

// ── Pipeline ────────────────────────────────────────────────────────────────

#[test]
fn default_request_produces_three_sets_of_five() {
    let provider = FakeProvider::new(
        vec![event("LONG", 60, true), event("HALF", 30, true)],
        Some(fixture_range()),
    );
    let mut rng = StdRng::seed_from_u64(42);

    let report = propose_at(&provider, &ProposalRequest::default(), now(), &mut rng).unwrap();

    let sets = blocks(&report);
    assert_eq!(sets.len(), 3);
    for set in &sets {
        assert_eq!(set.len(), 5);
        for line in set {
            assert!(line.starts_with("- Feb "), "unexpected line: {line}");
            assert!(line.ends_with(" MT"), "unexpected line: {line}");
        }
    }
    assert!(report.ends_with("\n\n"));
}

#[test]
fn calls_happen_in_order_with_the_session_event() {
    let provider = FakeProvider::new(vec![event("HALF", 30, true)], Some(fixture_range()));
    let mut rng = StdRng::seed_from_u64(42);
    let request = ProposalRequest {
        days: 14,
        ..ProposalRequest::default()
    };

    propose_at(&provider, &request, now(), &mut rng).unwrap();

    assert_eq!(
        *provider.calls.borrow(),
        vec![
            "me".to_string(),
            "event_types https://api.calendly.com/users/ME".to_string(),
            "range HALF 2022-02-15 2022-03-01 America/Denver".to_string(),
        ]
    );
}

#[test]
fn range_starts_on_today_in_the_request_timezone() {
    let provider = FakeProvider::new(vec![event("HALF", 30, true)], None);
    let mut rng = StdRng::seed_from_u64(42);
    // 03:00 UTC on the 16th is still the 15th in Denver.
    let late = Utc.with_ymd_and_hms(2022, 2, 16, 3, 0, 0).unwrap();

    propose_at(&provider, &ProposalRequest::default(), late, &mut rng).unwrap();

    assert!(provider.calls.borrow()[2].contains("2022-02-15 2022-03-17"));
}

#[test]
fn after_hour_and_weekends_shrink_the_pool() {
    let provider = FakeProvider::new(vec![event("HALF", 30, true)], Some(fixture_range()));
    let mut rng = StdRng::seed_from_u64(42);
    let request = ProposalRequest {
        after_hour: Some(17),
        exclude_weekends: true,
        ..ProposalRequest::default()
    };

    let report = propose_at(&provider, &request, now(), &mut rng).unwrap();

    // Only Tuesday 18:00 and 18:30 survive; the first set takes both.
    assert_eq!(report, "- Feb 22, 6:00pm MT\n- Feb 22, 6:30pm MT\n\n\n\n");
}

#[test]
fn failed_fetch_degrades_to_empty_sets() {
    let provider = FakeProvider::new(vec![event("HALF", 30, true)], None);
    let mut rng = StdRng::seed_from_u64(42);

    let report = propose_at(&provider, &ProposalRequest::default(), now(), &mut rng).unwrap();

    assert_eq!(report, "\n\n\n");
}

#[test]
fn rendering_is_stable_across_shuffles() {
    let provider = FakeProvider::new(vec![event("HALF", 30, true)], Some(fixture_range()));
    let request = ProposalRequest {
        events: 1,
        total: 50,
        slots_per_day: 50,
        ..ProposalRequest::default()
    };

    let a = propose_at(&provider, &request, now(), &mut StdRng::seed_from_u64(1)).unwrap();
    let b = propose_at(&provider, &request, now(), &mut StdRng::seed_from_u64(99)).unwrap();

    assert_eq!(a, b);
    assert!(a.starts_with("- Feb 22, 7:00am MT\n- Feb 22, 7:45am MT\n"));
}

// ── Failures ────────────────────────────────────────────────────────────────

#[test]
fn no_matching_event_aborts_before_fetching() {
    let provider = FakeProvider::new(
        vec![event("HALF", 30, false), event("LONG", 60, true)],
        Some(fixture_range()),
    );
    let mut rng = StdRng::seed_from_u64(42);

    let err = propose_at(&provider, &ProposalRequest::default(), now(), &mut rng).unwrap_err();

    assert!(matches!(err, SlotError::NoMatchingEvent { duration: 30 }));
    assert_eq!(provider.calls.borrow().len(), 2);
}

#[test]
fn provider_errors_propagate() {
    let err = Session::open(&BrokenProvider, 30).unwrap_err();
    assert!(matches!(err, SlotError::Provider(_)));
    assert!(err.to_string().contains("connection refused"));
}
