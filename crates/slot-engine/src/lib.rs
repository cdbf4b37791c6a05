//! # slot-engine
//!
//! Turns a scheduling provider's availability feed into short lists of meeting
//! times you can paste into an email.
//!
//! Raw per-day spots are filtered by preference (hour cutoff, weekends),
//! thinned so no two offered spots overlap for the meeting's duration, shuffled,
//! and dealt out into several disjoint proposal sets, one per recipient. Each
//! set is rendered sorted, as lines like `- Feb 22, 7:00am MT`.
//!
//! ## Modules
//!
//! - [`model`] — Availability days, spots, event types, proposal sets
//! - [`filter`] — Eligibility checks, greedy overlap removal, shuffling
//! - [`allocate`] — Disjoint, capped partition into proposal sets
//! - [`timezone`] — UTC offset → short zone label (`MT`, `ET`, ...)
//! - [`format`] — Spot and report rendering
//! - [`event`] — Event type selection by duration
//! - [`source`] — Provider boundary and per-run session
//! - [`proposal`] — The end-to-end pipeline
//! - [`error`] — Error types

pub mod allocate;
pub mod error;
pub mod event;
pub mod filter;
pub mod format;
pub mod model;
pub mod proposal;
pub mod source;
pub mod timezone;

pub use allocate::{allocate, AllocationLimits};
pub use error::{SlotError, SourceError};
pub use event::select_event;
pub use filter::{remove_overlaps, SlotFilter};
pub use format::{format_spot, format_spot_at, render, render_at};
pub use model::{AvailabilityDay, AvailabilityRange, DayStatus, EventType, ProposalSet, Spot, SpotStatus};
pub use proposal::{propose, propose_at, ProposalRequest};
pub use source::{AvailabilitySource, Session};
pub use timezone::{parse_timezone, resolve_abbreviation, resolve_abbreviation_at};
