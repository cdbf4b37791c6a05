//! Thin a provider's raw availability down to eligible, non-overlapping spots.
//!
//! Each day is processed independently: ineligible spots are dropped, the
//! remainder is scanned once left to right keeping only spots that start after
//! the previously kept spot would have ended, and the survivors are shuffled so
//! that the allocator's pick of which spots to offer is random.

use chrono::{Datelike, Duration, Timelike, Weekday};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::model::{AvailabilityDay, DayStatus, Spot, SpotStatus};

/// User preferences that decide which spots may be proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotFilter {
    /// Meeting length; two kept spots never lie closer together than this.
    pub duration_minutes: u32,
    /// Only keep spots whose local hour is strictly greater than this (0..=23).
    pub after_hour: Option<u32>,
    /// Drop spots falling on Saturday or Sunday (local time).
    pub exclude_weekends: bool,
}

impl SlotFilter {
    pub fn new(duration_minutes: u32) -> Self {
        SlotFilter {
            duration_minutes,
            after_hour: None,
            exclude_weekends: false,
        }
    }

    /// Whether a single spot passes the status, hour, and weekday checks.
    ///
    /// Hour and weekday are read in the spot's own UTC offset.
    pub fn eligible(&self, spot: &Spot) -> bool {
        if spot.status != SpotStatus::Available {
            return false;
        }

        // A spot exactly at the cutoff hour is not "after" it.
        if let Some(cutoff) = self.after_hour {
            if spot.start_time.hour() <= cutoff {
                return false;
            }
        }

        if self.exclude_weekends && is_weekend(spot.start_time.weekday()) {
            return false;
        }

        true
    }

    /// Filter every available day, shuffling each day's survivors with `rng`.
    ///
    /// Days reported as unavailable are dropped entirely. Days that end up with
    /// no eligible spots are kept with an empty spot list.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        days: Vec<AvailabilityDay>,
        rng: &mut R,
    ) -> Vec<AvailabilityDay> {
        days.into_iter()
            .filter(|day| day.status == DayStatus::Available)
            .map(|day| {
                let raw_count = day.spots.len();
                let eligible: Vec<Spot> = day
                    .spots
                    .into_iter()
                    .filter(|spot| self.eligible(spot))
                    .collect();
                let mut spots = remove_overlaps(eligible, self.duration_minutes);
                spots.shuffle(rng);

                debug!(
                    date = %day.date,
                    raw = raw_count,
                    kept = spots.len(),
                    "filtered day"
                );

                AvailabilityDay {
                    date: day.date,
                    status: day.status,
                    spots,
                }
            })
            .collect()
    }
}

/// Greedy single-pass overlap elimination.
///
/// The first spot is always kept. Each later spot is kept only if it starts at
/// or after the end of the most recently kept spot. No backtracking: this does
/// not try to maximise the number of kept spots.
pub fn remove_overlaps(spots: Vec<Spot>, duration_minutes: u32) -> Vec<Spot> {
    let duration = Duration::minutes(i64::from(duration_minutes));
    let mut kept: Vec<Spot> = Vec::with_capacity(spots.len());

    for spot in spots {
        if let Some(last) = kept.last() {
            if spot.start_time < last.start_time + duration {
                continue;
            }
        }
        kept.push(spot);
    }

    kept
}

fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}
