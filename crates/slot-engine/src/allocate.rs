//! Partition a pool of filtered days into disjoint proposal sets.

use tracing::debug;

use crate::model::{AvailabilityDay, ProposalSet};

/// Capacity limits for proposal allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationLimits {
    /// Number of proposal sets to produce.
    pub sets: usize,
    /// Maximum spots in one proposal set.
    pub total_per_set: usize,
    /// Maximum spots one day may contribute to a single proposal set.
    pub per_day_cap: usize,
}

/// Drain spots from `days` into `limits.sets` proposal sets.
///
/// Sets are filled one after another. Each walks the days in order and pops up
/// to `min(per_day_cap, room left in the set, spots left in the day)` spots off
/// the end of every day's pool. A spot taken by one set is gone for the next,
/// so later sets may come back short or empty when supply runs out.
///
/// Always returns exactly `limits.sets` sets.
pub fn allocate(days: &mut [AvailabilityDay], limits: AllocationLimits) -> Vec<ProposalSet> {
    (0..limits.sets)
        .map(|index| {
            let mut taken = Vec::with_capacity(limits.total_per_set);

            for day in days.iter_mut() {
                if taken.len() >= limits.total_per_set {
                    break;
                }
                let quota = limits
                    .per_day_cap
                    .min(limits.total_per_set - taken.len())
                    .min(day.spots.len());

                for _ in 0..quota {
                    if let Some(spot) = day.spots.pop() {
                        taken.push(spot);
                    }
                }
            }

            debug!(set = index, spots = taken.len(), "allocated proposal set");
            ProposalSet(taken)
        })
        .collect()
}
