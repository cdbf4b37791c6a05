//! Human-readable rendering of spots and proposal sets.
//!
//! Output is meant to be pasted into an email:
//!
//! ```text
//! - Feb 22, 7:00am MT
//! - Feb 23, 1:30pm MT
//!
//! ```

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::{ProposalSet, Spot};
use crate::timezone::resolve_abbreviation_at;

/// Format a spot as `"Feb 22, 7:00am MT"`, labelling its zone against the current moment.
pub fn format_spot(spot: &Spot) -> Result<String> {
    format_spot_at(spot, Utc::now())
}

/// Format a spot, resolving its zone label against `reference`.
///
/// The month name is always English. Day and hour carry no leading zero,
/// minutes always have two digits, and the am/pm marker is lowercase.
pub fn format_spot_at(spot: &Spot, reference: DateTime<Utc>) -> Result<String> {
    let zone = resolve_abbreviation_at(&spot.start_time, reference)?;
    Ok(format!(
        "{} {}",
        spot.start_time.format("%b %-d, %-I:%M%P"),
        zone
    ))
}

/// Render proposal sets into the final text report.
pub fn render(sets: &[ProposalSet]) -> Result<String> {
    render_at(sets, Utc::now())
}

/// Render proposal sets, resolving zone labels against `reference`.
///
/// Each set is sorted by start time and written as `- <slot>` lines followed by
/// a blank line.
pub fn render_at(sets: &[ProposalSet], reference: DateTime<Utc>) -> Result<String> {
    let mut out = String::new();
    for set in sets {
        for spot in set.sorted() {
            out.push_str("- ");
            out.push_str(&format_spot_at(spot, reference)?);
            out.push('\n');
        }
        out.push('\n');
    }
    Ok(out)
}
