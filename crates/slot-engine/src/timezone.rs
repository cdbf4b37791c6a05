//! Short, human-friendly timezone labels for fixed-offset instants.
//!
//! A provider timestamp only carries a UTC offset, not a zone name. The label is
//! recovered by finding every IANA zone that observes that offset at a
//! reference moment, picking the shortest identifier, and tidying it up:
//! `-07:00` becomes `MST` and then `MT`.
//!
//! The reference moment is "now", not the instant being labelled. An instant in
//! a different DST regime than today can therefore get the neighbouring zone's
//! label. [`resolve_abbreviation_at`] takes the reference explicitly.
//!
//! Shortest-name wins can pick an unfamiliar zone. While Denver observes
//! daylight time, a -06:00 instant resolves to `Navajo` (shorter than
//! `CST6CDT`, which is on -05:00 by then), so that output is expected in summer.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use chrono_tz::{Tz, TZ_VARIANTS};

use crate::error::{Result, SlotError};

/// POSIX-style identifiers mapped back to their conventional short form.
const OVERRIDES: &[(&str, &str)] = &[
    ("CST6CDT", "CST"),
    ("PST8PDT", "PST"),
    ("MST7MDT", "MST"),
    ("EST5EDT", "EST"),
];

/// Friendly names accepted in place of an IANA identifier.
const ALIASES: &[(&str, Tz)] = &[
    ("PST", chrono_tz::America::Los_Angeles),
    ("CST", chrono_tz::America::Chicago),
    ("MST", chrono_tz::America::Denver),
    ("EST", chrono_tz::America::New_York),
];

/// Parse an IANA timezone name or one of the friendly aliases `PST`, `CST`,
/// `MST`, `EST`.
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` if the name is neither.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    let trimmed = name.trim();
    if let Some((_, tz)) = ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(trimmed))
    {
        return Ok(*tz);
    }
    trimmed
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Label for `instant`'s offset, resolved against the current moment.
///
/// # Errors
/// Returns `SlotError::UnresolvedOffset` if no zone currently has that offset.
pub fn resolve_abbreviation(instant: &DateTime<FixedOffset>) -> Result<String> {
    resolve_abbreviation_at(instant, Utc::now())
}

/// Label for `instant`'s offset, resolved against the zones' offsets at `reference`.
///
/// Among matching zones the shortest identifier wins; equal lengths are broken
/// lexicographically so the result is deterministic.
///
/// # Errors
/// Returns `SlotError::UnresolvedOffset` if no zone has that offset at `reference`.
pub fn resolve_abbreviation_at(
    instant: &DateTime<FixedOffset>,
    reference: DateTime<Utc>,
) -> Result<String> {
    let offset_seconds = instant.offset().local_minus_utc();

    let best = TZ_VARIANTS
        .iter()
        .filter(|tz| offset_at(**tz, reference) == offset_seconds)
        .map(|tz| tz.name())
        .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
        .ok_or(SlotError::UnresolvedOffset { offset_seconds })?;

    Ok(shorten(best))
}

/// Apply the override table, then collapse a trailing `ST` to `T`.
fn shorten(zone_name: &str) -> String {
    let name = OVERRIDES
        .iter()
        .find(|(from, _)| *from == zone_name)
        .map_or(zone_name, |(_, to)| *to);

    match name.strip_suffix("ST") {
        Some(stem) if !stem.is_empty() => format!("{stem}T"),
        _ => name.to_string(),
    }
}

fn offset_at(tz: Tz, reference: DateTime<Utc>) -> i32 {
    reference.with_timezone(&tz).offset().fix().local_minus_utc()
}
