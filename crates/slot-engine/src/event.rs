//! Pick the account's event type for a requested meeting length.

use crate::error::{Result, SlotError};
use crate::model::EventType;

/// First active event type whose duration equals `duration` minutes, in the
/// order the provider listed them.
///
/// # Errors
/// Returns `SlotError::NoMatchingEvent` if there is none.
pub fn select_event(events: &[EventType], duration: u32) -> Result<&EventType> {
    events
        .iter()
        .find(|event| event.duration == duration && event.active)
        .ok_or(SlotError::NoMatchingEvent { duration })
}
