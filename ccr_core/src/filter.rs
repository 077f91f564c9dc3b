//! Cutoff filtering of assembled events.

use chrono::{DateTime, FixedOffset};

use crate::event::EventRecord;

/// Keep events touched at or after `cutoff`.
///
/// An event qualifies when its start, creation or last-modification instant
/// is at or after the cutoff; absent instants never qualify. The input order
/// is preserved and the input is consumed exactly once.
pub fn retain_recent(
    events: impl IntoIterator<Item = EventRecord>,
    cutoff: DateTime<FixedOffset>,
) -> impl Iterator<Item = EventRecord> {
    events.into_iter().filter(move |event| {
        event.start >= cutoff
            || event.created.is_some_and(|created| created >= cutoff)
            || event.modified.is_some_and(|modified| modified >= cutoff)
    })
}
