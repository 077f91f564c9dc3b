//! Assembly of decoded properties into completed event records.

use anyhow::Result;
use chrono::{DateTime, Duration, FixedOffset};
use chrono_tz::Tz;

use crate::{
    classify, datetime,
    property::{self, Property},
    unfold,
};

/// One event from the feed, frozen after assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub start: DateTime<FixedOffset>,
    pub end: Option<DateTime<FixedOffset>>,
    /// Derived from `start` and `end`; zero when `end` is absent.
    pub duration: Duration,
    pub summary: String,
    pub location: String,
    pub description: String,
    pub uid: Option<String>,
    pub created: Option<DateTime<FixedOffset>>,
    pub modified: Option<DateTime<FixedOffset>>,
    /// Category codes in assignment order, without duplicates.
    pub tags: Vec<&'static str>,
}

/// Fields accumulated between `BEGIN:VEVENT` and `END:VEVENT`.
#[derive(Default)]
struct Draft {
    summary: Vec<String>,
    location: Vec<String>,
    description: Vec<String>,
    uid: Option<String>,
    start: Option<DateTime<FixedOffset>>,
    end: Option<DateTime<FixedOffset>>,
    created: Option<DateTime<FixedOffset>>,
    modified: Option<DateTime<FixedOffset>>,
}

impl Draft {
    /// Freeze the draft into a record. An event without a start carries no
    /// scheduling information and is dropped here.
    fn finish(self) -> Option<EventRecord> {
        let start = self.start?;
        let duration = match self.end {
            Some(end) => (end - start).max(Duration::zero()),
            None => Duration::zero(),
        };
        let summary = self.summary.join("\n");
        let location = self.location.join("\n");
        let description = self.description.join("\n");
        let tags = classify::classify(&summary, &location, &description);
        Some(EventRecord {
            start,
            end: self.end,
            duration,
            summary,
            location,
            description,
            uid: self.uid,
            created: self.created,
            modified: self.modified,
            tags,
        })
    }
}

/// Parse the whole feed text into event records, in feed order.
///
/// Only `VEVENT` blocks are assembled; blocks do not nest. Properties
/// outside a `VEVENT` block and property names this tool does not use are
/// skipped. A malformed content line aborts the parse.
pub fn parse_events(data: &str, tz: Tz) -> Result<Vec<EventRecord>> {
    let mut events = Vec::new();
    let mut draft: Option<Draft> = None;
    for line in unfold::logical_lines(data) {
        let prop = property::decode(&line)?;
        match prop.name.as_str() {
            "BEGIN" if prop.value == "VEVENT" => draft = Some(Draft::default()),
            "END" if prop.value == "VEVENT" => {
                if let Some(event) = draft.take().and_then(Draft::finish) {
                    events.push(event);
                }
            }
            _ => {
                let Some(draft) = draft.as_mut() else {
                    continue;
                };
                match prop.name.as_str() {
                    "SUMMARY" => draft.summary.push(property::unescape(&prop.value)),
                    "LOCATION" => draft.location.push(property::unescape(&prop.value)),
                    "DESCRIPTION" => draft.description.push(property::unescape(&prop.value)),
                    "UID" => draft.uid = Some(prop.value),
                    "DTSTART" => draft.start = Some(parse_instant(&prop, tz, false)?),
                    "DTEND" => draft.end = Some(parse_instant(&prop, tz, true)?),
                    "CREATED" => draft.created = Some(datetime::parse_datetime(&prop.value, tz)?),
                    "LAST-MODIFIED" => {
                        draft.modified = Some(datetime::parse_datetime(&prop.value, tz)?)
                    }
                    _ => {}
                }
            }
        }
    }
    Ok(events)
}

/// Route a `DTSTART`/`DTEND` value through the date or timestamp parser,
/// depending on its `VALUE=DATE` parameter.
fn parse_instant(prop: &Property, tz: Tz, is_end: bool) -> Result<DateTime<FixedOffset>> {
    if prop.is_date_only() {
        if is_end {
            datetime::parse_end_date(&prop.value, tz)
        } else {
            datetime::parse_date(&prop.value, tz)
        }
    } else {
        datetime::parse_datetime(&prop.value, tz)
    }
}
