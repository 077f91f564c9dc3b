//! Serialization of retained events into the tab-separated report file.

use std::{fs::create_dir_all, path::Path};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use csv::{Terminator, WriterBuilder};

use crate::{datetime::OUT_FORMAT, event::EventRecord};

/// Write one row per event to `path`, creating the containing directory if
/// it does not exist. Returns the number of rows written.
///
/// Columns: start, duration in whole seconds, summary, location,
/// description, uid, created, modified, concatenated category codes.
/// Instants use `YYYYMMDDTHHMMSS±HHMM` and absent values serialize as empty
/// fields. Fields are quoted only when necessary, with backslash escaping,
/// and rows end with a bare newline.
pub fn write_tsv(path: &Path, events: impl IntoIterator<Item = EventRecord>) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .double_quote(false)
        .escape(b'\\')
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut rows = 0;
    for event in events {
        writer.write_record(row(&event))?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

fn format_instant(instant: Option<DateTime<FixedOffset>>) -> String {
    instant
        .map(|instant| instant.format(OUT_FORMAT).to_string())
        .unwrap_or_default()
}

fn row(event: &EventRecord) -> [String; 9] {
    [
        event.start.format(OUT_FORMAT).to_string(),
        event.duration.num_seconds().to_string(),
        event.summary.clone(),
        event.location.clone(),
        event.description.clone(),
        event.uid.clone().unwrap_or_default(),
        format_instant(event.created),
        format_instant(event.modified),
        event.tags.concat(),
    ]
}
