//! Parsing of feed timestamp and date values into offset-aware instants.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

static FORMAT: &str = "%Y%m%dT%H%M%S";
static FORMAT_UTC: &str = "%Y%m%dT%H%M%SZ";
static FORMAT_DATE: &str = "%Y%m%d";

/// Format for instants in the report output, `YYYYMMDDTHHMMSS±HHMM`.
pub static OUT_FORMAT: &str = "%Y%m%dT%H%M%S%z";

/// Parse a `YYYYMMDDTHHMMSS` timestamp value.
///
/// A trailing `Z` marks the value as UTC; anything else is wall-clock time
/// in `tz`. The result always carries an explicit offset.
pub fn parse_datetime(value: &str, tz: Tz) -> Result<DateTime<FixedOffset>> {
    if value.ends_with('Z') {
        let naive = chrono::NaiveDateTime::parse_from_str(value, FORMAT_UTC)
            .with_context(|| format!("invalid UTC timestamp {value:?}"))?;
        return Ok(naive.and_utc().fixed_offset());
    }
    let naive = chrono::NaiveDateTime::parse_from_str(value, FORMAT)
        .with_context(|| format!("invalid timestamp {value:?}"))?;
    let instant = tz
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("timestamp {value:?} does not exist in {tz}"))?;
    Ok(instant.fixed_offset())
}

/// Parse a `YYYYMMDD` bare date to local midnight in `tz`.
pub fn parse_date(value: &str, tz: Tz) -> Result<DateTime<FixedOffset>> {
    local_date_at(value, tz, 0, 0, 0)
}

/// Parse a `YYYYMMDD` bare date used as an event end.
///
/// All-day events end at 23:59:59 local time on that day.
pub fn parse_end_date(value: &str, tz: Tz) -> Result<DateTime<FixedOffset>> {
    local_date_at(value, tz, 23, 59, 59)
}

fn local_date_at(value: &str, tz: Tz, hour: u32, min: u32, sec: u32) -> Result<DateTime<FixedOffset>> {
    let date = NaiveDate::parse_from_str(value, FORMAT_DATE)
        .with_context(|| format!("invalid date {value:?}"))?;
    let naive = date
        .and_hms_opt(hour, min, sec)
        .with_context(|| format!("invalid time of day {hour:02}:{min:02}:{sec:02}"))?;
    let instant = tz
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("date {value:?} does not exist in {tz}"))?;
    Ok(instant.fixed_offset())
}

/// Compute the report cutoff: now in `tz`, minus `days` days.
pub fn cutoff(days: i64, tz: Tz) -> DateTime<FixedOffset> {
    (Utc::now().with_timezone(&tz) - Duration::days(days)).fixed_offset()
}

#[cfg(test)]
mod tests {
    use chrono_tz::Europe::Warsaw;

    use crate::datetime::{cutoff, parse_date, parse_datetime, parse_end_date, OUT_FORMAT};

    #[test]
    fn test_parse_local_timestamp() {
        let instant = parse_datetime("20240115T093000", Warsaw).unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-01-15T09:30:00+01:00");
    }

    #[test]
    fn test_parse_local_timestamp_in_summer() {
        let instant = parse_datetime("20240715T093000", Warsaw).unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-07-15T09:30:00+02:00");
    }

    #[test]
    fn test_parse_utc_timestamp() {
        let instant = parse_datetime("20240115T093000Z", Warsaw).unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-01-15T09:30:00+00:00");
    }

    #[test]
    fn test_utc_and_local_encodings_of_one_instant_compare_equal() {
        let utc = parse_datetime("20240115T093000Z", Warsaw).unwrap();
        let local = parse_datetime("20240115T103000", Warsaw).unwrap();
        assert_eq!(utc, local);
    }

    #[test]
    fn test_parse_date_is_local_midnight() {
        let instant = parse_date("20240115", Warsaw).unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-01-15T00:00:00+01:00");
    }

    #[test]
    fn test_parse_end_date_is_end_of_day() {
        let instant = parse_end_date("20240115", Warsaw).unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-01-15T23:59:59+01:00");
    }

    #[test]
    fn test_out_format() {
        let instant = parse_datetime("20240115T093000", Warsaw).unwrap();
        assert_eq!(instant.format(OUT_FORMAT).to_string(), "20240115T093000+0100");
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(parse_datetime("2024-01-15T09:30:00", Warsaw).is_err());
        assert!(parse_datetime("20240115", Warsaw).is_err());
        assert!(parse_date("15012024", Warsaw).is_err());
    }

    #[test]
    fn test_cutoff_moves_backwards() {
        let now = cutoff(0, Warsaw);
        let week_ago = cutoff(7, Warsaw);
        assert!(week_ago < now);
    }
}
