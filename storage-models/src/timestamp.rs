//! The fixed `last_modified` timestamp format.
//!
//! Timestamps follow the reference layout [`TIME_FORMAT`]: `YYYY-MM-DDTHH:MM:SS`,
//! optional fractional seconds, then an uppercase `Z` or a `±HH:MM` offset.
//! The separator must be an uppercase `T` and leap seconds are rejected.
//! Parsed values are normalized to UTC.

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use thiserror::Error;

/// Reference layout of `last_modified`.
pub const TIME_FORMAT: &str = "2006-01-02T15:04:05Z07:00";

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("parsing time {value:?} as {:?}: does not match layout", TIME_FORMAT)]
    Layout { value: String },

    #[error("parsing time {value:?}: second out of range")]
    LeapSecond { value: String },

    #[error("parsing time {value:?}: time zone offset out of range")]
    Offset { value: String },

    #[error("parsing time {value:?}: {source}")]
    Chrono {
        value: String,
        source: chrono::ParseError,
    },
}

pub fn parse(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let layout_err = || TimestampError::Layout {
        value: value.to_string(),
    };

    let (datetime, offset) = split_offset(value).ok_or_else(layout_err)?;
    if !matches_datetime_layout(datetime.as_bytes()) {
        return Err(layout_err());
    }
    if &datetime[17..19] == "60" {
        return Err(TimestampError::LeapSecond {
            value: value.to_string(),
        });
    }

    let naive = NaiveDateTime::parse_from_str(datetime, DATETIME_FORMAT).map_err(|source| {
        TimestampError::Chrono {
            value: value.to_string(),
            source,
        }
    })?;

    let offset = match offset {
        None => return Ok(Utc.from_utc_datetime(&naive)),
        Some(offset) => offset,
    };
    let offset_err = || TimestampError::Offset {
        value: value.to_string(),
    };
    let (hours, minutes) = (two_digits(&offset[1..3]), two_digits(&offset[4..6]));
    if hours >= 24 || minutes >= 60 {
        return Err(offset_err());
    }
    let seconds = hours * 3600 + minutes * 60;
    let seconds = if offset[0] == b'-' { -seconds } else { seconds };

    FixedOffset::east_opt(seconds)
        .and_then(|tz| tz.from_local_datetime(&naive).single())
        .map(|ts| ts.with_timezone(&Utc))
        .ok_or_else(offset_err)
}

/// Renders `ts` so that [`parse`] returns the same instant.
pub fn format(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Splits off the zone: an uppercase `Z`, or `±HH:MM` returned as bytes.
fn split_offset(value: &str) -> Option<(&str, Option<&[u8]>)> {
    if let Some(datetime) = value.strip_suffix('Z') {
        return Some((datetime, None));
    }
    let split = value.len().checked_sub(6)?;
    if !value.is_char_boundary(split) {
        return None;
    }
    let (datetime, offset) = value.split_at(split);
    let offset = offset.as_bytes();
    let shaped = matches!(offset[0], b'+' | b'-')
        && offset[1..3].iter().all(u8::is_ascii_digit)
        && offset[3] == b':'
        && offset[4..6].iter().all(u8::is_ascii_digit);
    shaped.then_some((datetime, Some(offset)))
}

/// `YYYY-MM-DDTHH:MM:SS` followed by nothing or `.` and at least one digit.
fn matches_datetime_layout(bytes: &[u8]) -> bool {
    if bytes.len() < 19 {
        return false;
    }
    let (head, fraction) = bytes.split_at(19);
    let head_ok = head.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b'T',
        13 | 16 => *b == b':',
        _ => b.is_ascii_digit(),
    });
    let fraction_ok = match fraction.split_first() {
        None => true,
        Some((b'.', digits)) => !digits.is_empty() && digits.iter().all(u8::is_ascii_digit),
        Some(_) => false,
    };
    head_ok && fraction_ok
}

fn two_digits(bytes: &[u8]) -> i32 {
    i32::from(bytes[0] - b'0') * 10 + i32::from(bytes[1] - b'0')
}
