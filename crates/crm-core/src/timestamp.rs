//! The one timestamp text format used on the wire and in the store.
//!
//! RFC 3339 in UTC with nanosecond precision and a `Z` suffix, so a value
//! survives a format/parse round trip unchanged.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{Error, Result};

pub fn format(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse a timestamp. Never falls back to a default on bad input.
pub fn parse(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|source| Error::Timestamp { value: s.to_owned(), source })
}
