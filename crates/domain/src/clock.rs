// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduling context and timestamp parsing.
//!
//! The engine never reads the wall clock. Every entry point receives a
//! `ScheduleContext` carrying the agency timezone and, optionally, the
//! instant the caller considers "now".
//!
//! ## Accepted timestamp forms
//!
//! - RFC 3339 with offset (`2024-01-10T09:00:00-08:00`), converted into
//!   the context timezone
//! - Naive `YYYY-MM-DD HH:MM[:SS]` or `YYYY-MM-DDTHH:MM[:SS]`, taken as
//!   wall-clock time in the context timezone

use crate::error::DomainError;
use crate::interval::minute_of_day;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

const NAIVE_TIMESTAMP_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Explicit time context threaded through every engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleContext {
    timezone: Tz,
    now: Option<DateTime<Utc>>,
}

impl ScheduleContext {
    /// Creates a context for the given timezone with no notion of "now".
    #[must_use]
    pub const fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            now: None,
        }
    }

    /// Creates a context from an IANA timezone name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is unknown.
    pub fn from_timezone_name(name: &str) -> Result<Self, DomainError> {
        let timezone: Tz = name
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))?;
        Ok(Self::new(timezone))
    }

    /// Returns a copy of this context pinned to the given instant.
    #[must_use]
    pub const fn with_now(self, now: DateTime<Utc>) -> Self {
        Self {
            timezone: self.timezone,
            now: Some(now),
        }
    }

    /// The agency timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The pinned "now", as wall-clock time in the context timezone.
    #[must_use]
    pub fn local_now(&self) -> Option<NaiveDateTime> {
        self.now
            .map(|now| now.with_timezone(&self.timezone).naive_local())
    }

    /// The pinned "today" in the context timezone.
    #[must_use]
    pub fn today(&self) -> Option<NaiveDate> {
        self.local_now().map(|now| now.date())
    }
}

impl Default for ScheduleContext {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

/// Parses a timestamp into wall-clock time in the context timezone.
///
/// # Errors
///
/// Returns `DomainError::ParseError` if the value matches none of the
/// accepted forms.
pub fn parse_timestamp(value: &str, ctx: &ScheduleContext) -> Result<NaiveDateTime, DomainError> {
    let trimmed: &str = value.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.with_timezone(&ctx.timezone()).naive_local());
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| DomainError::ParseError {
            kind: "timestamp",
            value: value.to_string(),
            reason: String::from("expected RFC 3339 or YYYY-MM-DD HH:MM[:SS]"),
        })
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::ParseError` if the value is not a valid date.
pub fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| DomainError::ParseError {
        kind: "date",
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Parses a wall-clock time (`HH:MM` or `HH:MM:SS`).
///
/// # Errors
///
/// Returns `DomainError::ParseError` if the value is not a valid time.
pub fn parse_clock(value: &str) -> Result<NaiveTime, DomainError> {
    let trimmed: &str = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|e| DomainError::ParseError {
            kind: "clock time",
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Converts a clock string or a timestamp to a minute of day.
///
/// Clock strings are tried first; anything else is parsed as a timestamp
/// and its time portion (in the context timezone) is used.
///
/// # Errors
///
/// Returns `DomainError::ParseError` if the value is neither.
pub fn to_minutes(value: &str, ctx: &ScheduleContext) -> Result<u16, DomainError> {
    if let Ok(time) = parse_clock(value) {
        return Ok(minute_of_day(time));
    }
    parse_timestamp(value, ctx).map(|ts| minute_of_day(ts.time()))
}
