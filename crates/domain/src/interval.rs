// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Minute-of-day interval arithmetic.
//!
//! Every availability, conflict and placement computation reduces to
//! half-open `[start, end)` intervals on a single date.
//!
//! ## Invariants
//!
//! - `start < end`
//! - `end <= 1440` (an end of 1440 is midnight at the close of the day)
//! - Intervals never cross midnight

use crate::error::DomainError;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A half-open `[start, end)` span of minutes within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Interval {
    start: u16,
    end: u16,
}

impl Interval {
    /// Creates a new `Interval`.
    ///
    /// # Arguments
    ///
    /// * `start` - Start minute of day (inclusive)
    /// * `end` - End minute of day (exclusive)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInterval` if `start >= end` or
    /// `end > 1440`.
    pub fn new(start: u16, end: u16) -> Result<Self, DomainError> {
        if start >= end || end > MINUTES_PER_DAY {
            return Err(DomainError::InvalidInterval {
                start: u32::from(start),
                end: u32::from(end),
            });
        }
        Ok(Self { start, end })
    }

    /// Start minute of day (inclusive).
    #[must_use]
    pub const fn start(&self) -> u16 {
        self.start
    }

    /// End minute of day (exclusive).
    #[must_use]
    pub const fn end(&self) -> u16 {
        self.end
    }

    /// Length of the interval in minutes.
    #[must_use]
    pub const fn duration(&self) -> u16 {
        self.end - self.start
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            format_minutes(self.start),
            format_minutes(self.end)
        )
    }
}

/// Returns whether two intervals share at least one minute.
///
/// Touching endpoints (`a.end == b.start`) do not overlap.
#[must_use]
pub const fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.start < b.end && b.start < a.end
}

/// Intersects an interval with the window `[window_start, window_end)`.
///
/// Returns `None` when the two are disjoint.
#[must_use]
pub fn clamp(interval: &Interval, window_start: u16, window_end: u16) -> Option<Interval> {
    let start: u16 = interval.start.max(window_start);
    let end: u16 = interval.end.min(window_end);
    Interval::new(start, end).ok()
}

/// Merges overlapping and adjacent intervals into a minimal disjoint set.
///
/// The result is sorted by start.
#[must_use]
pub fn merge_intervals<I>(intervals: I) -> Vec<Interval>
where
    I: IntoIterator<Item = Interval>,
{
    let mut sorted: Vec<Interval> = intervals.into_iter().collect();
    sorted.sort_unstable();

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                last.end = last.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Computes the free gaps of `window` not covered by `busy`.
///
/// `busy` does not need to be merged or sorted; portions outside the
/// window are ignored.
#[must_use]
pub fn complement_within(window: &Interval, busy: &[Interval]) -> Vec<Interval> {
    let covered: Vec<Interval> = merge_intervals(
        busy.iter()
            .filter_map(|b| clamp(b, window.start, window.end)),
    );

    let mut free: Vec<Interval> = Vec::new();
    let mut cursor: u16 = window.start;
    for b in &covered {
        if b.start > cursor {
            free.push(Interval {
                start: cursor,
                end: b.start,
            });
        }
        cursor = cursor.max(b.end);
    }
    if cursor < window.end {
        free.push(Interval {
            start: cursor,
            end: window.end,
        });
    }
    free
}

/// Minute of day for a wall-clock time. Seconds are truncated.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn minute_of_day(time: NaiveTime) -> u16 {
    // hour <= 23 and minute <= 59, so the value always fits
    (time.hour() * 60 + time.minute()) as u16
}

/// Splits a multi-day span into one interval per calendar date.
///
/// Zero-length pieces (a span ending exactly at midnight) are dropped.
/// Returns an empty vector if `end <= start`.
#[must_use]
pub fn split_at_midnight(start: NaiveDateTime, end: NaiveDateTime) -> Vec<(NaiveDate, Interval)> {
    let mut pieces: Vec<(NaiveDate, Interval)> = Vec::new();
    let mut cursor: NaiveDateTime = start;

    while cursor < end {
        let date: NaiveDate = cursor.date();
        let next_midnight: NaiveDateTime = (date + Duration::days(1)).and_time(NaiveTime::MIN);
        let piece_end: NaiveDateTime = end.min(next_midnight);

        let start_minute: u16 = minute_of_day(cursor.time());
        let end_minute: u16 = if piece_end == next_midnight {
            MINUTES_PER_DAY
        } else {
            minute_of_day(piece_end.time())
        };
        if let Ok(interval) = Interval::new(start_minute, end_minute) {
            pieces.push((date, interval));
        }
        cursor = piece_end;
    }
    pieces
}

/// Formats a minute of day as `HH:MM`. 1440 renders as `24:00`.
#[must_use]
pub fn format_minutes(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
