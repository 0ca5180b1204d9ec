// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;

/// Errors that can occur during scheduling validation.
///
/// All variants are local validation failures detected at the boundary of a
/// call. None of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A timestamp, date or clock string could not be parsed.
    #[error("Failed to parse {kind} '{value}': {reason}")]
    ParseError {
        /// What was being parsed (`timestamp`, `date`, `clock time`).
        kind: &'static str,
        /// The offending input.
        value: String,
        /// The parser's complaint.
        reason: String,
    },
    /// A requested duration was zero, negative, or longer than a day.
    #[error("Invalid duration: {minutes} minutes. Must be between 1 and 1440")]
    InvalidDuration {
        /// The rejected duration.
        minutes: i64,
    },
    /// A conflict check named neither a team member nor a client.
    #[error("A conflict check requires a team member, a client, or both")]
    MissingSubject,
    /// An interval was empty, reversed, or extended past midnight.
    #[error("Invalid interval {start}..{end}: start must precede end within a single day")]
    InvalidInterval {
        /// Start minute of day.
        start: u32,
        /// End minute of day.
        end: u32,
    },
    /// An IANA timezone name was not recognized.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
    /// A date range ended before it started.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// The range start.
        start: NaiveDate,
        /// The range end.
        end: NaiveDate,
    },
    /// Engine configuration was malformed or out of bounds.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the problem.
        reason: String,
    },
}
