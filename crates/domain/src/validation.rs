// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::interval::{Interval, MINUTES_PER_DAY};

/// Validates a requested duration and narrows it to minutes of a day.
///
/// # Arguments
///
/// * `minutes` - The requested duration, as supplied by the caller
///
/// # Returns
///
/// * `Ok(u16)` if the duration is between 1 and 1440 minutes
/// * `Err(DomainError::InvalidDuration)` otherwise
///
/// # Errors
///
/// Returns an error if:
/// - The duration is zero or negative
/// - The duration is longer than a day
pub fn validate_duration(minutes: i64) -> Result<u16, DomainError> {
    // Rule: duration must be positive
    if minutes <= 0 {
        return Err(DomainError::InvalidDuration { minutes });
    }

    // Rule: a single interval cannot outlast the day
    u16::try_from(minutes)
        .ok()
        .filter(|m| *m <= MINUTES_PER_DAY)
        .ok_or(DomainError::InvalidDuration { minutes })
}

/// Builds the interval a proposal would occupy.
///
/// # Errors
///
/// Returns an error if:
/// - The duration is invalid
/// - The proposal would run past midnight
pub fn proposed_interval(start_minute: u16, duration_minutes: i64) -> Result<Interval, DomainError> {
    let duration: u16 = validate_duration(duration_minutes)?;
    let end: u32 = u32::from(start_minute) + u32::from(duration);
    let end_minute: u16 = u16::try_from(end).map_err(|_| DomainError::InvalidInterval {
        start: u32::from(start_minute),
        end,
    })?;
    Interval::new(start_minute, end_minute).map_err(|_| DomainError::InvalidInterval {
        start: u32::from(start_minute),
        end,
    })
}
