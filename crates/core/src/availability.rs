// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability calculation.
//!
//! Free time is the complement of a subject's merged busy slots within
//! each of the day's working-hours windows. Each free gap long enough for
//! the requested duration yields exactly one slot, anchored at the start
//! of the gap.

use crate::error::CoreError;
use crate::source::{ScheduleSource, SubjectRecords};
use crate::timeline::{Timeline, compute_timeline};
use carecal_domain::{
    AvailableSlot, BusySlot, Interval, ScheduleContext, SubjectRef, complement_within,
    merge_intervals, minute_of_day, validate_duration,
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Result of an availability calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityResult {
    /// One slot per free gap that fits the requested duration.
    pub available_slots: Vec<AvailableSlot>,
    /// Every busy slot for the date, including placeholders.
    pub busy_slots: Vec<BusySlot>,
    /// Working-hours windows used. Empty when the subject is unavailable.
    pub working_hours: Vec<Interval>,
    /// Whether time-off covers the date.
    pub time_off: bool,
}

/// Computes availability for a subject on a date.
///
/// # Arguments
///
/// * `source` - Where the subject's records come from
/// * `subject` - The team member or client
/// * `date` - The date to compute
/// * `duration_minutes` - Requested appointment length
/// * `ctx` - Timezone and optional "now"
///
/// # Errors
///
/// Returns `DomainError::InvalidDuration` if the duration is not positive.
pub fn compute_availability<S: ScheduleSource + ?Sized>(
    source: &S,
    subject: SubjectRef,
    date: NaiveDate,
    duration_minutes: i64,
    ctx: &ScheduleContext,
) -> Result<AvailabilityResult, CoreError> {
    let records: SubjectRecords = source.subject_records(subject, date);
    let timeline: Timeline = compute_timeline(subject, date, &records, ctx);
    availability_from_timeline(timeline, duration_minutes, ctx)
}

/// Computes availability from an already-normalized timeline.
///
/// A subject with no working hours for the date (and no time-off) is
/// treated as fully unavailable, not as an error.
///
/// # Errors
///
/// Returns `DomainError::InvalidDuration` if the duration is not positive.
pub fn availability_from_timeline(
    timeline: Timeline,
    duration_minutes: i64,
    ctx: &ScheduleContext,
) -> Result<AvailabilityResult, CoreError> {
    let duration: u16 = validate_duration(duration_minutes)?;

    if timeline.is_time_off || timeline.working_hours.is_empty() {
        debug!(
            subject = %timeline.subject,
            date = %timeline.date,
            is_time_off = timeline.is_time_off,
            "Subject unavailable for the whole date"
        );
        return Ok(AvailabilityResult {
            available_slots: Vec::new(),
            busy_slots: timeline.busy_slots,
            working_hours: Vec::new(),
            time_off: timeline.is_time_off,
        });
    }

    let busy: Vec<Interval> = merge_intervals(timeline.blocking_slots().map(|slot| slot.interval));
    let released: Vec<u16> = timeline
        .blocking_slots()
        .filter(|slot| slot.completed_early())
        .map(|slot| slot.interval.end())
        .collect();

    let mut available_slots: Vec<AvailableSlot> = Vec::new();
    for window in bookable_windows(&timeline.working_hours, timeline.date, ctx) {
        available_slots.extend(complement_within(&window, &busy).iter().filter_map(|gap| {
            AvailableSlot::anchored_in(gap, duration, released.contains(&gap.start()))
        }));
    }

    debug!(
        subject = %timeline.subject,
        date = %timeline.date,
        duration,
        available = available_slots.len(),
        busy = timeline.busy_slots.len(),
        "Computed availability"
    );

    Ok(AvailabilityResult {
        available_slots,
        busy_slots: timeline.busy_slots,
        working_hours: timeline.working_hours,
        time_off: false,
    })
}

/// Working windows trimmed so nothing is offered in the past.
///
/// Without a pinned "now" the windows are returned unchanged.
fn bookable_windows(
    windows: &[Interval],
    date: NaiveDate,
    ctx: &ScheduleContext,
) -> Vec<Interval> {
    let Some(now) = ctx.local_now() else {
        return windows.to_vec();
    };

    if date < now.date() {
        return Vec::new();
    }
    if date > now.date() {
        return windows.to_vec();
    }

    let current_minute: u16 = minute_of_day(now.time());
    windows
        .iter()
        .filter_map(|w| Interval::new(w.start().max(current_minute), w.end()).ok())
        .collect()
}
