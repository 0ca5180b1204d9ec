// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event source normalization.
//!
//! Merges a subject's appointments, activities, time-off and working hours
//! for a single date into one ordered timeline of busy slots.
//!
//! ## Invariants
//!
//! - Busy slots are ordered by start; ties keep source order, appointments
//!   before activities
//! - Only events starting on the requested date are included
//! - Time-off suppresses working hours for the whole date
//! - Malformed records are skipped and logged, never surfaced as errors

use crate::source::SubjectRecords;
use carecal_domain::{
    Activity, Appointment, AppointmentStatus, BusySlot, BusySlotKind, DomainError, Interval,
    MINUTES_PER_DAY, ScheduleContext, SubjectRef, Timed, WorkingHoursWindow, merge_intervals,
    minute_of_day, parse_timestamp,
};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use tracing::{debug, warn};

/// Length of the box drawn for an appointment with no end time.
pub const PLACEHOLDER_MINUTES: u16 = 60;

/// A subject's normalized calendar for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline {
    /// The subject this timeline belongs to.
    pub subject: SubjectRef,
    /// The date this timeline covers.
    pub date: NaiveDate,
    /// Busy slots ordered by start.
    pub busy_slots: Vec<BusySlot>,
    /// Active working-hours windows for the date, merged and sorted.
    /// Empty when the subject does not work that day or is on time-off.
    pub working_hours: Vec<Interval>,
    /// Whether a time-off record covers the date.
    pub is_time_off: bool,
}

impl Timeline {
    /// Busy slots that take part in availability and conflict math.
    ///
    /// Placeholder slots (appointments with no end) are excluded.
    pub fn blocking_slots(&self) -> impl Iterator<Item = &BusySlot> {
        self.busy_slots.iter().filter(|slot| !slot.is_placeholder)
    }
}

/// Why a record was left out of a timeline.
#[derive(Debug)]
enum SkipReason {
    Unparseable(DomainError),
    EndNotAfterStart,
    CrossesMidnight,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unparseable(err) => write!(f, "{err}"),
            Self::EndNotAfterStart => write!(f, "end is not after start"),
            Self::CrossesMidnight => write!(f, "event crosses midnight"),
        }
    }
}

impl From<DomainError> for SkipReason {
    fn from(err: DomainError) -> Self {
        Self::Unparseable(err)
    }
}

/// Start/end minutes of an event on the requested date.
struct Bounds {
    start: u16,
    end: u16,
    is_placeholder: bool,
}

/// Builds the timeline for one subject on one date.
///
/// # Arguments
///
/// * `subject` - The team member or client
/// * `date` - The date to normalize
/// * `records` - The subject's raw records
/// * `ctx` - Timezone context used to read timestamps
///
/// # Returns
///
/// A `Timeline` with ordered busy slots, the resolved working hours and
/// the time-off flag. This function never fails: unreadable records are
/// skipped.
#[must_use]
pub fn compute_timeline(
    subject: SubjectRef,
    date: NaiveDate,
    records: &SubjectRecords,
    ctx: &ScheduleContext,
) -> Timeline {
    let is_time_off: bool = records.time_off.iter().any(|t| t.covers(date));
    let working_hours: Vec<Interval> = if is_time_off {
        Vec::new()
    } else {
        resolve_working_hours(&records.working_hours, date)
    };

    let appointment_kind: BusySlotKind = match subject {
        SubjectRef::Team(_) => BusySlotKind::TeamAppointment,
        SubjectRef::Client(_) => BusySlotKind::ClientAppointment,
    };

    let mut busy_slots: Vec<BusySlot> = Vec::new();

    for appointment in records
        .appointments
        .iter()
        .filter(|a| a.status.occupies_time())
    {
        match appointment_slot(appointment, appointment_kind, date, ctx) {
            Ok(Some(slot)) => busy_slots.push(slot),
            Ok(None) => {}
            Err(reason) => warn!(
                subject = %subject,
                appointment_id = appointment.id,
                reason = %reason,
                "Skipping malformed appointment"
            ),
        }
    }

    for activity in &records.activities {
        match activity_slot(activity, date, ctx) {
            Ok(Some(slot)) => busy_slots.push(slot),
            Ok(None) => {}
            Err(reason) => warn!(
                subject = %subject,
                activity_id = activity.id,
                reason = %reason,
                "Skipping malformed activity"
            ),
        }
    }

    // Stable: equal starts keep appointments ahead of activities
    busy_slots.sort_by_key(|slot| slot.interval.start());

    debug!(
        subject = %subject,
        date = %date,
        busy = busy_slots.len(),
        windows = working_hours.len(),
        is_time_off,
        "Computed timeline"
    );

    Timeline {
        subject,
        date,
        busy_slots,
        working_hours,
        is_time_off,
    }
}

/// Resolves the active working-hours windows for a date.
///
/// Windows keyed on the exact date override weekday windows, even when
/// every override is inactive (a deliberate day off). Overlapping windows
/// are merged.
#[must_use]
pub fn resolve_working_hours(windows: &[WorkingHoursWindow], date: NaiveDate) -> Vec<Interval> {
    let has_override: bool = windows.iter().any(|w| w.is_date_override_for(date));

    merge_intervals(
        windows
            .iter()
            .filter(|w| {
                if has_override {
                    w.is_date_override_for(date)
                } else {
                    w.is_weekday_window_for(date)
                }
            })
            .filter(|w| w.is_active)
            .filter_map(WorkingHoursWindow::interval),
    )
}

fn appointment_slot(
    appointment: &Appointment,
    kind: BusySlotKind,
    date: NaiveDate,
    ctx: &ScheduleContext,
) -> Result<Option<BusySlot>, SkipReason> {
    let Some(bounds) = event_bounds(appointment, date, ctx)? else {
        return Ok(None);
    };

    let end: u16 = if appointment.status == AppointmentStatus::Completed && !bounds.is_placeholder
    {
        early_completion(appointment, date, ctx)
            .filter(|finished| bounds.start < *finished && *finished < bounds.end)
            .unwrap_or(bounds.end)
    } else {
        bounds.end
    };

    let interval: Interval = Interval::new(bounds.start, end)?;
    Ok(Some(BusySlot {
        interval,
        kind,
        title: appointment.display_title(),
        event_id: appointment.id,
        scheduled_end: bounds.end,
        is_placeholder: bounds.is_placeholder,
    }))
}

fn activity_slot(
    activity: &Activity,
    date: NaiveDate,
    ctx: &ScheduleContext,
) -> Result<Option<BusySlot>, SkipReason> {
    let Some(bounds) = event_bounds(activity, date, ctx)? else {
        return Ok(None);
    };

    Ok(Some(BusySlot {
        interval: Interval::new(bounds.start, bounds.end)?,
        kind: BusySlotKind::Activity,
        title: activity.display_title(),
        event_id: activity.id,
        scheduled_end: bounds.end,
        is_placeholder: false,
    }))
}

/// Reads an event's bounds on `date`.
///
/// Returns `Ok(None)` for events that start on another date.
fn event_bounds<T: Timed>(
    event: &T,
    date: NaiveDate,
    ctx: &ScheduleContext,
) -> Result<Option<Bounds>, SkipReason> {
    let start: NaiveDateTime = parse_timestamp(event.start_time(), ctx)?;
    if start.date() != date {
        return Ok(None);
    }
    let start_minute: u16 = minute_of_day(start.time());

    let Some(raw_end) = event.end_time() else {
        return Ok(Some(Bounds {
            start: start_minute,
            end: (start_minute + PLACEHOLDER_MINUTES).min(MINUTES_PER_DAY),
            is_placeholder: true,
        }));
    };

    let end: NaiveDateTime = parse_timestamp(raw_end, ctx)?;
    let end_minute: u16 = end_minute_on(date, end)?;
    if end_minute <= start_minute {
        return Err(SkipReason::EndNotAfterStart);
    }

    Ok(Some(Bounds {
        start: start_minute,
        end: end_minute,
        is_placeholder: false,
    }))
}

/// Minute of day at which `end` falls, allowing exactly the following
/// midnight as 1440.
fn end_minute_on(date: NaiveDate, end: NaiveDateTime) -> Result<u16, SkipReason> {
    let next_midnight: NaiveDateTime = (date + Duration::days(1)).and_time(NaiveTime::MIN);

    if end.date() == date {
        Ok(minute_of_day(end.time()))
    } else if end == next_midnight {
        Ok(MINUTES_PER_DAY)
    } else if end.date() < date {
        Err(SkipReason::EndNotAfterStart)
    } else {
        Err(SkipReason::CrossesMidnight)
    }
}

/// Minute at which a completed appointment actually finished, if recorded
/// and readable for `date`.
fn early_completion(
    appointment: &Appointment,
    date: NaiveDate,
    ctx: &ScheduleContext,
) -> Option<u16> {
    let raw: &str = appointment.completed_at.as_deref()?;
    let finished: NaiveDateTime = match parse_timestamp(raw, ctx) {
        Ok(ts) => ts,
        Err(err) => {
            debug!(
                appointment_id = appointment.id,
                error = %err,
                "Ignoring unreadable completion time"
            );
            return None;
        }
    };
    (finished.date() == date).then(|| minute_of_day(finished.time()))
}
