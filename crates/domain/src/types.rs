// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::interval::{Interval, format_minutes};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A team member or a client whose calendar is being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SubjectRef {
    /// A staff member identified by team id.
    Team(i64),
    /// A client identified by client id.
    Client(i64),
}

impl SubjectRef {
    /// The subject's numeric identifier.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Team(id) | Self::Client(id) => *id,
        }
    }
}

impl std::fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Team(id) => write!(f, "team member {id}"),
            Self::Client(id) => write!(f, "client {id}"),
        }
    }
}

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Requested, not yet confirmed.
    #[default]
    Pending,
    /// Confirmed by the client.
    Confirmed,
    /// On the calendar with staff assigned.
    Scheduled,
    /// On the calendar without staff.
    Unassigned,
    /// Currently happening.
    InProgress,
    /// Finished.
    Completed,
    /// Cancelled before it happened.
    Cancelled,
    /// The client did not show up.
    NoShow,
    /// Staff is running late.
    Late,
    /// Declined by staff.
    Rejected,
    /// Ended early by the client.
    TerminatedByClient,
    /// Ended early by staff.
    TerminatedByStaff,
    /// Soft-deleted.
    Deleted,
}

impl AppointmentStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Scheduled => "scheduled",
            Self::Unassigned => "unassigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
            Self::Late => "late",
            Self::Rejected => "rejected",
            Self::TerminatedByClient => "terminated_by_client",
            Self::TerminatedByStaff => "terminated_by_staff",
            Self::Deleted => "deleted",
        }
    }

    /// Returns whether an appointment in this status blocks its time.
    ///
    /// Cancelled, rejected, terminated and deleted appointments free their
    /// slot.
    #[must_use]
    pub const fn occupies_time(&self) -> bool {
        !matches!(
            self,
            Self::Cancelled
                | Self::Rejected
                | Self::TerminatedByClient
                | Self::TerminatedByStaff
                | Self::Deleted
        )
    }

    /// Returns whether an appointment in this status may still be paired
    /// with a transportation occurrence.
    #[must_use]
    pub const fn awaits_transport(&self) -> bool {
        matches!(
            self,
            Self::Scheduled | Self::Unassigned | Self::InProgress | Self::Late
        )
    }
}

impl FromStr for AppointmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "scheduled" => Ok(Self::Scheduled),
            "unassigned" => Ok(Self::Unassigned),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" => Ok(Self::NoShow),
            "late" => Ok(Self::Late),
            "rejected" => Ok(Self::Rejected),
            "terminated_by_client" => Ok(Self::TerminatedByClient),
            "terminated_by_staff" => Ok(Self::TerminatedByStaff),
            "deleted" => Ok(Self::Deleted),
            _ => Err(DomainError::ParseError {
                kind: "appointment status",
                value: s.to_string(),
                reason: String::from("unknown status"),
            }),
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Common view over anything that sits on a calendar.
pub trait Timed {
    /// Source record id.
    fn id(&self) -> i64;
    /// Raw start timestamp.
    fn start_time(&self) -> &str;
    /// Raw end timestamp, if known.
    fn end_time(&self) -> Option<&str>;
    /// Title shown on the calendar and in conflict messages.
    fn display_title(&self) -> String;
}

/// A client appointment with a team member.
///
/// Timestamps are kept as the raw strings received from the caller; the
/// normalizer parses them and skips records it cannot read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Appointment id.
    pub id: i64,
    /// The client being served.
    pub client_id: i64,
    /// The assigned team member.
    pub team_id: i64,
    /// Optional service speciality.
    #[serde(default)]
    pub speciality_id: Option<i64>,
    /// Scheduled start.
    pub start_time: String,
    /// Scheduled end. `None` renders as a one-hour placeholder.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Lifecycle status.
    pub status: AppointmentStatus,
    /// The transportation occurrence already paired with this appointment.
    #[serde(default)]
    pub nemt_occurrence_id: Option<i64>,
    /// When a completed appointment actually finished.
    #[serde(default)]
    pub completed_at: Option<String>,
    /// Optional display title.
    #[serde(default)]
    pub title: Option<String>,
}

impl Timed for Appointment {
    fn id(&self) -> i64 {
        self.id
    }

    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> Option<&str> {
        self.end_time.as_deref()
    }

    fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Appointment #{}", self.id))
    }
}

/// Non-client staff time (training, admin, travel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Activity id.
    pub id: i64,
    /// The team member doing the activity.
    pub team_id: i64,
    /// Free-text activity type.
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Display title.
    pub title: String,
    /// Start timestamp.
    pub start_time: String,
    /// End timestamp.
    pub end_time: String,
}

impl Timed for Activity {
    fn id(&self) -> i64 {
        self.id
    }

    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> Option<&str> {
        Some(&self.end_time)
    }

    fn display_title(&self) -> String {
        if self.title.is_empty() {
            self.activity_type.clone()
        } else {
            self.title.clone()
        }
    }
}

/// Either kind of calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ScheduledEvent {
    /// A client appointment.
    Appointment(Appointment),
    /// A staff activity.
    Activity(Activity),
}

impl Timed for ScheduledEvent {
    fn id(&self) -> i64 {
        match self {
            Self::Appointment(a) => a.id(),
            Self::Activity(a) => a.id(),
        }
    }

    fn start_time(&self) -> &str {
        match self {
            Self::Appointment(a) => a.start_time(),
            Self::Activity(a) => a.start_time(),
        }
    }

    fn end_time(&self) -> Option<&str> {
        match self {
            Self::Appointment(a) => a.end_time(),
            Self::Activity(a) => a.end_time(),
        }
    }

    fn display_title(&self) -> String {
        match self {
            Self::Appointment(a) => a.display_title(),
            Self::Activity(a) => a.display_title(),
        }
    }
}

/// What a working-hours window is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingHoursKey {
    /// A one-off window for a specific date. Overrides weekday windows.
    Date(NaiveDate),
    /// A recurring window for a weekday.
    Weekday(Weekday),
}

/// A configured working-hours window for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursWindow {
    /// Date or weekday this window applies to.
    pub key: WorkingHoursKey,
    /// Start minute of day.
    pub start_time: u16,
    /// End minute of day.
    pub end_time: u16,
    /// Inactive windows are ignored.
    pub is_active: bool,
}

impl WorkingHoursWindow {
    /// Creates a new active window.
    #[must_use]
    pub const fn new(key: WorkingHoursKey, start_time: u16, end_time: u16) -> Self {
        Self {
            key,
            start_time,
            end_time,
            is_active: true,
        }
    }

    /// Returns whether this window is keyed on exactly `date`.
    #[must_use]
    pub fn is_date_override_for(&self, date: NaiveDate) -> bool {
        self.key == WorkingHoursKey::Date(date)
    }

    /// Returns whether this window is keyed on the weekday of `date`.
    #[must_use]
    pub fn is_weekday_window_for(&self, date: NaiveDate) -> bool {
        self.key == WorkingHoursKey::Weekday(date.weekday())
    }

    /// The window as an interval, or `None` if its bounds are invalid.
    #[must_use]
    pub fn interval(&self) -> Option<Interval> {
        Interval::new(self.start_time, self.end_time).ok()
    }
}

/// A period during which a subject is fully unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOff {
    /// Time-off record id.
    pub id: i64,
    /// Free-text reason (vacation, sick, ...).
    #[serde(rename = "type")]
    pub time_off_type: String,
    /// First day off.
    pub start_date: NaiveDate,
    /// Last day off (inclusive). `None` means a single day.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl TimeOff {
    /// Returns whether this record covers `date`.
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        let last: NaiveDate = self.end_date.unwrap_or(self.start_date);
        self.start_date <= date && date <= last
    }
}

/// A scheduled transportation pickup for a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NemtOccurrence {
    /// Occurrence id.
    pub id: i64,
    /// The client being transported.
    pub client_id: i64,
    /// Date of the pickup.
    pub transportation_date: NaiveDate,
    /// Start of the pickup window (`HH:MM`).
    pub pickup_window_start: String,
    /// End of the pickup window (`HH:MM`), if known.
    #[serde(default)]
    pub pickup_window_end: Option<String>,
}

/// A half-open `[start, end)` range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a new `DateRange`.
    ///
    /// An empty range (`start == end`) is valid and contains nothing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First date in the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// First date after the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// Where a busy slot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusySlotKind {
    /// An appointment where the subject is the team member.
    TeamAppointment,
    /// An appointment where the subject is the client.
    ClientAppointment,
    /// A staff activity.
    Activity,
}

impl BusySlotKind {
    /// Returns whether the slot came from an appointment.
    #[must_use]
    pub const fn is_appointment(&self) -> bool {
        matches!(self, Self::TeamAppointment | Self::ClientAppointment)
    }
}

/// A normalized occupied interval for one subject on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusySlot {
    /// The occupied minutes.
    pub interval: Interval,
    /// Source kind.
    pub kind: BusySlotKind,
    /// Display title.
    pub title: String,
    /// Id of the source appointment or activity.
    pub event_id: i64,
    /// Originally scheduled end minute. Greater than `interval.end()` when
    /// a completed appointment finished early.
    pub scheduled_end: u16,
    /// True when the end was synthesized because the source had none.
    /// Placeholders are for display only.
    pub is_placeholder: bool,
}

impl BusySlot {
    /// Returns whether this slot ended before its scheduled end.
    #[must_use]
    pub const fn completed_early(&self) -> bool {
        self.scheduled_end > self.interval.end()
    }
}

/// A free slot that fits a requested duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlot {
    /// Slot start (`HH:MM`), the start of the free gap.
    pub start: String,
    /// Slot end (`HH:MM`), `start + duration_minutes`.
    pub end: String,
    /// End of the free gap the slot was cut from (`HH:MM`).
    pub free_until: String,
    /// Requested duration.
    pub duration_minutes: u16,
    /// The slot only exists because an earlier appointment completed
    /// ahead of its scheduled end.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub due_to_early_completion: bool,
}

impl AvailableSlot {
    /// Builds a slot of `duration` minutes anchored at the start of `gap`.
    ///
    /// Returns `None` if the gap is shorter than `duration`.
    #[must_use]
    pub fn anchored_in(gap: &Interval, duration: u16, due_to_early_completion: bool) -> Option<Self> {
        if duration == 0 || gap.duration() < duration {
            return None;
        }
        Some(Self {
            start: format_minutes(gap.start()),
            end: format_minutes(gap.start() + duration),
            free_until: format_minutes(gap.end()),
            duration_minutes: duration,
            due_to_early_completion,
        })
    }
}

/// Which subject a conflict was found for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// The team member is already busy.
    TeamConflict,
    /// The client is already busy.
    ClientConflict,
}

/// A detected overlap between a proposal and an existing busy slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictInfo {
    /// Team or client conflict.
    #[serde(rename = "type")]
    pub conflict_type: ConflictKind,
    /// Whether the conflicting entry is an appointment or an activity.
    pub event_kind: BusySlotKind,
    /// Id of the conflicting appointment (or activity).
    pub appointment_id: i64,
    /// Conflicting entry start (`HH:MM`).
    pub start_time: String,
    /// Conflicting entry end (`HH:MM`).
    pub end_time: String,
    /// Human-readable warning.
    pub message: String,
}
