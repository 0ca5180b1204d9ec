// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry dates as `YYYY-MM-DD` and clock times as `HH:MM` strings;
//! handlers validate them before reaching the engine.

use carecal::{DayColumn, DayPlacement, MonthCell, NemtPair};
use carecal_domain::{
    AvailableSlot, BusySlot, BusySlotKind, ConflictInfo, Interval, ScheduledEvent, format_minutes,
};
use serde::{Deserialize, Serialize};

/// API request for a subject's normalized timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTimelineRequest {
    /// `team` or `client`.
    pub subject_type: String,
    /// The team member or client id.
    pub subject_id: i64,
    /// The date (`YYYY-MM-DD`).
    pub date: String,
}

/// A working-hours window or visible window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    /// Window start (`HH:MM`).
    pub start_time: String,
    /// Window end (`HH:MM`, `24:00` for midnight).
    pub end_time: String,
}

impl From<&Interval> for WindowInfo {
    fn from(interval: &Interval) -> Self {
        Self {
            start_time: format_minutes(interval.start()),
            end_time: format_minutes(interval.end()),
        }
    }
}

/// A busy slot as shown to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusySlotInfo {
    /// Id of the source appointment or activity.
    pub event_id: i64,
    /// Source kind.
    pub kind: BusySlotKind,
    /// Display title.
    pub title: String,
    /// Slot start (`HH:MM`).
    pub start_time: String,
    /// Slot end (`HH:MM`).
    pub end_time: String,
    /// The end was synthesized; the slot does not block bookings.
    pub is_placeholder: bool,
    /// A completed appointment finished before its scheduled end.
    pub completed_early: bool,
}

impl From<&BusySlot> for BusySlotInfo {
    fn from(slot: &BusySlot) -> Self {
        Self {
            event_id: slot.event_id,
            kind: slot.kind,
            title: slot.title.clone(),
            start_time: format_minutes(slot.interval.start()),
            end_time: format_minutes(slot.interval.end()),
            is_placeholder: slot.is_placeholder,
            completed_early: slot.completed_early(),
        }
    }
}

/// API response for a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTimelineResponse {
    /// `team` or `client`.
    pub subject_type: String,
    /// The team member or client id.
    pub subject_id: i64,
    /// The date (`YYYY-MM-DD`).
    pub date: String,
    /// Whether time-off covers the date.
    pub is_time_off: bool,
    /// Active working-hours windows.
    pub working_hours: Vec<WindowInfo>,
    /// Busy slots ordered by start.
    pub busy_slots: Vec<BusySlotInfo>,
}

/// API request for a subject's day grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetDayGridRequest {
    /// `team` or `client`.
    pub subject_type: String,
    /// The team member or client id.
    pub subject_id: i64,
    /// The date (`YYYY-MM-DD`).
    pub date: String,
}

/// A placed box on the day grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementInfo {
    /// The placed slot.
    pub slot: BusySlotInfo,
    /// Left edge, percent of the window.
    pub left: f64,
    /// Width, percent of the window.
    pub width: f64,
    /// Zero-based lane.
    pub lane: usize,
    /// The slot lies outside the visible window.
    pub collapsed: bool,
}

impl From<&DayPlacement> for PlacementInfo {
    fn from(placement: &DayPlacement) -> Self {
        Self {
            slot: BusySlotInfo::from(&placement.slot),
            left: placement.left,
            width: placement.width,
            lane: placement.lane,
            collapsed: placement.collapsed,
        }
    }
}

/// API response for a day grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetDayGridResponse {
    /// The date (`YYYY-MM-DD`).
    pub date: String,
    /// The visible window.
    pub window: WindowInfo,
    /// Number of lanes.
    pub lane_count: usize,
    /// Placed boxes.
    pub placements: Vec<PlacementInfo>,
    /// Whether time-off covers the date.
    pub is_time_off: bool,
}

/// API request for a week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetWeekGridRequest {
    /// Any date inside the week (`YYYY-MM-DD`).
    pub date: String,
    /// The events to lay out.
    pub events: Vec<ScheduledEvent>,
}

/// One column of a week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekDayInfo {
    /// The column's date (`YYYY-MM-DD`).
    pub date: String,
    /// Zero-based column.
    pub column: usize,
    /// Events starting on this date, ordered by start.
    pub events: Vec<ScheduledEvent>,
}

impl From<DayColumn> for WeekDayInfo {
    fn from(day: DayColumn) -> Self {
        Self {
            date: day.date.to_string(),
            column: day.column,
            events: day.events,
        }
    }
}

/// API response for a week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetWeekGridResponse {
    /// First date shown (`YYYY-MM-DD`).
    pub start_date: String,
    /// Seven columns.
    pub days: Vec<WeekDayInfo>,
}

/// API request for a month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMonthGridRequest {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// The events to lay out.
    pub events: Vec<ScheduledEvent>,
}

/// One cell of a month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCellInfo {
    /// The cell's date (`YYYY-MM-DD`).
    pub date: String,
    /// Zero-based week row.
    pub row: usize,
    /// Zero-based day column.
    pub column: usize,
    /// False for padding days.
    pub in_month: bool,
    /// Events starting on this date, ordered by start.
    pub events: Vec<ScheduledEvent>,
}

impl From<MonthCell> for MonthCellInfo {
    fn from(cell: MonthCell) -> Self {
        Self {
            date: cell.date.to_string(),
            row: cell.row,
            column: cell.column,
            in_month: cell.in_month,
            events: cell.events,
        }
    }
}

/// API response for a month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMonthGridResponse {
    /// Calendar year.
    pub year: i32,
    /// Calendar month.
    pub month: u32,
    /// Number of week rows.
    pub rows: usize,
    /// Cells in row-major order.
    pub cells: Vec<MonthCellInfo>,
}

/// API request for availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAvailabilityRequest {
    /// `team` or `client`.
    pub subject_type: String,
    /// The team member or client id.
    pub subject_id: i64,
    /// The date (`YYYY-MM-DD`).
    pub date: String,
    /// Requested appointment length in minutes.
    pub duration_minutes: i64,
}

/// API response for availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAvailabilityResponse {
    /// `team` or `client`.
    pub subject_type: String,
    /// The team member or client id.
    pub subject_id: i64,
    /// The date (`YYYY-MM-DD`).
    pub date: String,
    /// Bookable slots.
    pub available_slots: Vec<AvailableSlot>,
    /// Busy slots, including placeholders.
    pub busy_slots: Vec<BusySlotInfo>,
    /// Working-hours windows used. Empty when unavailable.
    pub working_hours: Vec<WindowInfo>,
    /// Whether time-off covers the date.
    pub time_off: bool,
}

/// API request to check a proposed booking for conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConflictsRequest {
    /// The team member to book.
    #[serde(default)]
    pub team_id: Option<i64>,
    /// The client to book.
    #[serde(default)]
    pub client_id: Option<i64>,
    /// The date (`YYYY-MM-DD`).
    pub date: String,
    /// Start time (`HH:MM`).
    pub start_time: String,
    /// Length in minutes.
    pub duration_minutes: i64,
    /// The appointment being edited, if any.
    #[serde(default)]
    pub exclude_appointment_id: Option<i64>,
}

/// API response for a conflict check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConflictsResponse {
    /// Whether any conflict was found.
    pub has_conflicts: bool,
    /// Team conflicts first, then client conflicts.
    pub conflicts: Vec<ConflictInfo>,
}

/// API request to run NEMT matching over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunNemtMatchingRequest {
    /// First date (`YYYY-MM-DD`), inclusive.
    pub start_date: String,
    /// Last date (`YYYY-MM-DD`), exclusive.
    pub end_date: String,
}

/// API response for a NEMT matching run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunNemtMatchingResponse {
    /// Number of pairs.
    pub matched_count: usize,
    /// Pairs the caller should persist.
    pub pairs: Vec<NemtPair>,
    /// A summary message.
    pub message: String,
}
