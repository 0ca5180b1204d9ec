// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Grid placement for day, week and month calendar views.
//!
//! Day views map each busy slot to a `{left, width}` pair expressed as
//! percentages of the visible window, plus a lane index for overlapping
//! events. Week and month views bucket events by the date of their start.
//!
//! ## Day placement
//!
//! For a window `[W0, W1)` and an event `[S, E)`:
//!
//! ```text
//! left  = clamp01((S - W0) / (W1 - W0)) * 100
//! end   = clamp01((E - W0) / (W1 - W0)) * 100
//! width = max(min_width, min(end - left, 100 - left))
//! ```
//!
//! Events entirely outside the window collapse onto the nearest edge.
//! They are only omitted when the policy asks for it.
//!
//! ## Lanes
//!
//! Events are visited by start (ties in input order) and each one takes
//! the lowest lane whose last event has already ended. Snapshot tests
//! depend on this order.

use crate::error::CoreError;
use carecal_domain::{
    BusySlot, DomainError, Interval, PlacementPolicy, ScheduleContext, ScheduledEvent, Timed,
    overlaps, parse_timestamp,
};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Horizontal position of a box within the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxPosition {
    /// Left edge, percent of the window.
    pub left: f64,
    /// Width, percent of the window.
    pub width: f64,
    /// The event lies entirely outside the window.
    pub collapsed: bool,
}

/// One busy slot placed on a day grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlacement {
    /// The placed slot.
    pub slot: BusySlot,
    /// Left edge, percent of the window.
    pub left: f64,
    /// Width, percent of the window.
    pub width: f64,
    /// Zero-based lane.
    pub lane: usize,
    /// The slot lies entirely outside the window.
    pub collapsed: bool,
}

/// A laid-out day view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGrid {
    /// The visible window in minutes.
    pub window: Interval,
    /// Number of lanes needed.
    pub lane_count: usize,
    /// Placed slots, in input order.
    pub placements: Vec<DayPlacement>,
}

/// One day column of a week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    /// The date of this column.
    pub date: NaiveDate,
    /// Zero-based column index.
    pub column: usize,
    /// Events starting on this date, ordered by start.
    pub events: Vec<ScheduledEvent>,
}

/// A laid-out week view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekGrid {
    /// First date shown.
    pub start: NaiveDate,
    /// Seven day columns.
    pub days: Vec<DayColumn>,
}

/// One cell of a month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCell {
    /// The date of this cell.
    pub date: NaiveDate,
    /// Zero-based week row.
    pub row: usize,
    /// Zero-based day column.
    pub column: usize,
    /// False for padding days from adjacent months.
    pub in_month: bool,
    /// Events starting on this date, ordered by start.
    pub events: Vec<ScheduledEvent>,
}

/// A laid-out month view, padded to whole weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Number of week rows.
    pub rows: usize,
    /// Cells in row-major order.
    pub cells: Vec<MonthCell>,
}

/// Computes the horizontal position of an interval within a window.
#[must_use]
pub fn position_in_window(interval: &Interval, window: &Interval, min_width_pct: f64) -> BoxPosition {
    let left: f64 = window_fraction(interval.start(), window) * 100.0;
    let end: f64 = window_fraction(interval.end(), window) * 100.0;
    let width: f64 = (end - left).min(100.0 - left).max(min_width_pct);

    BoxPosition {
        left,
        width,
        collapsed: !overlaps(interval, window),
    }
}

fn window_fraction(minute: u16, window: &Interval) -> f64 {
    let offset: f64 = f64::from(i32::from(minute) - i32::from(window.start()));
    (offset / f64::from(window.duration())).clamp(0.0, 1.0)
}

/// Assigns lanes by greedy first-fit.
///
/// Returns one lane index per input interval, in input order.
#[must_use]
pub fn assign_lanes(intervals: &[Interval]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    // Stable: equal starts keep input order
    order.sort_by_key(|&i| intervals[i].start());

    let mut lane_ends: Vec<u16> = Vec::new();
    let mut lanes: Vec<usize> = vec![0; intervals.len()];

    for i in order {
        let interval: &Interval = &intervals[i];
        let lane: usize = match lane_ends.iter().position(|end| *end <= interval.start()) {
            Some(free) => {
                lane_ends[free] = interval.end();
                free
            }
            None => {
                lane_ends.push(interval.end());
                lane_ends.len() - 1
            }
        };
        lanes[i] = lane;
    }
    lanes
}

/// Places busy slots on a day grid.
///
/// # Arguments
///
/// * `slots` - Slots for one subject and date, typically a timeline's
///   `busy_slots`
/// * `policy` - Visible window and rendering heuristics
///
/// # Errors
///
/// Returns an error if the policy's visible hours are invalid.
pub fn place_day(slots: &[BusySlot], policy: &PlacementPolicy) -> Result<DayGrid, CoreError> {
    let window: Interval = policy.window()?;

    // Hidden slots must not hold a lane
    let visible: Vec<(&BusySlot, BoxPosition)> = slots
        .iter()
        .map(|slot| {
            (
                slot,
                position_in_window(&slot.interval, &window, policy.min_width_pct),
            )
        })
        .filter(|(_, position)| !(position.collapsed && policy.hide_out_of_window))
        .collect();

    let intervals: Vec<Interval> = visible.iter().map(|(slot, _)| slot.interval).collect();
    let lanes: Vec<usize> = if policy.stack_lanes {
        assign_lanes(&intervals)
    } else {
        vec![0; visible.len()]
    };

    let placements: Vec<DayPlacement> = visible
        .into_iter()
        .zip(lanes)
        .map(|((slot, position), lane)| DayPlacement {
            slot: slot.clone(),
            left: position.left,
            width: position.width,
            lane,
            collapsed: position.collapsed,
        })
        .collect();

    let lane_count: usize = placements.iter().map(|p| p.lane + 1).max().unwrap_or(0);
    debug!(
        placed = placements.len(),
        lane_count, "Placed events on day grid"
    );

    Ok(DayGrid {
        window,
        lane_count,
        placements,
    })
}

/// Groups events by the date of their start, each bucket ordered by start.
///
/// Events with unreadable start times are skipped.
#[must_use]
pub fn group_by_date(
    events: &[ScheduledEvent],
    ctx: &ScheduleContext,
) -> BTreeMap<NaiveDate, Vec<ScheduledEvent>> {
    let mut dated: Vec<(NaiveDateTime, &ScheduledEvent)> = events
        .iter()
        .filter_map(|event| match parse_timestamp(event.start_time(), ctx) {
            Ok(start) => Some((start, event)),
            Err(err) => {
                warn!(event_id = event.id(), error = %err, "Skipping unplaceable event");
                None
            }
        })
        .collect();
    dated.sort_by_key(|(start, _)| *start);

    let mut buckets: BTreeMap<NaiveDate, Vec<ScheduledEvent>> = BTreeMap::new();
    for (start, event) in dated {
        buckets.entry(start.date()).or_default().push(event.clone());
    }
    buckets
}

/// The first date of the week containing `date`.
#[must_use]
pub fn week_start_for(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let back: u32 =
        (date.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;
    date - Duration::days(i64::from(back))
}

/// Lays out the week containing `date`.
#[must_use]
pub fn place_week(
    events: &[ScheduledEvent],
    date: NaiveDate,
    policy: &PlacementPolicy,
    ctx: &ScheduleContext,
) -> WeekGrid {
    let start: NaiveDate = week_start_for(date, policy.week_start);
    let mut buckets: BTreeMap<NaiveDate, Vec<ScheduledEvent>> = group_by_date(events, ctx);

    let days: Vec<DayColumn> = start
        .iter_days()
        .take(7)
        .enumerate()
        .map(|(column, day)| DayColumn {
            date: day,
            column,
            events: buckets.remove(&day).unwrap_or_default(),
        })
        .collect();

    WeekGrid { start, days }
}

/// Lays out a month, padded with adjacent-month days to whole weeks.
///
/// # Errors
///
/// Returns an error if `year`/`month` do not name a calendar month.
pub fn place_month(
    events: &[ScheduledEvent],
    year: i32,
    month: u32,
    policy: &PlacementPolicy,
    ctx: &ScheduleContext,
) -> Result<MonthGrid, CoreError> {
    let invalid_month = || DomainError::ParseError {
        kind: "month",
        value: format!("{year}-{month:02}"),
        reason: String::from("no such calendar month"),
    };

    let first: NaiveDate = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid_month)?;
    let next_first: NaiveDate = first
        .checked_add_months(chrono::Months::new(1))
        .ok_or_else(invalid_month)?;
    let last: NaiveDate = next_first - Duration::days(1);

    let grid_start: NaiveDate = week_start_for(first, policy.week_start);
    let grid_end: NaiveDate = week_start_for(last, policy.week_start) + Duration::days(6);

    let mut buckets: BTreeMap<NaiveDate, Vec<ScheduledEvent>> = group_by_date(events, ctx);

    let cells: Vec<MonthCell> = grid_start
        .iter_days()
        .take_while(|day| *day <= grid_end)
        .enumerate()
        .map(|(index, day)| MonthCell {
            date: day,
            row: index / 7,
            column: index % 7,
            in_month: day.month() == month,
            events: buckets.remove(&day).unwrap_or_default(),
        })
        .collect();

    Ok(MonthGrid {
        year,
        month,
        rows: cells.len() / 7,
        cells,
    })
}
