// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for read-only scheduling operations.
//!
//! Every handler validates its string-typed request, calls the engine and
//! maps the result into a response DTO. None of them write anything: NEMT
//! pairs are returned for the caller to persist.

use carecal::{
    AvailabilityResult, ConflictProposal, DayGrid, MonthGrid, NemtMatchResult, ScheduleSource,
    Timeline, WeekGrid, check_conflicts, compute_availability, match_nemt, place_day, place_month,
    place_week, timeline_for,
};
use carecal_domain::{
    ConflictInfo, DateRange, ScheduleContext, SubjectRef, minute_of_day, parse_clock, parse_date,
    parse_timestamp,
};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use crate::ApiContext;
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    BusySlotInfo, CheckConflictsRequest, CheckConflictsResponse, GetAvailabilityRequest,
    GetAvailabilityResponse, GetDayGridRequest, GetDayGridResponse, GetMonthGridRequest,
    GetMonthGridResponse, GetTimelineRequest, GetTimelineResponse, GetWeekGridRequest,
    GetWeekGridResponse, MonthCellInfo, PlacementInfo, RunNemtMatchingRequest,
    RunNemtMatchingResponse, WeekDayInfo, WindowInfo,
};

/// Parses the `subject_type` / `subject_id` pair of a request.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` unless `subject_type` is `team` or
/// `client`.
pub fn parse_subject(subject_type: &str, subject_id: i64) -> Result<SubjectRef, ApiError> {
    match subject_type {
        "team" => Ok(SubjectRef::Team(subject_id)),
        "client" => Ok(SubjectRef::Client(subject_id)),
        other => Err(ApiError::invalid_input(
            "subject_type",
            format!("Unknown subject type '{other}'. Must be 'team' or 'client'"),
        )),
    }
}

fn parse_request_date(value: &str, field: &str) -> Result<NaiveDate, ApiError> {
    parse_date(value).map_err(|e| translate_domain_error(e, field))
}

/// Reads a proposal start as a clock time, or as a timestamp on `date`.
fn parse_start_minute(
    value: &str,
    date: NaiveDate,
    ctx: &ScheduleContext,
) -> Result<u16, ApiError> {
    if let Ok(time) = parse_clock(value) {
        return Ok(minute_of_day(time));
    }

    let start: NaiveDateTime =
        parse_timestamp(value, ctx).map_err(|e| translate_domain_error(e, "start_time"))?;
    if start.date() != date {
        return Err(ApiError::invalid_input(
            "start_time",
            format!(
                "Start time '{value}' falls on {}, not on the requested date {date}",
                start.date()
            ),
        ));
    }
    Ok(minute_of_day(start.time()))
}

/// Gets a subject's normalized timeline for a date.
///
/// # Errors
///
/// Returns an error if:
/// - The subject type is unknown
/// - The date is not `YYYY-MM-DD`
pub fn get_timeline<S: ScheduleSource + ?Sized>(
    source: &S,
    api: &ApiContext,
    request: &GetTimelineRequest,
) -> Result<GetTimelineResponse, ApiError> {
    let subject: SubjectRef = parse_subject(&request.subject_type, request.subject_id)?;
    let date: NaiveDate = parse_request_date(&request.date, "date")?;

    let timeline: Timeline = timeline_for(source, subject, date, api.schedule());

    info!(
        subject = %subject,
        date = %date,
        busy = timeline.busy_slots.len(),
        "Served timeline"
    );

    Ok(GetTimelineResponse {
        subject_type: request.subject_type.clone(),
        subject_id: request.subject_id,
        date: date.to_string(),
        is_time_off: timeline.is_time_off,
        working_hours: timeline.working_hours.iter().map(WindowInfo::from).collect(),
        busy_slots: timeline.busy_slots.iter().map(BusySlotInfo::from).collect(),
    })
}

/// Lays out a subject's day on the configured visible window.
///
/// # Errors
///
/// Returns an error if:
/// - The subject type is unknown
/// - The date is not `YYYY-MM-DD`
/// - The configured visible hours are invalid
pub fn get_day_grid<S: ScheduleSource + ?Sized>(
    source: &S,
    api: &ApiContext,
    request: &GetDayGridRequest,
) -> Result<GetDayGridResponse, ApiError> {
    let subject: SubjectRef = parse_subject(&request.subject_type, request.subject_id)?;
    let date: NaiveDate = parse_request_date(&request.date, "date")?;

    let timeline: Timeline = timeline_for(source, subject, date, api.schedule());
    let grid: DayGrid = place_day(&timeline.busy_slots, &api.config().placement)
        .map_err(|e| translate_core_error(e, "placement"))?;

    info!(
        subject = %subject,
        date = %date,
        placed = grid.placements.len(),
        lanes = grid.lane_count,
        "Served day grid"
    );

    Ok(GetDayGridResponse {
        date: date.to_string(),
        window: WindowInfo::from(&grid.window),
        lane_count: grid.lane_count,
        placements: grid.placements.iter().map(PlacementInfo::from).collect(),
        is_time_off: timeline.is_time_off,
    })
}

/// Lays out the week containing the requested date.
///
/// # Errors
///
/// Returns an error if the date is not `YYYY-MM-DD`.
pub fn get_week_grid(
    api: &ApiContext,
    request: &GetWeekGridRequest,
) -> Result<GetWeekGridResponse, ApiError> {
    let date: NaiveDate = parse_request_date(&request.date, "date")?;
    let grid: WeekGrid = place_week(
        &request.events,
        date,
        &api.config().placement,
        api.schedule(),
    );

    info!(start = %grid.start, events = request.events.len(), "Served week grid");

    Ok(GetWeekGridResponse {
        start_date: grid.start.to_string(),
        days: grid.days.into_iter().map(WeekDayInfo::from).collect(),
    })
}

/// Lays out a calendar month.
///
/// # Errors
///
/// Returns an error if `year`/`month` do not name a calendar month.
pub fn get_month_grid(
    api: &ApiContext,
    request: &GetMonthGridRequest,
) -> Result<GetMonthGridResponse, ApiError> {
    let grid: MonthGrid = place_month(
        &request.events,
        request.year,
        request.month,
        &api.config().placement,
        api.schedule(),
    )
    .map_err(|e| translate_core_error(e, "month"))?;

    info!(
        year = grid.year,
        month = grid.month,
        rows = grid.rows,
        "Served month grid"
    );

    Ok(GetMonthGridResponse {
        year: grid.year,
        month: grid.month,
        rows: grid.rows,
        cells: grid.cells.into_iter().map(MonthCellInfo::from).collect(),
    })
}

/// Computes bookable slots for a subject.
///
/// # Errors
///
/// Returns an error if:
/// - The subject type is unknown
/// - The date is not `YYYY-MM-DD`
/// - The duration is not between 1 and 1440 minutes
pub fn get_availability<S: ScheduleSource + ?Sized>(
    source: &S,
    api: &ApiContext,
    request: &GetAvailabilityRequest,
) -> Result<GetAvailabilityResponse, ApiError> {
    let subject: SubjectRef = parse_subject(&request.subject_type, request.subject_id)?;
    let date: NaiveDate = parse_request_date(&request.date, "date")?;

    let result: AvailabilityResult = compute_availability(
        source,
        subject,
        date,
        request.duration_minutes,
        api.schedule(),
    )
    .map_err(|e| translate_core_error(e, "duration_minutes"))?;

    info!(
        subject = %subject,
        date = %date,
        duration = request.duration_minutes,
        available = result.available_slots.len(),
        time_off = result.time_off,
        "Served availability"
    );

    Ok(GetAvailabilityResponse {
        subject_type: request.subject_type.clone(),
        subject_id: request.subject_id,
        date: date.to_string(),
        busy_slots: result.busy_slots.iter().map(BusySlotInfo::from).collect(),
        working_hours: result.working_hours.iter().map(WindowInfo::from).collect(),
        available_slots: result.available_slots,
        time_off: result.time_off,
    })
}

/// Checks a proposed booking against existing appointments and activities.
///
/// Conflicts are warnings: the caller decides whether to block the booking.
///
/// # Errors
///
/// Returns an error if:
/// - Neither `team_id` nor `client_id` is set
/// - The date or start time cannot be parsed
/// - The start time is a timestamp on a different date
/// - The duration is invalid or the booking runs past midnight
pub fn check_appointment_conflicts<S: ScheduleSource + ?Sized>(
    source: &S,
    api: &ApiContext,
    request: &CheckConflictsRequest,
) -> Result<CheckConflictsResponse, ApiError> {
    let date: NaiveDate = parse_request_date(&request.date, "date")?;
    let start_minute: u16 = parse_start_minute(&request.start_time, date, api.schedule())?;

    let proposal: ConflictProposal = ConflictProposal {
        team_id: request.team_id,
        client_id: request.client_id,
        date,
        start_minute,
        duration_minutes: request.duration_minutes,
        exclude_appointment_id: request.exclude_appointment_id,
    };
    let conflicts: Vec<ConflictInfo> = check_conflicts(source, &proposal, api.schedule())
        .map_err(|e| translate_core_error(e, "start_time"))?;

    info!(
        team_id = ?request.team_id,
        client_id = ?request.client_id,
        date = %date,
        start_time = %request.start_time,
        conflicts = conflicts.len(),
        "Checked appointment conflicts"
    );

    Ok(CheckConflictsResponse {
        has_conflicts: !conflicts.is_empty(),
        conflicts,
    })
}

/// Pairs untransported appointments with NEMT occurrences in a range.
///
/// The returned pairs are not persisted here. Concurrent runs over the
/// same range must be serialized by the caller.
///
/// # Errors
///
/// Returns an error if:
/// - Either date is not `YYYY-MM-DD`
/// - The end date is before the start date
pub fn run_nemt_matching<S: ScheduleSource + ?Sized>(
    source: &S,
    api: &ApiContext,
    request: &RunNemtMatchingRequest,
) -> Result<RunNemtMatchingResponse, ApiError> {
    let start: NaiveDate = parse_request_date(&request.start_date, "start_date")?;
    let end: NaiveDate = parse_request_date(&request.end_date, "end_date")?;
    let range: DateRange =
        DateRange::new(start, end).map_err(|e| translate_domain_error(e, "end_date"))?;

    let result: NemtMatchResult = match_nemt(source, &range, &api.config().nemt, api.schedule());

    info!(
        start = %start,
        end = %end,
        matched = result.matched_count,
        "Ran NEMT matching"
    );

    Ok(RunNemtMatchingResponse {
        matched_count: result.matched_count,
        message: format!(
            "Matched {} appointment(s) with NEMT occurrences between {start} and {end}",
            result.matched_count
        ),
        pairs: result.pairs,
    })
}
