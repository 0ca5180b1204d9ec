// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use carecal_domain::{
    Activity, Appointment, AppointmentStatus, Interval, NemtOccurrence, ScheduleContext,
    WorkingHoursKey, WorkingHoursWindow,
};
use chrono::{NaiveDate, Weekday};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

pub fn ctx() -> ScheduleContext {
    ScheduleContext::default()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// 2024-01-10, a Wednesday.
pub fn test_date() -> NaiveDate {
    date(2024, 1, 10)
}

pub fn iv(start: u16, end: u16) -> Interval {
    Interval::new(start, end).unwrap()
}

pub fn create_test_appointment(
    id: i64,
    team_id: i64,
    client_id: i64,
    start_time: &str,
    end_time: Option<&str>,
) -> Appointment {
    Appointment {
        id,
        client_id,
        team_id,
        speciality_id: None,
        start_time: start_time.to_string(),
        end_time: end_time.map(str::to_string),
        status: AppointmentStatus::Scheduled,
        nemt_occurrence_id: None,
        completed_at: None,
        title: None,
    }
}

pub fn create_test_activity(id: i64, team_id: i64, title: &str, start_time: &str, end_time: &str) -> Activity {
    Activity {
        id,
        team_id,
        activity_type: String::from("training"),
        title: title.to_string(),
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
    }
}

pub fn create_test_occurrence(id: i64, client_id: i64, day: NaiveDate, pickup: &str) -> NemtOccurrence {
    NemtOccurrence {
        id,
        client_id,
        transportation_date: day,
        pickup_window_start: pickup.to_string(),
        pickup_window_end: None,
    }
}

/// Weekly Wednesday window.
pub fn wednesday_hours(start: u16, end: u16) -> WorkingHoursWindow {
    WorkingHoursWindow::new(WorkingHoursKey::Weekday(Weekday::Wed), start, end)
}
