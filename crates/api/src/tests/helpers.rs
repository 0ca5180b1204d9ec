// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApiContext, ScheduleSnapshot};
use carecal_domain::{
    Activity, Appointment, AppointmentStatus, EngineConfig, NemtOccurrence, SubjectRef,
    WorkingHoursKey, WorkingHoursWindow,
};
use chrono::{NaiveDate, Weekday};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

pub fn create_test_context() -> ApiContext {
    ApiContext::new(EngineConfig::default()).expect("Valid default configuration")
}

pub fn create_test_appointment(
    id: i64,
    team_id: i64,
    client_id: i64,
    start_time: &str,
    end_time: &str,
) -> Appointment {
    Appointment {
        id,
        client_id,
        team_id,
        speciality_id: None,
        start_time: start_time.to_string(),
        end_time: Some(end_time.to_string()),
        status: AppointmentStatus::Scheduled,
        nemt_occurrence_id: None,
        completed_at: None,
        title: None,
    }
}

/// Team member 5 works Wednesdays 09:00-17:00 and is booked with client 9
/// from 10:00 to 11:00 on 2024-01-10, plus a staff meeting at 14:00.
pub fn create_test_snapshot() -> ScheduleSnapshot {
    let mut snapshot: ScheduleSnapshot = ScheduleSnapshot::new();
    snapshot.add_working_hours(
        SubjectRef::Team(5),
        WorkingHoursWindow::new(WorkingHoursKey::Weekday(Weekday::Wed), 540, 1020),
    );
    snapshot.add_appointment(create_test_appointment(
        1,
        5,
        9,
        "2024-01-10 10:00:00",
        "2024-01-10 11:00:00",
    ));
    snapshot.add_activity(Activity {
        id: 2,
        team_id: 5,
        activity_type: String::from("meeting"),
        title: String::from("Staff meeting"),
        start_time: String::from("2024-01-10 14:00:00"),
        end_time: String::from("2024-01-10 14:30:00"),
    });
    snapshot.add_nemt_occurrence(NemtOccurrence {
        id: 30,
        client_id: 9,
        transportation_date: NaiveDate::from_ymd_opt(2024, 1, 10).expect("Valid test date"),
        pickup_window_start: String::from("09:15"),
        pickup_window_end: Some(String::from("09:45")),
    });
    snapshot
}
