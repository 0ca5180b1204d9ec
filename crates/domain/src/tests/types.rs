// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Activity, Appointment, AppointmentStatus, DateRange, DomainError, ScheduledEvent, SubjectRef,
    TimeOff, Timed, WorkingHoursKey, WorkingHoursWindow,
};
use chrono::{NaiveDate, Weekday};
use std::str::FromStr;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_status_round_trips_through_strings() {
    for status in [
        AppointmentStatus::Pending,
        AppointmentStatus::InProgress,
        AppointmentStatus::NoShow,
        AppointmentStatus::TerminatedByClient,
        AppointmentStatus::Deleted,
    ] {
        assert_eq!(AppointmentStatus::from_str(status.as_str()).unwrap(), status);
    }
    assert!(AppointmentStatus::from_str("maybe").is_err());
}

#[test]
fn test_status_classification() {
    assert!(AppointmentStatus::Scheduled.occupies_time());
    assert!(AppointmentStatus::Completed.occupies_time());
    assert!(!AppointmentStatus::Cancelled.occupies_time());
    assert!(!AppointmentStatus::TerminatedByStaff.occupies_time());

    assert!(AppointmentStatus::Late.awaits_transport());
    assert!(AppointmentStatus::Unassigned.awaits_transport());
    assert!(!AppointmentStatus::Pending.awaits_transport());
    assert!(!AppointmentStatus::Completed.awaits_transport());
}

#[test]
fn test_status_deserializes_snake_case() {
    let status: AppointmentStatus = serde_json::from_str("\"in_progress\"").unwrap();
    assert_eq!(status, AppointmentStatus::InProgress);
}

#[test]
fn test_scheduled_event_dispatches_by_variant() {
    let appointment: ScheduledEvent = ScheduledEvent::Appointment(Appointment {
        id: 7,
        client_id: 9,
        team_id: 5,
        speciality_id: None,
        start_time: String::from("2024-01-10 09:00:00"),
        end_time: None,
        status: AppointmentStatus::Scheduled,
        nemt_occurrence_id: None,
        completed_at: None,
        title: None,
    });
    let activity: ScheduledEvent = ScheduledEvent::Activity(Activity {
        id: 3,
        team_id: 5,
        activity_type: String::from("training"),
        title: String::new(),
        start_time: String::from("2024-01-10 13:00:00"),
        end_time: String::from("2024-01-10 14:00:00"),
    });

    assert_eq!(appointment.display_title(), "Appointment #7");
    assert_eq!(appointment.end_time(), None);
    assert_eq!(activity.display_title(), "training");
    assert_eq!(activity.end_time(), Some("2024-01-10 14:00:00"));
}

#[test]
fn test_activity_deserializes_type_field() {
    let activity: Activity = serde_json::from_str(
        r#"{"id": 1, "team_id": 5, "type": "admin", "title": "Paperwork",
            "start_time": "2024-01-10 08:00", "end_time": "2024-01-10 08:30"}"#,
    )
    .unwrap();
    assert_eq!(activity.activity_type, "admin");
}

#[test]
fn test_time_off_covers_inclusive_range() {
    let single: TimeOff = TimeOff {
        id: 1,
        time_off_type: String::from("sick"),
        start_date: date(2024, 1, 10),
        end_date: None,
    };
    assert!(single.covers(date(2024, 1, 10)));
    assert!(!single.covers(date(2024, 1, 11)));

    let range: TimeOff = TimeOff {
        end_date: Some(date(2024, 1, 12)),
        ..single
    };
    assert!(range.covers(date(2024, 1, 12)));
    assert!(!range.covers(date(2024, 1, 13)));
    assert!(!range.covers(date(2024, 1, 9)));
}

#[test]
fn test_working_hours_window_keys() {
    // 2024-01-10 is a Wednesday
    let weekly: WorkingHoursWindow =
        WorkingHoursWindow::new(WorkingHoursKey::Weekday(Weekday::Wed), 540, 1020);
    let one_off: WorkingHoursWindow =
        WorkingHoursWindow::new(WorkingHoursKey::Date(date(2024, 1, 10)), 600, 720);

    assert!(weekly.is_weekday_window_for(date(2024, 1, 10)));
    assert!(!weekly.is_weekday_window_for(date(2024, 1, 11)));
    assert!(one_off.is_date_override_for(date(2024, 1, 10)));
    assert!(
        WorkingHoursWindow::new(WorkingHoursKey::Weekday(Weekday::Wed), 1020, 540)
            .interval()
            .is_none()
    );
}

#[test]
fn test_date_range_is_half_open() {
    let range: DateRange = DateRange::new(date(2024, 1, 1), date(2024, 1, 8)).unwrap();
    assert!(range.contains(date(2024, 1, 1)));
    assert!(range.contains(date(2024, 1, 7)));
    assert!(!range.contains(date(2024, 1, 8)));

    assert_eq!(
        DateRange::new(date(2024, 1, 8), date(2024, 1, 1)),
        Err(DomainError::InvalidDateRange {
            start: date(2024, 1, 8),
            end: date(2024, 1, 1),
        })
    );
}

#[test]
fn test_subject_display() {
    assert_eq!(SubjectRef::Team(5).to_string(), "team member 5");
    assert_eq!(SubjectRef::Client(9).to_string(), "client 9");
    assert_eq!(SubjectRef::Client(9).id(), 9);
}
