// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Access to the caller's already-materialized scheduling records.
//!
//! The engine performs no I/O. Callers load records from wherever they
//! live and hand them over through `ScheduleSource`; `ScheduleSnapshot`
//! is the in-memory implementation.

use carecal_domain::{
    Activity, Appointment, DateRange, NemtOccurrence, SubjectRef, TimeOff, WorkingHoursWindow,
};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Raw records visible for one subject.
///
/// Records may span more dates than the one being computed; the
/// normalizer discards everything that does not start on the requested
/// date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectRecords {
    /// Appointments the subject takes part in.
    pub appointments: Vec<Appointment>,
    /// Staff activities (team members only).
    pub activities: Vec<Activity>,
    /// Time-off records.
    pub time_off: Vec<TimeOff>,
    /// Working-hours windows.
    pub working_hours: Vec<WorkingHoursWindow>,
}

/// Read-only access to scheduling records.
///
/// Implementations may return supersets of what is asked for; every
/// engine operation filters by subject, date and range itself.
pub trait ScheduleSource {
    /// Records for one subject around `date`.
    fn subject_records(&self, subject: SubjectRef, date: NaiveDate) -> SubjectRecords;

    /// Appointments that may start within `range`.
    fn appointments_in(&self, range: &DateRange) -> Vec<Appointment>;

    /// Transportation occurrences that may fall within `range`.
    fn nemt_occurrences_in(&self, range: &DateRange) -> Vec<NemtOccurrence>;
}

/// An in-memory snapshot of scheduling records.
#[derive(Debug, Clone, Default)]
pub struct ScheduleSnapshot {
    appointments: Vec<Appointment>,
    activities: Vec<Activity>,
    time_off: HashMap<SubjectRef, Vec<TimeOff>>,
    working_hours: HashMap<SubjectRef, Vec<WorkingHoursWindow>>,
    nemt_occurrences: Vec<NemtOccurrence>,
}

impl ScheduleSnapshot {
    /// Creates a new empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an appointment.
    pub fn add_appointment(&mut self, appointment: Appointment) {
        self.appointments.push(appointment);
    }

    /// Adds a staff activity.
    pub fn add_activity(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    /// Adds a time-off record for a subject.
    pub fn add_time_off(&mut self, subject: SubjectRef, time_off: TimeOff) {
        self.time_off.entry(subject).or_default().push(time_off);
    }

    /// Adds a working-hours window for a subject.
    pub fn add_working_hours(&mut self, subject: SubjectRef, window: WorkingHoursWindow) {
        self.working_hours.entry(subject).or_default().push(window);
    }

    /// Adds a transportation occurrence.
    pub fn add_nemt_occurrence(&mut self, occurrence: NemtOccurrence) {
        self.nemt_occurrences.push(occurrence);
    }
}

impl ScheduleSource for ScheduleSnapshot {
    fn subject_records(&self, subject: SubjectRef, _date: NaiveDate) -> SubjectRecords {
        let (appointments, activities): (Vec<Appointment>, Vec<Activity>) = match subject {
            SubjectRef::Team(team_id) => (
                self.appointments
                    .iter()
                    .filter(|a| a.team_id == team_id)
                    .cloned()
                    .collect(),
                self.activities
                    .iter()
                    .filter(|a| a.team_id == team_id)
                    .cloned()
                    .collect(),
            ),
            SubjectRef::Client(client_id) => (
                self.appointments
                    .iter()
                    .filter(|a| a.client_id == client_id)
                    .cloned()
                    .collect(),
                Vec::new(),
            ),
        };

        SubjectRecords {
            appointments,
            activities,
            time_off: self.time_off.get(&subject).cloned().unwrap_or_default(),
            working_hours: self
                .working_hours
                .get(&subject)
                .cloned()
                .unwrap_or_default(),
        }
    }

    fn appointments_in(&self, _range: &DateRange) -> Vec<Appointment> {
        self.appointments.clone()
    }

    fn nemt_occurrences_in(&self, range: &DateRange) -> Vec<NemtOccurrence> {
        self.nemt_occurrences
            .iter()
            .filter(|o| range.contains(o.transportation_date))
            .cloned()
            .collect()
    }
}
