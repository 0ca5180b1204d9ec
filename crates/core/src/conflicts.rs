// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conflict detection for proposed appointments and activities.
//!
//! An empty result only means nothing overlaps. It says nothing about
//! working hours; callers that need that guarantee must also consult
//! availability.

use crate::error::CoreError;
use crate::source::{ScheduleSource, SubjectRecords};
use crate::timeline::{Timeline, compute_timeline};
use carecal_domain::{
    BusySlot, ConflictInfo, ConflictKind, DomainError, Interval, ScheduleContext, SubjectRef,
    format_minutes, overlaps, proposed_interval,
};
use chrono::NaiveDate;
use tracing::debug;

/// A proposed booking to check for conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictProposal {
    /// The team member to book, if any.
    pub team_id: Option<i64>,
    /// The client to book, if any.
    pub client_id: Option<i64>,
    /// The date of the booking.
    pub date: NaiveDate,
    /// Start minute of day.
    pub start_minute: u16,
    /// Requested length.
    pub duration_minutes: i64,
    /// An existing appointment being edited, which must not conflict with
    /// itself.
    pub exclude_appointment_id: Option<i64>,
}

/// Finds every existing busy slot the proposal would overlap.
///
/// # Returns
///
/// Team conflicts first, then client conflicts, each ordered by the
/// conflicting slot's start.
///
/// # Errors
///
/// Returns an error if:
/// - Neither `team_id` nor `client_id` is set
/// - The duration is not positive
/// - The proposal runs past midnight
pub fn check_conflicts<S: ScheduleSource + ?Sized>(
    source: &S,
    proposal: &ConflictProposal,
    ctx: &ScheduleContext,
) -> Result<Vec<ConflictInfo>, CoreError> {
    if proposal.team_id.is_none() && proposal.client_id.is_none() {
        return Err(DomainError::MissingSubject.into());
    }
    let proposed: Interval = proposed_interval(proposal.start_minute, proposal.duration_minutes)?;

    let subjects = [
        proposal
            .team_id
            .map(|id| (SubjectRef::Team(id), ConflictKind::TeamConflict)),
        proposal
            .client_id
            .map(|id| (SubjectRef::Client(id), ConflictKind::ClientConflict)),
    ];

    let mut conflicts: Vec<ConflictInfo> = Vec::new();
    for (subject, conflict_type) in subjects.into_iter().flatten() {
        let records: SubjectRecords = source.subject_records(subject, proposal.date);
        let timeline: Timeline = compute_timeline(subject, proposal.date, &records, ctx);

        conflicts.extend(
            timeline
                .blocking_slots()
                .filter(|slot| !is_excluded(slot, proposal.exclude_appointment_id))
                .filter(|slot| overlaps(&slot.interval, &proposed))
                .map(|slot| conflict_for(subject, conflict_type, slot)),
        );
    }

    debug!(
        date = %proposal.date,
        proposed = %proposed,
        conflicts = conflicts.len(),
        "Checked conflicts"
    );
    Ok(conflicts)
}

fn is_excluded(slot: &BusySlot, exclude_appointment_id: Option<i64>) -> bool {
    slot.kind.is_appointment() && exclude_appointment_id == Some(slot.event_id)
}

fn conflict_for(subject: SubjectRef, conflict_type: ConflictKind, slot: &BusySlot) -> ConflictInfo {
    let start_time: String = format_minutes(slot.interval.start());
    let end_time: String = format_minutes(slot.interval.end());
    let who: String = match subject {
        SubjectRef::Team(id) => format!("Team member {id}"),
        SubjectRef::Client(id) => format!("Client {id}"),
    };

    ConflictInfo {
        conflict_type,
        event_kind: slot.kind,
        appointment_id: slot.event_id,
        message: format!(
            "{who} is already booked for '{}' from {start_time} to {end_time}",
            slot.title
        ),
        start_time,
        end_time,
    }
}
