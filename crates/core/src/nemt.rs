// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pairing of untransported appointments with NEMT occurrences.
//!
//! ## Procedure
//!
//! - Eligible appointments start inside the range, await transport
//!   (`scheduled`, `unassigned`, `in_progress`, `late`) and have no
//!   occurrence yet
//! - Candidate occurrences belong to the same client, fall inside the
//!   range and are not already linked to any input appointment
//! - A pair matches when appointment start and pickup window start are at
//!   most the tolerance apart
//! - Appointments are visited by ascending start (ties by id) and each
//!   claims its nearest unclaimed occurrence (ties by earlier pickup, then
//!   lower id)
//!
//! The matcher only computes pairs. Persisting `nemt_occurrence_id` is the
//! caller's job, and concurrent runs over the same range must be
//! serialized by the caller.

use crate::source::ScheduleSource;
use carecal_domain::{
    Appointment, DateRange, NemtOccurrence, NemtPolicy, ScheduleContext, parse_clock,
    parse_timestamp,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// One appointment paired with one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NemtPair {
    /// The appointment to update.
    pub appointment_id: i64,
    /// The occurrence to link.
    pub occurrence_id: i64,
    /// Pickup start minus appointment start, in minutes.
    pub difference_minutes: i64,
}

/// Outcome of a matching run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NemtMatchResult {
    /// Number of pairs.
    pub matched_count: usize,
    /// Pairs in the order they were claimed.
    pub pairs: Vec<NemtPair>,
}

struct PendingAppointment {
    id: i64,
    client_id: i64,
    start: NaiveDateTime,
}

struct Pickup {
    id: i64,
    start: NaiveDateTime,
}

/// Runs the matcher against a schedule source.
#[must_use]
pub fn match_nemt<S: ScheduleSource + ?Sized>(
    source: &S,
    range: &DateRange,
    policy: &NemtPolicy,
    ctx: &ScheduleContext,
) -> NemtMatchResult {
    let appointments: Vec<Appointment> = source.appointments_in(range);
    let occurrences: Vec<NemtOccurrence> = source.nemt_occurrences_in(range);
    match_nemt_records(&appointments, &occurrences, range, policy, ctx)
}

/// Runs the matcher over explicit record sets.
///
/// Unmatched appointments are simply absent from the result. Records with
/// unreadable times are skipped.
#[must_use]
pub fn match_nemt_records(
    appointments: &[Appointment],
    occurrences: &[NemtOccurrence],
    range: &DateRange,
    policy: &NemtPolicy,
    ctx: &ScheduleContext,
) -> NemtMatchResult {
    let mut pending: Vec<PendingAppointment> = appointments
        .iter()
        .filter(|a| a.status.awaits_transport() && a.nemt_occurrence_id.is_none())
        .filter_map(|a| match parse_timestamp(&a.start_time, ctx) {
            Ok(start) => Some(PendingAppointment {
                id: a.id,
                client_id: a.client_id,
                start,
            }),
            Err(err) => {
                warn!(appointment_id = a.id, error = %err, "Skipping unreadable appointment");
                None
            }
        })
        .filter(|a| range.contains(a.start.date()))
        .collect();
    pending.sort_by_key(|a| (a.start, a.id));

    let mut pickups_by_client: HashMap<i64, Vec<Pickup>> = HashMap::new();
    for occurrence in occurrences
        .iter()
        .filter(|o| range.contains(o.transportation_date))
    {
        match parse_clock(&occurrence.pickup_window_start) {
            Ok(time) => pickups_by_client
                .entry(occurrence.client_id)
                .or_default()
                .push(Pickup {
                    id: occurrence.id,
                    start: occurrence.transportation_date.and_time(time),
                }),
            Err(err) => {
                warn!(occurrence_id = occurrence.id, error = %err, "Skipping unreadable occurrence");
            }
        }
    }

    let tolerance: i64 = i64::from(policy.tolerance_minutes);
    // Occurrences already linked to any appointment are consumed
    let mut claimed: HashSet<i64> = appointments
        .iter()
        .filter_map(|a| a.nemt_occurrence_id)
        .collect();
    let mut pairs: Vec<NemtPair> = Vec::new();

    for appointment in &pending {
        let Some(candidates) = pickups_by_client.get(&appointment.client_id) else {
            continue;
        };

        let nearest: Option<(&Pickup, i64)> = candidates
            .iter()
            .filter(|p| !claimed.contains(&p.id))
            .map(|p| (p, (p.start - appointment.start).num_minutes()))
            .filter(|(_, difference)| difference.abs() <= tolerance)
            .min_by_key(|(p, difference)| (difference.abs(), p.start, p.id));

        if let Some((pickup, difference_minutes)) = nearest {
            claimed.insert(pickup.id);
            pairs.push(NemtPair {
                appointment_id: appointment.id,
                occurrence_id: pickup.id,
                difference_minutes,
            });
        }
    }

    debug!(
        start = %range.start(),
        end = %range.end(),
        eligible = pending.len(),
        matched = pairs.len(),
        "Matched NEMT occurrences"
    );

    NemtMatchResult {
        matched_count: pairs.len(),
        pairs,
    }
}
