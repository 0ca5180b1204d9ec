// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod availability;
mod conflicts;
mod error;
mod nemt;
mod placement;
mod source;
mod timeline;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use availability::{AvailabilityResult, availability_from_timeline, compute_availability};
pub use conflicts::{ConflictProposal, check_conflicts};
pub use error::CoreError;
pub use nemt::{NemtMatchResult, NemtPair, match_nemt, match_nemt_records};
pub use placement::{
    BoxPosition, DayColumn, DayGrid, DayPlacement, MonthCell, MonthGrid, WeekGrid, assign_lanes,
    group_by_date, place_day, place_month, place_week, position_in_window, week_start_for,
};
pub use source::{ScheduleSnapshot, ScheduleSource, SubjectRecords};
pub use timeline::{PLACEHOLDER_MINUTES, Timeline, compute_timeline, resolve_working_hours};

use carecal_domain::{ScheduleContext, SubjectRef};
use chrono::NaiveDate;

/// Builds a subject's timeline straight from a schedule source.
///
/// # Arguments
///
/// * `source` - Where the subject's records come from
/// * `subject` - The team member or client
/// * `date` - The date to normalize
/// * `ctx` - Timezone context
#[must_use]
pub fn timeline_for<S: ScheduleSource + ?Sized>(
    source: &S,
    subject: SubjectRef,
    date: NaiveDate,
    ctx: &ScheduleContext,
) -> Timeline {
    let records: SubjectRecords = source.subject_records(subject, date);
    compute_timeline(subject, date, &records, ctx)
}
