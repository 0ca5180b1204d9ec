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

mod clock;
mod config;
mod error;
mod interval;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use clock::{ScheduleContext, parse_clock, parse_date, parse_timestamp, to_minutes};
pub use config::{DEFAULT_NEMT_TOLERANCE_MINUTES, EngineConfig, NemtPolicy, PlacementPolicy};
pub use error::DomainError;
pub use interval::{
    Interval, MINUTES_PER_DAY, clamp, complement_within, format_minutes, merge_intervals,
    minute_of_day, overlaps, split_at_midnight,
};

// Re-export public types
pub use types::{
    Activity, Appointment, AppointmentStatus, AvailableSlot, BusySlot, BusySlotKind, ConflictInfo,
    ConflictKind, DateRange, NemtOccurrence, ScheduledEvent, SubjectRef, TimeOff, Timed,
    WorkingHoursKey, WorkingHoursWindow,
};
pub use validation::{proposed_interval, validate_duration};
