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
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    check_appointment_conflicts, get_availability, get_day_grid, get_month_grid, get_timeline,
    get_week_grid, parse_subject, run_nemt_matching,
};
pub use request_response::{
    BusySlotInfo, CheckConflictsRequest, CheckConflictsResponse, GetAvailabilityRequest,
    GetAvailabilityResponse, GetDayGridRequest, GetDayGridResponse, GetMonthGridRequest,
    GetMonthGridResponse, GetTimelineRequest, GetTimelineResponse, GetWeekGridRequest,
    GetWeekGridResponse, MonthCellInfo, PlacementInfo, RunNemtMatchingRequest,
    RunNemtMatchingResponse, WeekDayInfo, WindowInfo,
};

// Re-export the engine so callers only need this crate
pub use carecal::{ScheduleSnapshot, ScheduleSource, SubjectRecords};
pub use carecal_domain::EngineConfig;

use carecal_domain::ScheduleContext;
use chrono::{DateTime, Utc};

/// Validated configuration plus the time context every handler runs in.
///
/// Build one per request when "now" matters, so availability never offers
/// slots in the past.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiContext {
    config: EngineConfig,
    schedule: ScheduleContext,
}

impl ApiContext {
    /// Creates a context from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: EngineConfig) -> Result<Self, ApiError> {
        config
            .validate()
            .map_err(|e| translate_domain_error(e, "config"))?;
        let schedule: ScheduleContext = config
            .context()
            .map_err(|e| translate_domain_error(e, "timezone"))?;
        Ok(Self { config, schedule })
    }

    /// Creates a context from a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json_str(json: &str) -> Result<Self, ApiError> {
        let config: EngineConfig =
            EngineConfig::from_json_str(json).map_err(|e| translate_domain_error(e, "config"))?;
        Self::new(config)
    }

    /// Pins "now" so availability is trimmed to the future.
    #[must_use]
    pub const fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.schedule = self.schedule.with_now(now);
        self
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The time context.
    #[must_use]
    pub const fn schedule(&self) -> &ScheduleContext {
        &self.schedule
    }
}
