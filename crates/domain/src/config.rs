// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine configuration.
//!
//! Rendering heuristics (minimum box width, edge collapse, lane stacking)
//! and the NEMT matching tolerance are policy, not interval math, so they
//! live here where callers can tune them without touching the algorithms.

use crate::clock::ScheduleContext;
use crate::error::DomainError;
use crate::interval::Interval;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Default matching tolerance between appointment start and pickup start.
pub const DEFAULT_NEMT_TOLERANCE_MINUTES: u16 = 120;

/// Placement policy for calendar grids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementPolicy {
    /// First visible hour of the day view.
    pub first_hour: u8,
    /// Last visible hour of the day view (inclusive).
    pub last_hour: u8,
    /// Minimum box width, in percent of the window.
    pub min_width_pct: f64,
    /// Omit events lying entirely outside the visible window instead of
    /// collapsing them onto the nearest edge.
    pub hide_out_of_window: bool,
    /// Stack overlapping events into lanes.
    pub stack_lanes: bool,
    /// First column of week and month grids.
    pub week_start: Weekday,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self {
            first_hour: 8,
            last_hour: 19,
            min_width_pct: 5.0,
            hide_out_of_window: false,
            stack_lanes: true,
            week_start: Weekday::Sun,
        }
    }
}

impl PlacementPolicy {
    /// The visible window `[first_hour, last_hour + 1)` in minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the hours are out of order or past 23.
    pub fn window(&self) -> Result<Interval, DomainError> {
        if self.first_hour > self.last_hour || self.last_hour > 23 {
            return Err(DomainError::InvalidConfiguration {
                reason: format!(
                    "visible hours {}..={} must satisfy first <= last <= 23",
                    self.first_hour, self.last_hour
                ),
            });
        }
        Interval::new(
            u16::from(self.first_hour) * 60,
            (u16::from(self.last_hour) + 1) * 60,
        )
    }
}

/// Policy for the NEMT matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NemtPolicy {
    /// Maximum absolute minutes between appointment start and pickup start.
    pub tolerance_minutes: u16,
}

impl Default for NemtPolicy {
    fn default() -> Self {
        Self {
            tolerance_minutes: DEFAULT_NEMT_TOLERANCE_MINUTES,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// IANA timezone the agency operates in.
    pub timezone: String,
    /// Grid placement policy.
    pub placement: PlacementPolicy,
    /// NEMT matching policy.
    pub nemt: NemtPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: String::from("UTC"),
            placement: PlacementPolicy::default(),
            nemt: NemtPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfiguration` if the JSON is malformed
    /// or any value is out of bounds.
    pub fn from_json_str(json: &str) -> Result<Self, DomainError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DomainError::InvalidConfiguration {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The timezone is unknown
    /// - The visible hours are invalid
    /// - `min_width_pct` is outside `[0, 100]`
    pub fn validate(&self) -> Result<(), DomainError> {
        ScheduleContext::from_timezone_name(&self.timezone)?;
        self.placement.window()?;

        if !(0.0..=100.0).contains(&self.placement.min_width_pct) {
            return Err(DomainError::InvalidConfiguration {
                reason: format!(
                    "min_width_pct {} must be within 0..=100",
                    self.placement.min_width_pct
                ),
            });
        }
        Ok(())
    }

    /// Builds a scheduling context for the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the timezone is unknown.
    pub fn context(&self) -> Result<ScheduleContext, DomainError> {
        ScheduleContext::from_timezone_name(&self.timezone)
    }
}
