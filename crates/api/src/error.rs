// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use carecal::CoreError;
use carecal_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    pub(crate) fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
/// Parse errors are attributed to `field` since the domain does not know
/// which request field carried the value.
#[must_use]
pub fn translate_domain_error(err: DomainError, field: &str) -> ApiError {
    match err {
        DomainError::ParseError { .. } => ApiError::invalid_input(field, err.to_string()),
        DomainError::InvalidDuration { minutes } => ApiError::InvalidInput {
            field: String::from("duration_minutes"),
            message: format!("Invalid duration: {minutes} minutes. Must be between 1 and 1440"),
        },
        DomainError::MissingSubject => ApiError::InvalidInput {
            field: String::from("subject"),
            message: err.to_string(),
        },
        DomainError::InvalidInterval { start, end } => ApiError::DomainRuleViolation {
            rule: String::from("single_day_interval"),
            message: format!(
                "Interval {start}..{end} must start before it ends and finish by midnight"
            ),
        },
        DomainError::InvalidTimezone(name) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: format!("Unknown timezone '{name}'"),
        },
        DomainError::InvalidDateRange { start, end } => ApiError::InvalidInput {
            field: String::from("end_date"),
            message: format!("End date {end} is before start date {start}"),
        },
        DomainError::InvalidConfiguration { reason } => ApiError::Internal {
            message: format!("Engine configuration rejected: {reason}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError, field: &str) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err, field),
    }
}
