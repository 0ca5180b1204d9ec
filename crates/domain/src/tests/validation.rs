// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Interval, proposed_interval, validate_duration};

#[test]
fn test_positive_duration_is_accepted() {
    assert_eq!(validate_duration(1).unwrap(), 1);
    assert_eq!(validate_duration(60).unwrap(), 60);
    assert_eq!(validate_duration(1440).unwrap(), 1440);
}

#[test]
fn test_non_positive_duration_is_rejected() {
    assert_eq!(
        validate_duration(0),
        Err(DomainError::InvalidDuration { minutes: 0 })
    );
    assert_eq!(
        validate_duration(-30),
        Err(DomainError::InvalidDuration { minutes: -30 })
    );
}

#[test]
fn test_duration_longer_than_a_day_is_rejected() {
    assert_eq!(
        validate_duration(1441),
        Err(DomainError::InvalidDuration { minutes: 1441 })
    );
    assert!(validate_duration(i64::MAX).is_err());
}

#[test]
fn test_proposed_interval() {
    assert_eq!(
        proposed_interval(570, 60).unwrap(),
        Interval::new(570, 630).unwrap()
    );
    assert_eq!(
        proposed_interval(1380, 60).unwrap(),
        Interval::new(1380, 1440).unwrap()
    );
    assert_eq!(
        proposed_interval(1380, 120),
        Err(DomainError::InvalidInterval {
            start: 1380,
            end: 1500,
        })
    );
    assert_eq!(
        proposed_interval(540, 0),
        Err(DomainError::InvalidDuration { minutes: 0 })
    );
}
