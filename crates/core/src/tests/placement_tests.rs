// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_activity, create_test_appointment, ctx, date, init_tracing, iv};
use crate::{
    BoxPosition, CoreError, DayGrid, MonthGrid, WeekGrid, assign_lanes, group_by_date, place_day,
    place_month, place_week, position_in_window, week_start_for,
};
use carecal_domain::{
    BusySlot, BusySlotKind, DomainError, Interval, PlacementPolicy, ScheduledEvent, Timed,
};
use chrono::Weekday;

const EPSILON: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

fn slot(id: i64, start: u16, end: u16) -> BusySlot {
    BusySlot {
        interval: iv(start, end),
        kind: BusySlotKind::TeamAppointment,
        title: format!("Appointment #{id}"),
        event_id: id,
        scheduled_end: end,
        is_placeholder: false,
    }
}

/// 08:00-20:00
fn day_window() -> Interval {
    iv(480, 1200)
}

#[test]
fn test_event_inside_window() {
    // 10:00-11:00 in a 12 hour window
    let position: BoxPosition = position_in_window(&iv(600, 660), &day_window(), 5.0);
    assert_close(position.left, 120.0 / 720.0 * 100.0);
    assert_close(position.width, 60.0 / 720.0 * 100.0);
    assert!(!position.collapsed);
}

#[test]
fn test_event_before_window_collapses_to_left_edge() {
    let position: BoxPosition = position_in_window(&iv(420, 450), &day_window(), 5.0);
    assert_close(position.left, 0.0);
    assert_close(position.width, 5.0);
    assert!(position.collapsed);
}

#[test]
fn test_event_after_window_collapses_to_right_edge() {
    let position: BoxPosition = position_in_window(&iv(1260, 1320), &day_window(), 5.0);
    assert_close(position.left, 100.0);
    assert_close(position.width, 5.0);
    assert!(position.collapsed);
}

#[test]
fn test_event_straddling_window_end_is_clipped() {
    // 19:00-21:00 is half visible
    let position: BoxPosition = position_in_window(&iv(1140, 1260), &day_window(), 5.0);
    assert_close(position.left, 660.0 / 720.0 * 100.0);
    assert_close(position.width, 60.0 / 720.0 * 100.0);
    assert!(!position.collapsed);
}

#[test]
fn test_short_event_gets_minimum_width() {
    let position: BoxPosition = position_in_window(&iv(600, 605), &day_window(), 5.0);
    assert_close(position.width, 5.0);
}

#[test]
fn test_position_stays_within_bounds() {
    let window: Interval = day_window();
    for start in (0..1440).step_by(45) {
        for length in [1, 15, 90, 400] {
            let end: u16 = (start + length).min(1440);
            let position: BoxPosition = position_in_window(&iv(start, end), &window, 5.0);
            assert!((0.0..=100.0).contains(&position.left));
            assert!(position.width >= 5.0);
            assert!(position.width <= 100.0);
        }
    }
}

#[test]
fn test_left_is_monotone_in_start() {
    let window: Interval = day_window();
    let mut previous: f64 = 0.0;
    for start in (0..1380).step_by(15) {
        let position: BoxPosition = position_in_window(&iv(start, start + 30), &window, 5.0);
        assert!(position.left >= previous);
        previous = position.left;
    }
}

#[test]
fn test_lanes_first_fit() {
    let lanes: Vec<usize> = assign_lanes(&[
        iv(540, 600),
        iv(570, 630),
        iv(600, 660),
        iv(580, 590),
        iv(700, 720),
    ]);
    // 09:00 lane 0, 09:30 lane 1, 09:40 lane 2, 10:00 reuses lane 0, 11:40 lane 0
    assert_eq!(lanes, vec![0, 1, 0, 2, 0]);
}

#[test]
fn test_lanes_keep_input_order_on_equal_starts() {
    let lanes: Vec<usize> = assign_lanes(&[iv(540, 600), iv(540, 570), iv(540, 660)]);
    assert_eq!(lanes, vec![0, 1, 2]);
}

#[test]
fn test_place_day_assigns_lanes_and_counts() {
    init_tracing();
    let slots: Vec<BusySlot> = vec![slot(1, 540, 600), slot(2, 570, 630), slot(3, 660, 720)];
    let grid: DayGrid = place_day(&slots, &PlacementPolicy::default()).unwrap();

    assert_eq!(grid.window, day_window());
    assert_eq!(grid.lane_count, 2);
    let lanes: Vec<usize> = grid.placements.iter().map(|p| p.lane).collect();
    assert_eq!(lanes, vec![0, 1, 0]);
}

#[test]
fn test_place_day_without_stacking() {
    let policy: PlacementPolicy = PlacementPolicy {
        stack_lanes: false,
        ..PlacementPolicy::default()
    };
    let slots: Vec<BusySlot> = vec![slot(1, 540, 600), slot(2, 570, 630)];
    let grid: DayGrid = place_day(&slots, &policy).unwrap();

    assert_eq!(grid.lane_count, 1);
    assert!(grid.placements.iter().all(|p| p.lane == 0));
}

#[test]
fn test_place_day_out_of_window_collapses_by_default() {
    let slots: Vec<BusySlot> = vec![slot(1, 420, 450), slot(2, 600, 660)];
    let grid: DayGrid = place_day(&slots, &PlacementPolicy::default()).unwrap();

    assert_eq!(grid.placements.len(), 2);
    assert!(grid.placements[0].collapsed);
    assert_close(grid.placements[0].left, 0.0);
    assert_close(grid.placements[0].width, 5.0);
}

#[test]
fn test_place_day_can_hide_out_of_window() {
    let policy: PlacementPolicy = PlacementPolicy {
        hide_out_of_window: true,
        ..PlacementPolicy::default()
    };
    let slots: Vec<BusySlot> = vec![slot(1, 420, 450), slot(2, 600, 660)];
    let grid: DayGrid = place_day(&slots, &policy).unwrap();

    assert_eq!(grid.placements.len(), 1);
    assert_eq!(grid.placements[0].slot.event_id, 2);
}

#[test]
fn test_hidden_slots_do_not_hold_lanes() {
    let policy: PlacementPolicy = PlacementPolicy {
        hide_out_of_window: true,
        ..PlacementPolicy::default()
    };
    // 07:00-07:50 is hidden; 07:30-09:00 overlaps it but reaches the window
    let slots: Vec<BusySlot> = vec![slot(1, 420, 470), slot(2, 450, 540)];
    let grid: DayGrid = place_day(&slots, &policy).unwrap();

    assert_eq!(grid.placements.len(), 1);
    assert_eq!(grid.placements[0].slot.event_id, 2);
    assert_eq!(grid.placements[0].lane, 0);
    assert_eq!(grid.lane_count, 1);

    // Collapsed slots still stack when shown
    let grid: DayGrid = place_day(&slots, &PlacementPolicy::default()).unwrap();
    let lanes: Vec<usize> = grid.placements.iter().map(|p| p.lane).collect();
    assert_eq!(lanes, vec![0, 1]);
}

#[test]
fn test_place_day_rejects_bad_window() {
    let policy: PlacementPolicy = PlacementPolicy {
        first_hour: 18,
        last_hour: 9,
        ..PlacementPolicy::default()
    };
    let result: Result<DayGrid, CoreError> = place_day(&[], &policy);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidConfiguration { .. }
        ))
    ));
}

#[test]
fn test_place_day_with_no_slots() {
    let grid: DayGrid = place_day(&[], &PlacementPolicy::default()).unwrap();
    assert_eq!(grid.lane_count, 0);
    assert!(grid.placements.is_empty());
}

fn sample_events() -> Vec<ScheduledEvent> {
    vec![
        ScheduledEvent::Appointment(create_test_appointment(
            1,
            5,
            9,
            "2024-01-10 14:00:00",
            Some("2024-01-10 15:00:00"),
        )),
        ScheduledEvent::Activity(create_test_activity(
            2,
            5,
            "Staff meeting",
            "2024-01-10 09:00:00",
            "2024-01-10 10:00:00",
        )),
        ScheduledEvent::Appointment(create_test_appointment(
            3,
            5,
            9,
            "2024-01-13 08:00:00",
            Some("2024-01-13 09:00:00"),
        )),
        ScheduledEvent::Appointment(create_test_appointment(
            4,
            5,
            9,
            "garbage",
            None,
        )),
    ]
}

#[test]
fn test_group_by_date_orders_and_skips() {
    let buckets = group_by_date(&sample_events(), &ctx());

    assert_eq!(buckets.len(), 2);
    let wednesday: Vec<i64> = buckets[&date(2024, 1, 10)].iter().map(Timed::id).collect();
    assert_eq!(wednesday, vec![2, 1]);
    let saturday: Vec<i64> = buckets[&date(2024, 1, 13)].iter().map(Timed::id).collect();
    assert_eq!(saturday, vec![3]);
}

#[test]
fn test_week_start_for() {
    // Wednesday
    assert_eq!(week_start_for(date(2024, 1, 10), Weekday::Sun), date(2024, 1, 7));
    assert_eq!(week_start_for(date(2024, 1, 10), Weekday::Mon), date(2024, 1, 8));
    // A Sunday starts its own week
    assert_eq!(week_start_for(date(2024, 1, 7), Weekday::Sun), date(2024, 1, 7));
    assert_eq!(week_start_for(date(2024, 1, 7), Weekday::Mon), date(2024, 1, 1));
}

#[test]
fn test_place_week() {
    let grid: WeekGrid = place_week(
        &sample_events(),
        date(2024, 1, 10),
        &PlacementPolicy::default(),
        &ctx(),
    );

    assert_eq!(grid.start, date(2024, 1, 7));
    assert_eq!(grid.days.len(), 7);
    assert_eq!(grid.days[0].date, date(2024, 1, 7));
    assert_eq!(grid.days[6].date, date(2024, 1, 13));

    let counts: Vec<usize> = grid.days.iter().map(|d| d.events.len()).collect();
    assert_eq!(counts, vec![0, 0, 0, 2, 0, 0, 1]);
    assert_eq!(grid.days[3].column, 3);
}

#[test]
fn test_place_month_january_2024() {
    let grid: MonthGrid = place_month(
        &sample_events(),
        2024,
        1,
        &PlacementPolicy::default(),
        &ctx(),
    )
    .unwrap();

    // 2024-01-01 is a Monday, 2024-01-31 a Wednesday
    assert_eq!(grid.rows, 5);
    assert_eq!(grid.cells.len(), 35);
    assert_eq!(grid.cells[0].date, date(2023, 12, 31));
    assert!(!grid.cells[0].in_month);
    assert_eq!(grid.cells[34].date, date(2024, 2, 3));
    assert!(!grid.cells[34].in_month);

    let tenth = grid
        .cells
        .iter()
        .find(|c| c.date == date(2024, 1, 10))
        .unwrap();
    assert_eq!((tenth.row, tenth.column), (1, 3));
    assert_eq!(tenth.events.len(), 2);
    assert!(tenth.in_month);
}

#[test]
fn test_place_month_february_monday_start() {
    let policy: PlacementPolicy = PlacementPolicy {
        week_start: Weekday::Mon,
        ..PlacementPolicy::default()
    };
    let grid: MonthGrid = place_month(&[], 2024, 2, &policy, &ctx()).unwrap();

    // 2024-02-01 is a Thursday, 2024-02-29 a Thursday
    assert_eq!(grid.rows, 5);
    assert_eq!(grid.cells[0].date, date(2024, 1, 29));
    assert_eq!(grid.cells.iter().filter(|c| c.in_month).count(), 29);
}

#[test]
fn test_place_month_december_rolls_over() {
    let grid: MonthGrid = place_month(&[], 2024, 12, &PlacementPolicy::default(), &ctx()).unwrap();
    assert_eq!(grid.cells.iter().filter(|c| c.in_month).count(), 31);
    assert_eq!(grid.cells.last().unwrap().date, date(2025, 1, 4));
}

#[test]
fn test_place_month_rejects_invalid_month() {
    let result: Result<MonthGrid, CoreError> =
        place_month(&[], 2024, 13, &PlacementPolicy::default(), &ctx());
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::ParseError {
            kind: "month",
            ..
        }))
    ));
}
