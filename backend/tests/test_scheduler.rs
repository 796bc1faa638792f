//! Integration tests for EventScheduler operations

use event_manager_core::{Date, DateError, EventScheduler, SchedulerConfig, SchedulerError};

fn date(day: u8, month: u8, year: i32) -> Date {
    Date::new(day, month, year).unwrap()
}

fn scheduler() -> EventScheduler {
    EventScheduler::starting_at(date(1, 1, 2024))
}

#[test]
fn test_new_scheduler_is_empty() {
    let scheduler = scheduler();
    assert_eq!(scheduler.current_date(), date(1, 1, 2024));
    assert_eq!(scheduler.events_count(), 0);
    assert_eq!(scheduler.members_count(), 0);
    assert_eq!(scheduler.next_event(), None);
}

#[test]
fn test_config_from_json() {
    let config = SchedulerConfig::from_json(
        r#"{ "start_date": { "day": 3, "month": 4, "year": 2025 }, "record_activity": false }"#,
    )
    .unwrap();
    assert_eq!(config.start_date, date(3, 4, 2025));
    assert!(!config.record_activity);

    let scheduler = EventScheduler::new(config);
    assert_eq!(scheduler.current_date(), date(3, 4, 2025));
}

#[test]
fn test_config_rejects_bad_json() {
    let missing = SchedulerConfig::from_json("{}");
    assert!(matches!(missing, Err(SchedulerError::InvalidConfig(_))));

    let bad_date = SchedulerConfig::from_json(
        r#"{ "start_date": { "day": 31, "month": 1, "year": 2024 } }"#,
    );
    assert!(matches!(bad_date, Err(SchedulerError::InvalidConfig(_))));
}

#[test]
fn test_add_event_rules() {
    let mut scheduler = scheduler();
    scheduler
        .add_event_by_date("Talk", date(5, 1, 2024), 1)
        .unwrap();

    // Same date as today is allowed
    scheduler
        .add_event_by_date("Today", date(1, 1, 2024), 2)
        .unwrap();

    assert_eq!(
        scheduler.add_event_by_date("Talk", date(5, 1, 2024), 3),
        Err(SchedulerError::EventAlreadyExists {
            name: "Talk".to_string(),
            date: date(5, 1, 2024),
        })
    );
    assert_eq!(
        scheduler.add_event_by_date("Other", date(5, 1, 2024), 1),
        Err(SchedulerError::EventIdAlreadyExists(1))
    );
    assert_eq!(
        scheduler.add_event_by_date("Other", date(5, 1, 2024), -2),
        Err(SchedulerError::InvalidEventId(-2))
    );

    // Same name on another date is a different event
    scheduler
        .add_event_by_date("Talk", date(6, 1, 2024), 4)
        .unwrap();

    assert_eq!(scheduler.events_count(), 3);
    assert_eq!(scheduler.next_event(), Some("Today"));
}

#[test]
fn test_add_event_by_offset() {
    let mut scheduler = EventScheduler::starting_at(date(28, 12, 2024));
    scheduler.add_event_by_offset("New Year", 3, 1).unwrap();
    assert_eq!(scheduler.event(1).map(|e| e.date()), Some(date(1, 1, 2025)));

    scheduler.add_event_by_offset("Now", 0, 2).unwrap();
    assert_eq!(scheduler.next_event(), Some("Now"));
}

#[test]
fn test_events_ordered_by_date_then_fifo() {
    let mut scheduler = scheduler();
    scheduler.add_event_by_date("C", date(9, 1, 2024), 3).unwrap();
    scheduler.add_event_by_date("A", date(2, 1, 2024), 1).unwrap();
    scheduler.add_event_by_date("B1", date(9, 1, 2024), 2).unwrap();
    scheduler.add_event_by_date("B2", date(2, 1, 2024), 4).unwrap();

    let names: Vec<_> = scheduler.events().map(|e| e.name().to_string()).collect();
    assert_eq!(names, vec!["A", "B2", "C", "B1"]);
}

#[test]
fn test_remove_event() {
    let mut scheduler = scheduler();
    scheduler.add_event_by_date("Talk", date(5, 1, 2024), 1).unwrap();

    assert_eq!(
        scheduler.remove_event(2),
        Err(SchedulerError::EventIdNotFound(2))
    );
    assert_eq!(
        scheduler.remove_event(-1),
        Err(SchedulerError::InvalidEventId(-1))
    );

    scheduler.remove_event(1).unwrap();
    assert_eq!(scheduler.events_count(), 0);
    assert_eq!(
        scheduler.remove_event(1),
        Err(SchedulerError::EventIdNotFound(1))
    );
}

#[test]
fn test_change_event_date_reorders() {
    let mut scheduler = scheduler();
    scheduler.add_event_by_date("Talk", date(5, 1, 2024), 1).unwrap();
    scheduler.add_event_by_date("Demo", date(7, 1, 2024), 2).unwrap();
    scheduler.add_member("Ann", 7).unwrap();
    scheduler.link_member_to_event(7, 1).unwrap();

    scheduler.change_event_date(1, date(9, 1, 2024)).unwrap();

    assert_eq!(scheduler.next_event(), Some("Demo"));
    let talk = scheduler.event(1).unwrap();
    assert_eq!(talk.date(), date(9, 1, 2024));
    assert!(talk.is_linked(7));
    assert_eq!(scheduler.events_count(), 2);
}

#[test]
fn test_change_event_date_rules() {
    let mut scheduler = EventScheduler::starting_at(date(3, 1, 2024));
    scheduler.add_event_by_date("Talk", date(5, 1, 2024), 1).unwrap();
    scheduler.add_event_by_date("Talk", date(8, 1, 2024), 2).unwrap();

    assert_eq!(
        scheduler.change_event_date(1, date(2, 1, 2024)),
        Err(SchedulerError::InvalidDate {
            date: date(2, 1, 2024),
            current: date(3, 1, 2024),
        })
    );
    assert_eq!(
        scheduler.change_event_date(9, date(9, 1, 2024)),
        Err(SchedulerError::EventIdNotFound(9))
    );
    assert_eq!(
        scheduler.change_event_date(1, date(8, 1, 2024)),
        Err(SchedulerError::EventAlreadyExists {
            name: "Talk".to_string(),
            date: date(8, 1, 2024),
        })
    );

    // Moving onto its own date is a no-op
    scheduler.change_event_date(1, date(5, 1, 2024)).unwrap();
    assert_eq!(scheduler.activity_log().of_type("EventRescheduled").len(), 0);
}

#[test]
fn test_add_member_rules() {
    let mut scheduler = scheduler();
    scheduler.add_member("Ann", 1).unwrap();

    assert_eq!(
        scheduler.add_member("Bob", 1),
        Err(SchedulerError::MemberIdAlreadyExists(1))
    );
    assert_eq!(
        scheduler.add_member("Bob", -4),
        Err(SchedulerError::InvalidMemberId(-4))
    );
    assert_eq!(scheduler.members_count(), 1);
    assert_eq!(scheduler.participation(1), Some(0));
    assert_eq!(scheduler.member(1).map(|m| m.name()), Some("Ann"));
}

#[test]
fn test_link_and_unlink() {
    let mut scheduler = scheduler();
    scheduler.add_event_by_date("Talk", date(5, 1, 2024), 1).unwrap();
    scheduler.add_event_by_date("Demo", date(6, 1, 2024), 2).unwrap();
    scheduler.add_member("Ann", 1).unwrap();
    scheduler.add_member("Bob", 2).unwrap();

    scheduler.link_member_to_event(1, 1).unwrap();
    scheduler.link_member_to_event(1, 2).unwrap();
    scheduler.link_member_to_event(2, 1).unwrap();

    assert_eq!(scheduler.participation(1), Some(2));
    assert_eq!(scheduler.participation(2), Some(1));
    let order: Vec<_> = scheduler.members().map(|(m, _)| m.id()).collect();
    assert_eq!(order, vec![1, 2]);

    scheduler.unlink_member_from_event(1, 1).unwrap();
    scheduler.unlink_member_from_event(1, 2).unwrap();
    assert_eq!(scheduler.participation(1), Some(0));
    assert_eq!(
        scheduler.unlink_member_from_event(1, 2),
        Err(SchedulerError::NotLinked {
            member_id: 1,
            event_id: 2
        })
    );

    let order: Vec<_> = scheduler.members().map(|(m, _)| m.id()).collect();
    assert_eq!(order, vec![2, 1]);
}

#[test]
fn test_advance_time_rejects_zero_days() {
    let mut scheduler = scheduler();
    assert_eq!(
        scheduler.advance_time(0),
        Err(SchedulerError::InvalidDayCount)
    );
    assert_eq!(scheduler.current_date(), date(1, 1, 2024));
}

#[test]
fn test_time_cannot_pass_the_last_year() {
    let last = date(30, 12, i32::MAX);
    let mut scheduler = EventScheduler::starting_at(last);
    scheduler.add_event_by_date("Finale", last, 1).unwrap();

    assert_eq!(
        scheduler.add_event_by_offset("Beyond", 1, 2),
        Err(SchedulerError::DateOutOfRange(DateError::YearOverflow {
            from: last,
            days: 1
        }))
    );
    assert_eq!(
        scheduler.advance_time(3),
        Err(SchedulerError::DateOutOfRange(DateError::YearOverflow {
            from: last,
            days: 3
        }))
    );

    assert_eq!(scheduler.current_date(), last);
    assert_eq!(scheduler.events_count(), 1);
    assert_eq!(scheduler.activity_log().of_type("TimeAdvanced").len(), 0);
}

#[test]
fn test_unlink_checks_event_id_first() {
    let mut scheduler = scheduler();
    assert_eq!(
        scheduler.unlink_member_from_event(-1, -2),
        Err(SchedulerError::InvalidEventId(-2))
    );
    assert_eq!(
        scheduler.link_member_to_event(-1, -2),
        Err(SchedulerError::InvalidMemberId(-1))
    );
}

#[test]
fn test_event_on_current_date_survives() {
    let mut scheduler = scheduler();
    scheduler.add_event_by_date("Talk", date(5, 1, 2024), 1).unwrap();

    let result = scheduler.advance_time(4).unwrap();
    assert_eq!(result.date, date(5, 1, 2024));
    assert!(result.expired.is_empty());
    assert_eq!(scheduler.events_count(), 1);

    let result = scheduler.advance_time(1).unwrap();
    assert_eq!(result.expired, vec![1]);
}

#[test]
fn test_activity_log_tracks_changes() {
    let mut scheduler = scheduler();
    scheduler.add_event_by_date("Talk", date(5, 1, 2024), 1).unwrap();
    scheduler.add_member("Ann", 7).unwrap();
    scheduler.link_member_to_event(7, 1).unwrap();
    scheduler.advance_time(10).unwrap();

    let log = scheduler.activity_log();
    let types: Vec<_> = log.activities().iter().map(|a| a.activity_type()).collect();
    assert_eq!(
        types,
        vec![
            "EventScheduled",
            "MemberEnrolled",
            "MemberLinked",
            "TimeAdvanced",
            "EventRemoved"
        ]
    );
    assert_eq!(log.for_event(1).len(), 3);
    assert_eq!(log.for_member(7).len(), 3);
    assert_eq!(log.on_date(date(11, 1, 2024)).len(), 2);
}
