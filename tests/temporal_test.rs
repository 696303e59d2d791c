mod common;

use common::*;
use std::cmp::Ordering;
use tz_calendar::domain::error::CalendarError;
use tz_calendar::domain::time::{TimeInput, Zone, compare_instants, format_for_zone, to_instant};

#[test]
fn local_reading_converts_to_absolute_instant() {
    let instant = to_instant("2025-01-15", "09:00", "America/New_York").unwrap();
    assert_eq!(instant, at("2025-01-15T14:00:00Z"));
}

#[test]
fn seconds_are_optional() {
    let a = to_instant("2025-01-15", "09:00", "Europe/Berlin").unwrap();
    let b = to_instant("2025-01-15", "09:00:00", "Europe/Berlin").unwrap();
    assert_eq!(a, b);
    assert_eq!(a, at("2025-01-15T08:00:00Z"));
}

#[test]
fn summer_time_uses_summer_offset() {
    let instant = to_instant("2025-07-01", "09:00", "America/New_York").unwrap();
    assert_eq!(instant, at("2025-07-01T13:00:00Z"));
}

#[test]
fn unknown_zone_is_rejected() {
    let err = to_instant("2025-01-15", "09:00", "Mars/Olympus_Mons").unwrap_err();
    assert!(matches!(err, CalendarError::InvalidTimezone(ref z) if z == "Mars/Olympus_Mons"));
    assert_eq!(err.kind(), "invalid_timezone");
}

#[test]
fn malformed_date_and_time_are_rejected() {
    for (date, time) in [
        ("2025-02-30", "09:00"),
        ("15/01/2025", "09:00"),
        ("2025-01-15", "25:00"),
        ("2025-01-15", "nine"),
        ("", ""),
    ] {
        let err = to_instant(date, time, "UTC").unwrap_err();
        assert!(
            matches!(err, CalendarError::InvalidDateTime(_)),
            "{date} {time} gave {err:?}"
        );
    }
}

#[test]
fn reading_inside_dst_gap_is_rejected() {
    // 02:30 never happens on the spring-forward day.
    let err = to_instant("2025-03-09", "02:30", "America/New_York").unwrap_err();
    assert!(matches!(err, CalendarError::InvalidDateTime(_)));
}

#[test]
fn ambiguous_reading_resolves_to_earlier_instant() {
    // 01:30 happens twice on the fall-back day; the first is EDT (-04:00).
    let instant = to_instant("2025-11-02", "01:30", "America/New_York").unwrap();
    assert_eq!(instant, at("2025-11-02T05:30:00Z"));
}

#[test]
fn comparison_ignores_authoring_zone() {
    let tokyo = to_instant("2025-01-16", "08:00", "Asia/Tokyo").unwrap();
    let new_york = to_instant("2025-01-15", "18:00", "America/New_York").unwrap();
    let utc = to_instant("2025-01-15", "23:00", "UTC").unwrap();

    assert_eq!(compare_instants(&tokyo, &new_york), Ordering::Equal);
    assert_eq!(compare_instants(&tokyo, &utc), Ordering::Equal);

    let later = to_instant("2025-01-15", "18:01", "America/New_York").unwrap();
    assert_eq!(compare_instants(&tokyo, &later), Ordering::Less);
    assert_eq!(compare_instants(&later, &tokyo), Ordering::Greater);
}

#[test]
fn format_projects_into_zone() {
    let instant = at("2025-01-15T14:00:00Z");
    assert_eq!(
        format_for_zone(&instant, &zone("America/New_York")),
        "2025-01-15 09:00 EST"
    );
    assert_eq!(format_for_zone(&instant, &Zone::UTC), "2025-01-15 14:00 UTC");
}

#[test]
fn zone_round_trips_through_serde_as_name() {
    let z = zone("Asia/Kolkata");
    let json = serde_json::to_string(&z).unwrap();
    assert_eq!(json, "\"Asia/Kolkata\"");
    let back: Zone = serde_json::from_str(&json).unwrap();
    assert_eq!(back, z);
    assert!(serde_json::from_str::<Zone>("\"Nowhere/Special\"").is_err());
}

#[test]
fn time_input_accepts_either_shape() {
    let local: TimeInput =
        serde_json::from_value(serde_json::json!({"date": "2025-01-15", "time": "09:00"}))
            .unwrap();
    let absolute: TimeInput =
        serde_json::from_value(serde_json::json!("2025-01-15T09:00:00-05:00")).unwrap();

    let ny = zone("America/New_York");
    assert_eq!(local.resolve(&ny).unwrap(), absolute.resolve(&ny).unwrap());
    // An absolute time ignores the zone it is resolved against.
    assert_eq!(
        absolute.resolve(&Zone::UTC).unwrap(),
        at("2025-01-15T14:00:00Z")
    );
}
