//! Calendar checks against chrono as an independent reference

use chrono::{Datelike, NaiveDate, Timelike};
use wrist_faces::DateTime;

fn from_chrono(date: NaiveDate, hour: u32, minute: u32, second: u32) -> DateTime {
    DateTime::new(
        date.year() as u16,
        date.month() as u8,
        date.day() as u8,
        hour as u8,
        minute as u8,
        second as u8,
    )
}

#[test]
fn weekday_matches_reference_for_eight_years() {
    let mut date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2028, 1, 1).unwrap();

    while date < end {
        let ours = from_chrono(date, 0, 0, 0).weekday();
        let reference = date.weekday().num_days_from_monday() as u8;
        assert_eq!(ours, reference, "weekday mismatch on {date}");
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn weekday_across_century_boundaries() {
    for (y, m, d) in [(1900, 2, 28), (1900, 3, 1), (2000, 2, 29), (2100, 2, 28), (2100, 3, 1)] {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(
            from_chrono(date, 0, 0, 0).weekday(),
            date.weekday().num_days_from_monday() as u8,
            "weekday mismatch on {date}"
        );
    }
}

#[test]
fn unix_timestamps_match_reference() {
    let mut date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

    while date < end {
        let reference = date.and_hms_opt(17, 42, 9).unwrap().and_utc();
        let ours = from_chrono(date, 17, 42, 9);

        assert_eq!(ours.to_unix(0) as i64, reference.timestamp(), "on {date}");

        let back = DateTime::from_unix(reference.timestamp() as u32, 0);
        assert_eq!(back, ours);
        assert_eq!(back.second as u32, reference.second());
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn from_unix_with_offset_round_trips_local_time() {
    let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    for offset in [-720, -300, 0, 330, 840] {
        let local = from_chrono(date, 23, 15, 0);
        let ts = local.to_unix(offset);
        assert_eq!(DateTime::from_unix(ts, offset), local, "offset {offset}");
    }
}
