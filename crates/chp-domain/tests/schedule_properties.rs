//! Schedule projection properties checked over three years of anchors

use chrono::{Datelike, Days, NaiveDate};
use chp_domain::model::MonthSlot;
use chp_domain::service::schedule::{projected_dates, rebucket};
use chp_domain::service::{month_slot_of, project_schedule};

fn anchors() -> impl Iterator<Item = NaiveDate> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..(365 * 3)).map(move |offset| start.checked_add_days(Days::new(offset)).unwrap())
}

#[test]
fn every_anchor_fills_all_twelve_slots() {
    for anchor in anchors() {
        let iso = anchor.format("%Y-%m-%d").to_string();
        let schedule = project_schedule(&iso);

        let mut dates: Vec<NaiveDate> = schedule.values().map(|d| d.unwrap()).collect();
        dates.sort();
        assert_eq!(dates, projected_dates(anchor), "anchor {}", iso);
    }
}

#[test]
fn anchor_keeps_its_calendar_slot() {
    for anchor in anchors() {
        let iso = anchor.format("%Y-%m-%d").to_string();
        let schedule = project_schedule(&iso);
        assert_eq!(schedule[month_slot_of(&iso)], Some(anchor), "anchor {}", iso);
    }
}

#[test]
fn collided_date_moves_to_nearest_free_slot() {
    // offsets 0 and 8 are 360 days apart and share a calendar month
    let anchor = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let dates = projected_dates(anchor);
    assert_eq!(dates[0].month(), dates[8].month());

    let schedule = rebucket(&dates);
    assert_eq!(schedule[MonthSlot::Jan], Some(dates[0]));
    assert_eq!(schedule[MonthSlot::Feb], Some(dates[8]));
}

#[test]
fn rebucket_terminates_for_any_subset() {
    // a dozen dates all in December still wrap into every slot
    let dates: Vec<NaiveDate> = (1..=12)
        .map(|day| NaiveDate::from_ymd_opt(2030, 12, day).unwrap())
        .collect();
    let schedule = rebucket(&dates);
    assert!(schedule.values().all(|d| d.is_some()));
    assert_eq!(schedule[MonthSlot::Dec], Some(dates[0]));
    assert_eq!(schedule[MonthSlot::Jan], Some(dates[1]));
    assert_eq!(schedule[MonthSlot::Nov], Some(dates[11]));
}
