//! Inspection date projection
//!
//! A single anchor date is expanded into 12 inspections spaced 45 calendar
//! days apart. Each projected date is filed under the slot of the month it
//! actually falls in; when that slot is taken the date moves to the next free
//! slot, wrapping from DEC to JAN.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::model::{MonthSlot, MonthTable};

/// Calendar days between consecutive inspections
pub const INSPECTION_INTERVAL_DAYS: u64 = 45;

const ISO_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%m/%d/%y";
const DOCUMENT_FORMAT: &str = "%m/%d/%Y";

/// Parse an ISO calendar date. Also accepts a full ISO timestamp and keeps
/// its date part. Empty or malformed input yields `None`.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, ISO_FORMAT) {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// The 12 projected dates in cadence order, before re-bucketing
pub fn projected_dates(anchor: NaiveDate) -> Vec<NaiveDate> {
    std::iter::successors(Some(anchor), |date| {
        date.checked_add_days(Days::new(INSPECTION_INTERVAL_DAYS))
    })
    .take(MonthSlot::ALL.len())
    .collect()
}

/// File dates into month slots by calendar month, scanning forward on
/// collision. Dates beyond the 12th are ignored.
pub fn rebucket(dates: &[NaiveDate]) -> MonthTable<Option<NaiveDate>> {
    let mut table: MonthTable<Option<NaiveDate>> = MonthTable::default();
    for &date in dates.iter().take(MonthSlot::ALL.len()) {
        let mut slot = slot_for_month(date);
        // at most 11 slots are taken here, so the scan always finds one
        while table[slot].is_some() {
            slot = slot.next_wrapping();
        }
        table[slot] = Some(date);
    }
    table
}

/// Project the full schedule from an ISO anchor date.
///
/// Empty or unparseable input leaves every slot empty.
pub fn project_schedule(anchor: &str) -> MonthTable<Option<NaiveDate>> {
    match parse_iso_date(anchor) {
        Some(anchor) => rebucket(&projected_dates(anchor)),
        None => MonthTable::default(),
    }
}

/// `MM/DD/YY`, or empty for invalid input
pub fn format_for_display(date: &str) -> String {
    parse_iso_date(date)
        .map(|d| d.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

/// `MM/DD/YYYY`, or empty for invalid input
pub fn format_for_document(date: &str) -> String {
    parse_iso_date(date)
        .map(|d| d.format(DOCUMENT_FORMAT).to_string())
        .unwrap_or_default()
}

/// Slot matching the date's calendar month; JAN when the date is empty or
/// unparseable.
pub fn month_slot_of(date: &str) -> MonthSlot {
    parse_iso_date(date)
        .map(slot_for_month)
        .unwrap_or(MonthSlot::Jan)
}

/// Month shown for an entry: the calendar month of its date when it has
/// one, otherwise the slot itself.
pub fn displayed_slot(date: &str, slot: MonthSlot) -> MonthSlot {
    parse_iso_date(date).map(slot_for_month).unwrap_or(slot)
}

fn slot_for_month(date: NaiveDate) -> MonthSlot {
    MonthSlot::from_index(date.month0() as usize).unwrap_or(MonthSlot::Jan)
}

/// The inspection following a given slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextInspection {
    pub slot: MonthSlot,
    pub date: NaiveDate,
    /// Negative when the date has already passed
    pub days_until: i64,
}

/// Next slot's date relative to `today`. `None` after DEC or when the next
/// slot has no date.
pub fn next_inspection_info(
    current: MonthSlot,
    schedule: &MonthTable<Option<NaiveDate>>,
    today: NaiveDate,
) -> Option<NextInspection> {
    let slot = current.next()?;
    let date = schedule[slot]?;
    Some(NextInspection {
        slot,
        date,
        days_until: (date - today).num_days(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_projected_cadence() {
        let dates = projected_dates(ymd(2025, 1, 15));
        assert_eq!(dates.len(), 12);
        assert_eq!(dates[1], ymd(2025, 3, 1));
        assert_eq!(dates[2], ymd(2025, 4, 15));
        assert_eq!(dates[3], ymd(2025, 5, 30));
        for pair in dates.windows(2) {
            assert_eq!((pair[1] - pair[0]).num_days(), 45);
        }
        assert_eq!((dates[11] - dates[0]).num_days(), 495);
    }

    #[test]
    fn test_project_schedule_rebuckets_collisions() {
        let schedule = project_schedule("2025-01-15");
        let expected = [
            ymd(2025, 1, 15),
            ymd(2026, 1, 10),
            ymd(2025, 3, 1),
            ymd(2025, 4, 15),
            ymd(2025, 5, 30),
            ymd(2026, 2, 24),
            ymd(2025, 7, 14),
            ymd(2025, 8, 28),
            ymd(2026, 4, 10),
            ymd(2025, 10, 12),
            ymd(2025, 11, 26),
            ymd(2026, 5, 25),
        ];
        for (slot, date) in schedule.iter() {
            assert_eq!(*date, Some(expected[slot.index()]), "slot {}", slot);
        }
    }

    #[test]
    fn test_anchor_lands_in_its_own_month() {
        for month in 1..=12 {
            let anchor = ymd(2024, month, 20);
            let schedule = project_schedule(&anchor.format("%Y-%m-%d").to_string());
            let slot = MonthSlot::from_index(month as usize - 1).unwrap();
            assert_eq!(schedule[slot], Some(anchor));
        }
    }

    #[test]
    fn test_empty_or_invalid_anchor() {
        for anchor in ["", "   ", "not-a-date", "2025-02-30"] {
            let schedule = project_schedule(anchor);
            assert!(schedule.values().all(|d| d.is_none()), "anchor {:?}", anchor);
        }
    }

    #[test]
    fn test_rebucket_all_same_month_fills_forward() {
        // adversarial: every date in March
        let dates: Vec<NaiveDate> = (1..=12).map(|d| ymd(2025, 3, d)).collect();
        let table = rebucket(&dates);
        assert_eq!(table[MonthSlot::Mar], Some(ymd(2025, 3, 1)));
        assert_eq!(table[MonthSlot::Dec], Some(ymd(2025, 3, 10)));
        assert_eq!(table[MonthSlot::Jan], Some(ymd(2025, 3, 11)));
        assert_eq!(table[MonthSlot::Feb], Some(ymd(2025, 3, 12)));
        assert!(table.values().all(|d| d.is_some()));
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_for_display("2025-03-01"), "03/01/25");
        assert_eq!(format_for_document("2025-03-01"), "03/01/2025");
        assert_eq!(format_for_document("2025-03-01T08:30:00"), "03/01/2025");
        assert_eq!(format_for_display(""), "");
        assert_eq!(format_for_document("garbage"), "");
    }

    #[test]
    fn test_document_format_is_stable() {
        let once = format_for_document("2025-11-26");
        let reparsed = NaiveDate::parse_from_str(&once, DOCUMENT_FORMAT).unwrap();
        let twice = format_for_document(&reparsed.format("%Y-%m-%d").to_string());
        assert_eq!(once, twice);
        assert_eq!(format_for_document("2025-11-26"), once);
    }

    #[test]
    fn test_month_slot_of() {
        assert_eq!(month_slot_of("2025-08-28"), MonthSlot::Aug);
        assert_eq!(month_slot_of(""), MonthSlot::Jan);
        assert_eq!(month_slot_of("08/28/2025"), MonthSlot::Jan);
    }

    #[test]
    fn test_displayed_slot_falls_back_to_slot() {
        assert_eq!(displayed_slot("2026-01-10", MonthSlot::Feb), MonthSlot::Jan);
        assert_eq!(displayed_slot("", MonthSlot::Feb), MonthSlot::Feb);
    }

    #[test]
    fn test_next_inspection_info() {
        let schedule = project_schedule("2025-01-15");
        let info = next_inspection_info(MonthSlot::Jan, &schedule, ymd(2025, 12, 31)).unwrap();
        assert_eq!(info.slot, MonthSlot::Feb);
        assert_eq!(info.date, ymd(2026, 1, 10));
        assert_eq!(info.days_until, 10);

        assert!(next_inspection_info(MonthSlot::Dec, &schedule, ymd(2025, 1, 1)).is_none());
        let empty = project_schedule("");
        assert!(next_inspection_info(MonthSlot::Jan, &empty, ymd(2025, 1, 1)).is_none());
    }
}
