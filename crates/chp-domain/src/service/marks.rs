//! Indicator state for one checklist cell

use crate::model::checklist::is_item_active;
use crate::model::{InspectionRecord, MonthSlot};

/// What a (checklist item, month) cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMarks {
    /// Item does not apply to this vehicle's brake system: no marks, no fields
    Inactive,
    Active { passed: bool, deficient: bool },
}

impl CellMarks {
    pub fn is_active(self) -> bool {
        matches!(self, CellMarks::Active { .. })
    }
}

/// Resolve a cell's marks.
///
/// A sampled item counts as deficient exactly like a month-level deficient
/// flag. Deficient wins over passed, so a month flagged both ways (or passed
/// with a sampled item) shows only the deficient mark.
pub fn cell_marks(record: &InspectionRecord, item_index: usize, slot: MonthSlot) -> CellMarks {
    if !is_item_active(item_index, record.vehicle.has_air_brakes) {
        return CellMarks::Inactive;
    }
    let entry = record.month(slot);
    let deficient = entry.deficient || entry.is_sampled_deficient(item_index);
    CellMarks::Active {
        passed: entry.passed && !deficient,
        deficient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passed_month() {
        let mut record = InspectionRecord::default();
        record.toggle_passed(MonthSlot::Jan);
        assert_eq!(
            cell_marks(&record, 0, MonthSlot::Jan),
            CellMarks::Active { passed: true, deficient: false }
        );
        assert_eq!(
            cell_marks(&record, 0, MonthSlot::Feb),
            CellMarks::Active { passed: false, deficient: false }
        );
    }

    #[test]
    fn test_sampled_item_suppresses_passed() {
        let mut record = InspectionRecord::default();
        record.toggle_passed(MonthSlot::Apr);
        record.month_mut(MonthSlot::Apr).sampled_deficient_items.insert(7);
        assert_eq!(
            cell_marks(&record, 7, MonthSlot::Apr),
            CellMarks::Active { passed: false, deficient: true }
        );
        assert_eq!(
            cell_marks(&record, 8, MonthSlot::Apr),
            CellMarks::Active { passed: true, deficient: false }
        );
    }

    #[test]
    fn test_both_flags_set_renders_deficient_only() {
        let mut record = InspectionRecord::default();
        let entry = record.month_mut(MonthSlot::Jul);
        entry.passed = true;
        entry.deficient = true;
        assert_eq!(
            cell_marks(&record, 3, MonthSlot::Jul),
            CellMarks::Active { passed: false, deficient: true }
        );
    }

    #[test]
    fn test_inactive_items_ignore_month_state() {
        let mut record = InspectionRecord::default();
        record.vehicle.has_air_brakes = false;
        record.set_all_deficient();
        record.month_mut(MonthSlot::Jan).sampled_deficient_items.insert(22);
        for slot in MonthSlot::ALL {
            assert_eq!(cell_marks(&record, 22, slot), CellMarks::Inactive);
            assert_eq!(cell_marks(&record, 31, slot), CellMarks::Inactive);
        }

        record.vehicle.has_air_brakes = true;
        assert_eq!(cell_marks(&record, 19, MonthSlot::Jan), CellMarks::Inactive);
        assert!(cell_marks(&record, 22, MonthSlot::Jan).is_active());
    }
}
