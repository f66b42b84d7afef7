//! Deficiency collection for the repair appendix

use std::collections::HashSet;

use crate::model::{ChecklistItem, DeficiencyRecord, InspectionRecord};

/// Every checklist item reported deficient in any month, each listed once.
///
/// Months are walked in column order. A deficient month contributes all 40
/// items, then each month's sampled items are added. An item already listed
/// by an earlier month (or earlier in the same month) is skipped, so the
/// first report wins and the result is ordered by month, then item.
pub fn collect_deficiencies(record: &InspectionRecord) -> Vec<DeficiencyRecord> {
    let mut seen = HashSet::new();
    let mut deficiencies = Vec::new();

    for (slot, entry) in record.months.iter() {
        let month_items = ChecklistItem::all().filter(|_| entry.deficient);
        let sampled_items = entry
            .sampled_deficient_items
            .iter()
            .filter_map(|&index| ChecklistItem::get(index));

        for item in month_items.chain(sampled_items) {
            if seen.insert(item.index) {
                deficiencies.push(DeficiencyRecord::new(
                    item,
                    slot,
                    &entry.inspection_date,
                    &entry.odometer_reading,
                ));
            }
        }
    }

    deficiencies
}
