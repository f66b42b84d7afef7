//! The inspection record: vehicle header plus one entry per month slot

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::deficiency::DeficiencyRate;
use super::fleet::FleetVehicle;
use super::month::{MonthSlot, MonthTable};
use crate::service::sampling::{sample_deficient_items, IndexSource};
use crate::service::schedule::{parse_iso_date, project_schedule};

pub const DEFAULT_CARRIER_NAME: &str = "California Charter Bus & Tours";

/// Vehicle identity printed in every page header
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleInfo {
    pub carrier_name: String,
    pub unit_number: String,
    pub year: String,
    pub make_model: String,
    pub license_number: String,
    pub has_air_brakes: bool,
}

/// One monthly inspection cycle.
///
/// `passed` and `deficient` are kept mutually exclusive by the editing
/// methods on [`InspectionRecord`], but a record loaded from elsewhere may
/// violate that; rendering treats them as independent flags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthEntry {
    pub passed: bool,
    pub deficient: bool,
    pub deficiency_rate: DeficiencyRate,
    /// 0-based checklist indices sampled as deficient
    pub sampled_deficient_items: BTreeSet<usize>,
    /// ISO date (`YYYY-MM-DD`) or empty
    pub inspection_date: String,
    pub odometer_reading: String,
    /// `data:image/(png|jpeg);base64,...` or empty
    pub signature_image: String,
}

impl MonthEntry {
    /// Parsed inspection date, `None` when empty or malformed
    pub fn date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.inspection_date)
    }

    pub fn is_signed(&self) -> bool {
        !self.signature_image.is_empty()
    }

    /// Whether the month carries a passed or deficient mark
    pub fn is_marked(&self) -> bool {
        self.passed || self.deficient
    }

    pub fn is_sampled_deficient(&self, item_index: usize) -> bool {
        self.sampled_deficient_items.contains(&item_index)
    }
}

/// Root aggregate handed to the layout engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionRecord {
    pub vehicle: VehicleInfo,
    pub months: MonthTable<MonthEntry>,
}

impl Default for InspectionRecord {
    fn default() -> Self {
        Self::new(DEFAULT_CARRIER_NAME)
    }
}

impl InspectionRecord {
    /// Empty record: no marks, dates, or signatures in any slot
    pub fn new(carrier_name: &str) -> Self {
        Self {
            vehicle: VehicleInfo {
                carrier_name: carrier_name.to_string(),
                ..VehicleInfo::default()
            },
            months: MonthTable::default(),
        }
    }

    pub fn month(&self, slot: MonthSlot) -> &MonthEntry {
        &self.months[slot]
    }

    pub fn month_mut(&mut self, slot: MonthSlot) -> &mut MonthEntry {
        &mut self.months[slot]
    }

    /// Copy a fleet vehicle's identity into the header
    pub fn apply_fleet_vehicle(&mut self, vehicle: &FleetVehicle) {
        self.vehicle.unit_number = vehicle.unit_number.clone();
        self.vehicle.license_number = vehicle.license_number.clone();
        self.vehicle.year = vehicle.year.clone();
        self.vehicle.make_model = vehicle.make_model();
        self.vehicle.has_air_brakes = vehicle.has_air_brakes;
    }

    pub fn toggle_passed(&mut self, slot: MonthSlot) {
        let entry = self.month_mut(slot);
        entry.passed = !entry.passed;
        entry.deficient = false;
    }

    pub fn toggle_deficient(&mut self, slot: MonthSlot) {
        let entry = self.month_mut(slot);
        entry.deficient = !entry.deficient;
        entry.passed = false;
    }

    pub fn set_all_passed(&mut self) {
        for (_, entry) in self.months.iter_mut() {
            entry.passed = true;
            entry.deficient = false;
        }
    }

    pub fn set_all_deficient(&mut self) {
        for (_, entry) in self.months.iter_mut() {
            entry.passed = false;
            entry.deficient = true;
        }
    }

    /// Overwrite every slot's date with the 45-day projection from `anchor`.
    ///
    /// An empty or unparseable anchor clears all dates.
    pub fn apply_anchor_date(&mut self, anchor: &str) {
        let schedule = project_schedule(anchor);
        for (slot, entry) in self.months.iter_mut() {
            entry.inspection_date = schedule[slot]
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
        }
    }

    /// Manual override of a single slot's date
    pub fn set_date(&mut self, slot: MonthSlot, date: &str) {
        self.month_mut(slot).inspection_date = date.to_string();
    }

    pub fn set_odometer(&mut self, slot: MonthSlot, reading: &str) {
        self.month_mut(slot).odometer_reading = reading.to_string();
    }

    pub fn sign(&mut self, slot: MonthSlot, signature: &str) {
        self.month_mut(slot).signature_image = signature.to_string();
    }

    pub fn unsign(&mut self, slot: MonthSlot) {
        self.month_mut(slot).signature_image.clear();
    }

    /// Sign every marked, unsigned month. Returns how many were signed.
    pub fn sign_all_marked(&mut self, signature: &str) -> usize {
        let mut signed = 0;
        for (_, entry) in self.months.iter_mut() {
            if entry.is_marked() && !entry.is_signed() {
                entry.signature_image = signature.to_string();
                signed += 1;
            }
        }
        signed
    }

    /// Set a month's sampling rate and draw a fresh sample of item indices
    pub fn apply_deficiency_rate<S: IndexSource + ?Sized>(
        &mut self,
        slot: MonthSlot,
        rate: DeficiencyRate,
        source: &mut S,
    ) {
        let entry = self.month_mut(slot);
        entry.deficiency_rate = rate;
        entry.sampled_deficient_items = sample_deficient_items(rate, source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fleet::default_fleet;

    #[test]
    fn test_new_record_is_empty() {
        let record = InspectionRecord::default();
        assert_eq!(record.vehicle.carrier_name, DEFAULT_CARRIER_NAME);
        assert!(!record.vehicle.has_air_brakes);
        for (_, entry) in record.months.iter() {
            assert!(!entry.is_marked());
            assert!(entry.inspection_date.is_empty());
            assert!(!entry.is_signed());
        }
    }

    #[test]
    fn test_toggles_keep_flags_exclusive() {
        let mut record = InspectionRecord::default();
        record.toggle_passed(MonthSlot::Mar);
        assert!(record.month(MonthSlot::Mar).passed);

        record.toggle_deficient(MonthSlot::Mar);
        assert!(record.month(MonthSlot::Mar).deficient);
        assert!(!record.month(MonthSlot::Mar).passed);

        record.toggle_deficient(MonthSlot::Mar);
        assert!(!record.month(MonthSlot::Mar).is_marked());
    }

    #[test]
    fn test_apply_anchor_date_fills_every_slot() {
        let mut record = InspectionRecord::default();
        record.apply_anchor_date("2025-01-15");
        assert_eq!(record.month(MonthSlot::Jan).inspection_date, "2025-01-15");
        assert_eq!(record.month(MonthSlot::Feb).inspection_date, "2026-01-10");
        assert!(record.months.values().all(|e| e.date().is_some()));

        record.apply_anchor_date("");
        assert!(record.months.values().all(|e| e.inspection_date.is_empty()));
    }

    #[test]
    fn test_sign_all_marked_skips_unmarked_and_signed() {
        let mut record = InspectionRecord::default();
        record.toggle_passed(MonthSlot::Jan);
        record.toggle_deficient(MonthSlot::Feb);
        record.toggle_passed(MonthSlot::Mar);
        record.sign(MonthSlot::Mar, "data:image/png;base64,old");

        let signed = record.sign_all_marked("data:image/png;base64,new");
        assert_eq!(signed, 2);
        assert_eq!(record.month(MonthSlot::Mar).signature_image, "data:image/png;base64,old");
        assert!(!record.month(MonthSlot::Apr).is_signed());

        record.unsign(MonthSlot::Jan);
        assert!(!record.month(MonthSlot::Jan).is_signed());
    }

    #[test]
    fn test_apply_fleet_vehicle() {
        let mut record = InspectionRecord::default();
        let tiffany_6 = &default_fleet()[2];
        record.apply_fleet_vehicle(tiffany_6);
        assert_eq!(record.vehicle.unit_number, "Tiffany 6");
        assert_eq!(record.vehicle.make_model, "Ford F-750");
        assert!(record.vehicle.has_air_brakes);
        assert_eq!(record.vehicle.carrier_name, DEFAULT_CARRIER_NAME);
    }

    #[test]
    fn test_record_json_roundtrip_keeps_sampled_items() {
        let mut record = InspectionRecord::default();
        record.month_mut(MonthSlot::Jun).deficiency_rate = DeficiencyRate::FivePercent;
        record.month_mut(MonthSlot::Jun).sampled_deficient_items = [4, 17].into_iter().collect();
        let json = serde_json::to_string(&record).unwrap();
        let back: InspectionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
