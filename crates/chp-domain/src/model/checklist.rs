//! The fixed 40-item CHP 108A checklist

use serde::Serialize;

/// Number of checklist rows on the form
pub const CHECKLIST_LEN: usize = 40;

/// Item descriptions in printed order (0-indexed)
pub const INSPECTION_ITEMS: [&str; CHECKLIST_LEN] = [
    "Fire extinguisher, first aid kit, and reflective warning devices",
    "Horn, defroster, gauges, odometer, and speedometer",
    "Driver seat, passenger seats, padding, interior, and floor condition",
    "Windshield wipers, windows, mirrors, and supports",
    "All interior and exterior lights, signals, reflectors",
    "Electrical wiring-condition and protection",
    "Batteries-water level, terminals, and cables",
    "Warning devices-air, oil, temperature, exit, and/or vacuum",
    "Heaters, defrosters, switches, and vents",
    "Doors, exterior, paint, and marking",
    "Radiator and water hoses-coolant level, condition, and/or leaks",
    "Belts-compressor, fan, water, and/or alternator",
    "Air hoses and tubing-leaks, condition, and/or protection",
    "Fuel system-tank, hoses, tubing, and/or pump-leaks",
    "Exhaust system, manifolds, piping, muffler-leaks and/or condition",
    "Engine-mounting, excessive grease and/or oil",
    "Clutch adjustment-free play",
    "Air filter, throttle linkage",
    "Starting and charging system",
    "Hydraulic brake system-adjustment, components, and/or condition",
    "Hydraulic master cylinder-level, leaks, and/or condition",
    "Hoses and tubing-condition, protection",
    "Air brake system-adjustment, compartments, and/or condition",
    "1 minute air or vacuum loss test",
    "Air compressor governor-cut in and cut out pressure (85-130)",
    "Primary air tank-drain and test function of check valve",
    "Other air tanks-drain and check for contamination",
    "Tires-tread depth, inflation, condition",
    "Wheels, lug nuts, and studs-cracks, looseness, and/or condition",
    "Parking brake-able to hold the vehicle",
    "Emergency stopping system-labeled, operative",
    "Brakes do not release after complete loss of service air",
    "Steering system-mounting, free lash and components",
    "Steering arms, drag links, and/or tie rod ends",
    "Suspension system-springs, shackles, u-bolts, and/or torque rods",
    "Frame and cross members-cracks and/or condition",
    "Drive shaft, universal joints, and/or guards",
    "Transmission and differential-mounting, leaks, and/or condition",
    "Wheel seals-leaks and/or condition",
    "Under carriage-clean and secure",
];

/// Items that only apply to air-brake vehicles
pub const AIR_BRAKE_ITEMS: [usize; 6] = [22, 23, 24, 25, 26, 31];

/// Items that only apply to hydraulic-brake vehicles
pub const HYDRAULIC_BRAKE_ITEMS: [usize; 2] = [19, 20];

/// Items 1-21 (indices 0..=20) meet the minimum requirements of 34505 CVC
const LAST_CVC_REQUIRED_INDEX: usize = 20;

/// Which brake configuration an item is relevant to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrakeApplicability {
    Any,
    AirBrakesOnly,
    HydraulicOnly,
}

/// One row of the checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub index: usize,
    pub description: &'static str,
    pub cvc_required: bool,
    pub applicability: BrakeApplicability,
}

impl ChecklistItem {
    pub fn get(index: usize) -> Option<Self> {
        let description = *INSPECTION_ITEMS.get(index)?;
        let applicability = if AIR_BRAKE_ITEMS.contains(&index) {
            BrakeApplicability::AirBrakesOnly
        } else if HYDRAULIC_BRAKE_ITEMS.contains(&index) {
            BrakeApplicability::HydraulicOnly
        } else {
            BrakeApplicability::Any
        };
        Some(Self {
            index,
            description,
            cvc_required: index <= LAST_CVC_REQUIRED_INDEX,
            applicability,
        })
    }

    /// All 40 items in printed order
    pub fn all() -> impl Iterator<Item = ChecklistItem> {
        (0..CHECKLIST_LEN).filter_map(Self::get)
    }

    /// 1-based number printed in the item column
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Whether this item is inspected on a vehicle with the given brake system
    pub fn is_active(&self, has_air_brakes: bool) -> bool {
        match self.applicability {
            BrakeApplicability::Any => true,
            BrakeApplicability::AirBrakesOnly => has_air_brakes,
            BrakeApplicability::HydraulicOnly => !has_air_brakes,
        }
    }
}

/// Shorthand for `ChecklistItem::get(index).is_active(..)`; out-of-range
/// indices are never active.
pub fn is_item_active(index: usize, has_air_brakes: bool) -> bool {
    ChecklistItem::get(index).is_some_and(|item| item.is_active(has_air_brakes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_size() {
        assert_eq!(ChecklistItem::all().count(), CHECKLIST_LEN);
        assert!(ChecklistItem::get(CHECKLIST_LEN).is_none());
    }

    #[test]
    fn test_cvc_marker_covers_first_21_items() {
        let starred: Vec<usize> = ChecklistItem::all()
            .filter(|item| item.cvc_required)
            .map(|item| item.number())
            .collect();
        assert_eq!(starred, (1..=21).collect::<Vec<_>>());
    }

    #[test]
    fn test_brake_subsets_are_disjoint() {
        for index in AIR_BRAKE_ITEMS {
            assert!(!HYDRAULIC_BRAKE_ITEMS.contains(&index));
        }
    }

    #[test]
    fn test_activity_by_brake_system() {
        // Item 23: air brake system
        assert!(!is_item_active(22, false));
        assert!(is_item_active(22, true));
        // Item 20: hydraulic brake system
        assert!(is_item_active(19, false));
        assert!(!is_item_active(19, true));
        // Item 1 always applies
        assert!(is_item_active(0, false));
        assert!(is_item_active(0, true));
        assert!(!is_item_active(99, true));
    }
}
