//! Fleet vehicle master data

use serde::{Deserialize, Serialize};

/// A vehicle in the carrier's fleet, used to prefill the form header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetVehicle {
    pub unit_number: String,
    pub license_number: String,
    pub make: String,
    pub model: String,
    pub has_air_brakes: bool,
    pub year: String,
}

impl FleetVehicle {
    fn new(unit: &str, license: &str, make: &str, model: &str, air: bool, year: &str) -> Self {
        Self {
            unit_number: unit.to_string(),
            license_number: license.to_string(),
            make: make.to_string(),
            model: model.to_string(),
            has_air_brakes: air,
            year: year.to_string(),
        }
    }

    /// "Make Model" as printed in the MAKE box
    pub fn make_model(&self) -> String {
        format!("{} {}", self.make, self.model).trim().to_string()
    }

    /// Unit number comparison ignoring case and whitespace
    pub fn matches_unit(&self, unit: &str) -> bool {
        normalize_unit(&self.unit_number) == normalize_unit(unit)
    }
}

fn normalize_unit(unit: &str) -> String {
    unit.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Built-in fleet used when no fleet file is configured
pub fn default_fleet() -> Vec<FleetVehicle> {
    vec![
        FleetVehicle::new("Sprinter 5", "52295R3", "Merz", "3500", false, "2023"),
        FleetVehicle::new("Sprinter 6", "52293R3", "Merz", "3500", false, "2023"),
        FleetVehicle::new("Tiffany 6", "96689D2", "Ford", "F-750", true, "2012"),
        FleetVehicle::new("Tiffany 8", "15191D2", "Ford", "E-450", false, "2017"),
        FleetVehicle::new("Tiffany 9", "14709D2", "Ford", "F-650", false, "2015"),
        FleetVehicle::new("Tiffany 10", "87355G2", "Ford", "E-450", false, "2017"),
        FleetVehicle::new("Tiffany 11", "26513P2", "Ford", "F-550", false, "2017"),
        FleetVehicle::new("Tiffany 12", "26512P2", "Ford", "F-550", false, "2017"),
        FleetVehicle::new("Tiffany 14", "26810P2", "Ford", "F-550", false, "2018"),
        FleetVehicle::new("Tiffany 15", "32612W2", "Ford", "E-450", false, "2019"),
        FleetVehicle::new("Tiffany 16", "18533B3", "Ford", "F-750", true, "2015"),
        FleetVehicle::new("Tiffany 17", "14343G3", "Ford", "F-650", true, "2016"),
        FleetVehicle::new("Tiffany 18", "53825P3", "Ford", "F-650", true, "2016"),
        FleetVehicle::new("Tiffany 20", "53740G4", "Freightliner", "M2", true, "2020"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fleet() {
        let fleet = default_fleet();
        assert_eq!(fleet.len(), 14);
        assert_eq!(fleet.iter().filter(|v| v.has_air_brakes).count(), 5);
    }

    #[test]
    fn test_matches_unit_ignores_case_and_spaces() {
        let vehicle = &default_fleet()[2];
        assert!(vehicle.matches_unit("tiffany6"));
        assert!(vehicle.matches_unit(" TIFFANY 6 "));
        assert!(!vehicle.matches_unit("Tiffany 16"));
    }

    #[test]
    fn test_make_model() {
        let vehicle = &default_fleet()[13];
        assert_eq!(vehicle.make_model(), "Freightliner M2");
    }
}
