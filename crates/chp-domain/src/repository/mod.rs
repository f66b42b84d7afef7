//! Repository trait definitions for data persistence

use crate::model::{FleetVehicle, InspectionRecord};
use chp_types::Error;

/// Repository for fleet vehicle master data
pub trait FleetRepository {
    /// Load all fleet vehicles in file order
    fn find_all(&self) -> Result<Vec<FleetVehicle>, Error>;

    /// Find a vehicle by unit number (case- and whitespace-insensitive)
    fn find_by_unit(&self, unit_number: &str) -> Result<Option<FleetVehicle>, Error> {
        Ok(self
            .find_all()?
            .into_iter()
            .find(|vehicle| vehicle.matches_unit(unit_number)))
    }
}

/// Repository for an inspection record snapshot
pub trait InspectionRecordRepository {
    /// Load the stored record
    fn load(&self) -> Result<InspectionRecord, Error>;

    /// Replace the stored record
    fn save(&self, record: &InspectionRecord) -> Result<(), Error>;
}
