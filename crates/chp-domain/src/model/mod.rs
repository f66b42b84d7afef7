//! Domain model types

pub mod checklist;
pub mod deficiency;
pub mod fleet;
pub mod inspection;
pub mod month;

pub use checklist::{BrakeApplicability, ChecklistItem, CHECKLIST_LEN};
pub use deficiency::{DeficiencyRate, DeficiencyRecord};
pub use fleet::{default_fleet, FleetVehicle};
pub use inspection::{InspectionRecord, MonthEntry, VehicleInfo, DEFAULT_CARRIER_NAME};
pub use month::{MonthSlot, MonthTable};
