//! Fleet master data loader from TOML

use std::fs;
use std::path::Path;

use chp_domain::model::FleetVehicle;
use chp_types::{Error, Result};
use serde::Deserialize;

/// Container for parsing fleet.toml
#[derive(Debug, Deserialize)]
struct FleetConfig {
    vehicles: Vec<FleetVehicle>,
}

/// Load fleet vehicles from a TOML file with `[[vehicles]]` tables
pub fn load_fleet_from_toml(path: &Path) -> Result<Vec<FleetVehicle>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Fleet(format!("Failed to read fleet file {}: {}", path.display(), e)))?;
    parse_fleet_toml(&content)
}

/// Parse fleet vehicles from a TOML string
pub fn parse_fleet_toml(toml_content: &str) -> Result<Vec<FleetVehicle>> {
    let config: FleetConfig = toml::from_str(toml_content)
        .map_err(|e| Error::Fleet(format!("Failed to parse fleet TOML: {}", e)))?;
    Ok(config.vehicles)
}
