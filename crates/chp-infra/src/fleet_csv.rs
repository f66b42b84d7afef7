//! Fleet master data loader from CSV
//!
//! Columns: unit_number, license_number, make, model, air_brakes, year.
//! A header row is optional and detected by its column names.

use std::path::Path;

use chp_domain::model::FleetVehicle;
use chp_types::{Error, Result};
use csv::{ReaderBuilder, StringRecord};

/// Load fleet vehicles from a CSV file
pub fn load_fleet_from_csv(path: &Path) -> Result<Vec<FleetVehicle>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Fleet(format!("Failed to read CSV file {}: {}", path.display(), e)))?;
    parse_fleet_csv(&content)
}

/// Parse fleet vehicles from CSV text. Rows with too few columns are skipped.
pub fn parse_fleet_csv(content: &str) -> Result<Vec<FleetVehicle>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut vehicles = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| Error::Fleet(format!("Invalid CSV row {}: {}", row + 1, e)))?;
        if row == 0 && is_header(&record) {
            continue;
        }
        match parse_row(&record) {
            Some(vehicle) => vehicles.push(vehicle),
            None => tracing::debug!(row = row + 1, "skipping incomplete fleet row"),
        }
    }
    Ok(vehicles)
}

fn is_header(record: &StringRecord) -> bool {
    record.iter().any(|h| {
        let h = h.to_lowercase();
        h.contains("unit") || h.contains("license") || h.contains("brake")
    })
}

fn parse_row(record: &StringRecord) -> Option<FleetVehicle> {
    if record.len() < 5 {
        return None;
    }
    let unit_number = record.get(0)?.to_string();
    if unit_number.is_empty() {
        return None;
    }
    Some(FleetVehicle {
        unit_number,
        license_number: record.get(1)?.to_string(),
        make: record.get(2)?.to_string(),
        model: record.get(3)?.to_string(),
        has_air_brakes: parse_flag(record.get(4)?),
        year: record.get(5).unwrap_or_default().to_string(),
    })
}

fn parse_flag(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "yes" | "y" | "1" | "air")
}
