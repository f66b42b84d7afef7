//! Fleet repository backed by a TOML or CSV file, or the built-in list

use std::path::{Path, PathBuf};

use chp_domain::model::{default_fleet, FleetVehicle};
use chp_domain::repository::FleetRepository;
use chp_types::{Error, Result};

use crate::fleet_csv::load_fleet_from_csv;
use crate::fleet_loader::load_fleet_from_toml;

/// Fleet master data held in memory after loading
pub struct FileFleetRepository {
    source: Option<PathBuf>,
    vehicles: Vec<FleetVehicle>,
}

impl FileFleetRepository {
    /// Built-in fleet, no file involved
    pub fn builtin() -> Self {
        Self {
            source: None,
            vehicles: default_fleet(),
        }
    }

    /// Load from a `.toml` or `.csv` file
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let vehicles = match extension.as_deref() {
            Some("toml") => load_fleet_from_toml(path)?,
            Some("csv") => load_fleet_from_csv(path)?,
            _ => {
                return Err(Error::Fleet(format!(
                    "Unsupported fleet file type: {} (expected .toml or .csv)",
                    path.display()
                )))
            }
        };
        tracing::debug!(path = %path.display(), count = vehicles.len(), "loaded fleet file");
        Ok(Self {
            source: Some(path.to_path_buf()),
            vehicles,
        })
    }

    /// Fleet file path, `None` for the built-in list
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl FleetRepository for FileFleetRepository {
    fn find_all(&self) -> Result<Vec<FleetVehicle>> {
        Ok(self.vehicles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_lookup() {
        let repo = FileFleetRepository::builtin();
        let vehicle = repo.find_by_unit("tiffany 17").unwrap().unwrap();
        assert_eq!(vehicle.license_number, "14343G3");
        assert!(repo.find_by_unit("Tiffany 99").unwrap().is_none());
        assert!(repo.source().is_none());
    }

    #[test]
    fn test_open_csv_and_reject_unknown_extension() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("fleet.csv");
        std::fs::write(&csv_path, "Bus 1,AAA111,Blue Bird,Vision,yes,2021\n").unwrap();
        let repo = FileFleetRepository::open(&csv_path).unwrap();
        assert_eq!(repo.find_all().unwrap().len(), 1);
        assert_eq!(repo.source(), Some(csv_path.as_path()));

        let txt_path = dir.path().join("fleet.txt");
        std::fs::write(&txt_path, "").unwrap();
        assert!(matches!(FileFleetRepository::open(&txt_path), Err(Error::Fleet(_))));
        assert!(matches!(
            FileFleetRepository::open(&dir.path().join("missing.toml")),
            Err(Error::FileNotFound(_))
        ));
    }
}
