//! Inspection record snapshot stored as a JSON file

use std::fs;
use std::path::{Path, PathBuf};

use chp_domain::model::InspectionRecord;
use chp_domain::repository::InspectionRecordRepository;
use chp_types::{Error, Result};

/// One record per JSON file
pub struct FileInspectionRecordRepository {
    path: PathBuf,
}

impl FileInspectionRecordRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InspectionRecordRepository for FileInspectionRecordRepository {
    fn load(&self) -> Result<InspectionRecord> {
        if !self.path.exists() {
            return Err(Error::FileNotFound(self.path.display().to_string()));
        }
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content)
            .map_err(|e| Error::InvalidRecord(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, record: &InspectionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chp_domain::model::MonthSlot;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let repo = FileInspectionRecordRepository::new(dir.path().join("records/tiffany6.json"));

        let mut record = InspectionRecord::default();
        record.vehicle.unit_number = "Tiffany 6".to_string();
        record.apply_anchor_date("2025-01-15");
        record.toggle_passed(MonthSlot::Jan);
        repo.save(&record).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let repo = FileInspectionRecordRepository::new(dir.path().join("nope.json"));
        assert!(matches!(repo.load(), Err(Error::FileNotFound(_))));

        std::fs::write(repo.path(), r#"{"vehicle": {}, "months": {"JAN": {}}}"#).unwrap();
        assert!(matches!(repo.load(), Err(Error::InvalidRecord(_))));
    }
}
