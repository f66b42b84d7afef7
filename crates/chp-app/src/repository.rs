//! Repository adapters for persistence layer

use std::path::PathBuf;

use chp_infra::persistence::{FileFleetRepository, FileInspectionRecordRepository};
use chp_types::Result;

use crate::config::Config;

/// Open the configured fleet master, or the built-in fleet when none is set
pub fn open_fleet_repo(config: &Config) -> Result<FileFleetRepository> {
    match &config.fleet_file {
        Some(path) => FileFleetRepository::open(path),
        None => Ok(FileFleetRepository::builtin()),
    }
}

/// Open an inspection record file
pub fn open_record_repo(path: PathBuf) -> FileInspectionRecordRepository {
    FileInspectionRecordRepository::new(path)
}
