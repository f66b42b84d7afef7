//! File-based repository implementations

mod file_fleet_repo;
mod file_record_repo;

pub use file_fleet_repo::FileFleetRepository;
pub use file_record_repo::FileInspectionRecordRepository;
