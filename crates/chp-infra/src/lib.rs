//! Infrastructure layer - fleet loaders and record persistence

pub mod fleet_csv;
pub mod fleet_loader;
pub mod persistence;
