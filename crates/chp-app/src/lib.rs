//! Application service layer - config, document layout, PDF and XLSX export

pub mod app;
pub mod config;
pub mod constants;
pub mod export;
pub mod repository;
