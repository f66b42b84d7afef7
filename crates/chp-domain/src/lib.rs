//! Domain layer for the CHP 108A bus inspection form
//!
//! Holds the inspection record model, the 45-day schedule projection, and
//! the deficiency rules the document layout consumes.

pub mod model;
pub mod repository;
pub mod service;
