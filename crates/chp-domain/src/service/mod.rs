//! Domain services

pub mod deficiencies;
pub mod marks;
pub mod sampling;
pub mod schedule;

pub use deficiencies::collect_deficiencies;
pub use marks::{cell_marks, CellMarks};
pub use sampling::{sample_deficient_items, IndexSource, RngIndexSource};
pub use schedule::{
    displayed_slot, format_for_display, format_for_document, month_slot_of,
    next_inspection_info, project_schedule, NextInspection,
};
