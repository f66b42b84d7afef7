//! Application use cases

pub mod export_service;

pub use export_service::{
    generate_document, generate_document_with, output_filename, ExportOptions,
    ExportServiceError, GeneratedDocument,
};
