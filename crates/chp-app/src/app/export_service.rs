//! Export Service - turns an inspection record into a finished document
//!
//! The record is laid out, serialized and checked before any bytes are
//! handed back. A failure at any step is reported once; no partial output
//! is returned.

use chrono::NaiveDate;
use chp_domain::model::InspectionRecord;
use chp_types::Error;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::constants::DOCUMENT_TITLE;
use crate::export::{
    render_document, write_pdf, DataUriDecoder, LayoutOptions, PdfMetadata, SignatureDecoder,
};

/// Errors specific to document generation
#[derive(Debug, Error)]
pub enum ExportServiceError {
    #[error("Record could not be serialized: {0}")]
    Serialization(String),

    #[error("Document generation failed: {0}")]
    GenerationFailed(String),
}

impl From<ExportServiceError> for Error {
    fn from(err: ExportServiceError) -> Self {
        Error::Generation(err.to_string())
    }
}

/// Options for one export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// File name prefix, e.g. `CHP108A`
    pub form_code: String,
    pub interactive_fields: bool,
    /// Date stamped into the file name
    pub generated_on: NaiveDate,
}

impl ExportOptions {
    pub fn from_config(config: &Config, generated_on: NaiveDate) -> Self {
        Self {
            form_code: config.form_code.clone(),
            interactive_fields: config.interactive_fields,
            generated_on,
        }
    }
}

/// A generated PDF and its suggested file name
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
    pub page_count: usize,
}

/// `<form code>_<unit>_<YYYY-MM-DD>.pdf`, with `inspection` standing in for
/// an empty unit number. Characters that are unsafe in file names become `_`.
pub fn output_filename(form_code: &str, unit_number: &str, generated_on: NaiveDate) -> String {
    let unit = unit_number.trim();
    let unit = if unit.is_empty() { "inspection" } else { unit };
    format!(
        "{}_{}_{}.pdf",
        sanitize(form_code),
        sanitize(unit),
        generated_on.format("%Y-%m-%d")
    )
}

fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Generate the PDF with the standard data-URI signature decoder
pub fn generate_document(
    record: &InspectionRecord,
    options: &ExportOptions,
) -> Result<GeneratedDocument, ExportServiceError> {
    generate_document_with(record, options, &DataUriDecoder)
}

/// Generate the PDF with a caller-supplied signature decoder
pub fn generate_document_with(
    record: &InspectionRecord,
    options: &ExportOptions,
    decoder: &dyn SignatureDecoder,
) -> Result<GeneratedDocument, ExportServiceError> {
    let layout = LayoutOptions {
        interactive_fields: options.interactive_fields,
    };
    let pages = render_document(record, decoder, &layout);

    let metadata = PdfMetadata {
        title: DOCUMENT_TITLE.to_string(),
        file_id: file_id(record)?,
    };
    let pdf = write_pdf(&pages, &metadata);
    if !is_complete_pdf(&pdf) {
        return Err(ExportServiceError::GenerationFailed(
            "serializer produced an incomplete file".to_string(),
        ));
    }
    debug!(bytes = pdf.len(), "pdf serialized");

    let filename = output_filename(
        &options.form_code,
        &record.vehicle.unit_number,
        options.generated_on,
    );
    info!(file = %filename, pages = pages.len(), "document generated");
    Ok(GeneratedDocument {
        filename,
        pdf,
        page_count: pages.len(),
    })
}

fn is_complete_pdf(bytes: &[u8]) -> bool {
    let tail = &bytes[bytes.len().saturating_sub(32)..];
    bytes.starts_with(b"%PDF-") && tail.windows(5).any(|w| w == b"%%EOF")
}

/// First 16 bytes of the SHA-256 of the record's JSON form
fn file_id(record: &InspectionRecord) -> Result<Vec<u8>, ExportServiceError> {
    let json =
        serde_json::to_vec(record).map_err(|e| ExportServiceError::Serialization(e.to_string()))?;
    Ok(Sha256::digest(&json)[..16].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_output_filename() {
        assert_eq!(
            output_filename("CHP108A", "Tiffany 6", ymd(2025, 3, 1)),
            "CHP108A_Tiffany_6_2025-03-01.pdf"
        );
        assert_eq!(
            output_filename("CHP108A", "  ", ymd(2025, 3, 1)),
            "CHP108A_inspection_2025-03-01.pdf"
        );
        assert_eq!(
            output_filename("CHP108A", "../bus/7", ymd(2025, 12, 9)),
            "CHP108A_.._bus_7_2025-12-09.pdf"
        );
    }

    #[test]
    fn test_truncated_output_is_rejected() {
        assert!(!is_complete_pdf(b"%PDF-1.7\n1 0 obj"));
        assert!(!is_complete_pdf(b""));
        assert!(is_complete_pdf(b"%PDF-1.7\ntrailer\nstartxref\n9\n%%EOF\n"));
    }

    #[test]
    fn test_file_id_is_stable_and_record_specific() {
        let a = InspectionRecord::default();
        let mut b = InspectionRecord::default();
        b.vehicle.unit_number = "Tiffany 8".to_string();
        assert_eq!(file_id(&a).unwrap(), file_id(&a).unwrap());
        assert_ne!(file_id(&a).unwrap(), file_id(&b).unwrap());
        assert_eq!(file_id(&a).unwrap().len(), 16);
    }
}
