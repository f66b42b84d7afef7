//! Document layout and export
//!
//! Layout produces [`Page`] values made of absolute drawing operations and
//! optional form fields; `pdf` serializes them, `excel` writes the repair log.

pub mod appendix;
pub mod checklist_page;
pub mod document;
pub mod excel;
pub mod layout;
pub mod metrics;
pub mod page;
pub mod pdf;
pub mod signature;

pub use appendix::{appendix_page_count, render_appendix_pages, APPENDIX_ROWS_PER_PAGE};
pub use checklist_page::render_checklist_page;
pub use document::render_document;
pub use excel::{export_repair_log, repair_log_to_buffer};
pub use layout::LayoutOptions;
pub use page::{
    Color, DrawOp, FieldKind, FontFace, FormField, Page, RasterImage, PAGE_HEIGHT, PAGE_WIDTH,
};
pub use pdf::{write_pdf, PdfMetadata};
pub use signature::{DataUriDecoder, EmbedError, SignatureDecoder};
