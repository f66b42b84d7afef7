//! Fixed text printed on the CHP 108A form

pub mod form_text;

pub use form_text::*;
