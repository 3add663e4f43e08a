// File I/O: section lists, document records, print preview

pub mod document;
pub mod error;
pub mod json;
pub mod print;

pub use document::{load_document, Document};
pub use error::{DocError, FieldError};
pub use json::{load_sections, parse_sections, save_sections, section_values, to_json_string};
pub use print::{escape_html, render_html};
