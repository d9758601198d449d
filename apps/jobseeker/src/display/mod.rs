//! Terminal renderings of fetched data: PDFs, JSON blobs and text views.

pub mod json;
pub mod pdf;
pub mod text;

pub use json::JsonView;
pub use pdf::{PdfDocument, PdfKind};
