//! PDF backend for business templates.
//!
//! Exports template documents by rendering a small HTML page through an
//! external HTML-to-PDF engine, and reads page text out of uploaded PDFs.

pub mod exporter;
pub mod html;
pub mod reader;
pub mod renderer;

pub use exporter::PdfExporter;
pub use html::{split_heading, template_html};
pub use reader::PdfReader;
pub use renderer::{PdfRenderer, WkhtmltopdfRenderer};
