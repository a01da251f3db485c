//! DOCX (Office Open XML) backend for business templates.
//!
//! Writes single-paragraph Word documents and reads paragraph text back out
//! of uploaded .docx transcripts.

pub mod reader;
pub mod writer;

pub use reader::DocxReader;
pub use writer::DocxExporter;
