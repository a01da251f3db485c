//! PPTX (Office Open XML) backend for business templates.
//!
//! Writes single-slide decks from template documents and reads slide text
//! out of uploaded .pptx files, which are ZIP archives of XML parts.

pub mod parser;
pub mod writer;

pub use parser::{PptxParser, SlideText};
pub use writer::PptxExporter;
