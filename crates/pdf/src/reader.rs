//! PDF page text reader.

use bizdoc_core::{Error, Result};
use lopdf::Document;

/// Reader for the text of PDF files, page by page.
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Extract each page's text, in page order, trimmed.
    pub fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let document = Document::load_mem(bytes)
            .map_err(|e| Error::CorruptedFile(format!("Not a readable PDF: {}", e)))?;

        // BTreeMap keyed by page number, so iteration is page order
        let pages = document.get_pages();
        log::debug!("PDF has {} pages", pages.len());

        pages
            .keys()
            .map(|&page_number| {
                document
                    .extract_text(&[page_number])
                    .map(|text| text.trim().to_string())
                    .map_err(|e| Error::PdfError(format!("Failed to read page {}: {}", page_number, e)))
            })
            .collect()
    }

    /// Extract the document text: page texts joined with a single space.
    pub fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        Ok(self.page_texts(bytes)?.join(" "))
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
