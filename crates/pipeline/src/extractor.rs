//! Transcript extraction from uploaded files.

use bizdoc_core::{Error, Result, Transcript, TranscriptKind};
use bizdoc_docx::DocxReader;
use bizdoc_pdf::PdfReader;
use bizdoc_pptx::PptxParser;
use std::io::Cursor;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Turns uploaded bytes into plain transcript text.
///
/// No OCR or layout reconstruction; text is concatenated in reading order.
#[derive(Debug, Clone)]
pub struct TranscriptExtractor {
    max_upload_bytes: usize,
}

impl TranscriptExtractor {
    /// Create an extractor accepting uploads up to `max_upload_bytes`.
    pub fn new(max_upload_bytes: usize) -> Self {
        Self { max_upload_bytes }
    }

    /// Extract a transcript, detecting the kind from the filename.
    pub fn extract_upload(&self, bytes: &[u8], filename: &str) -> Result<Transcript> {
        self.extract(bytes, TranscriptKind::from_filename(filename))
    }

    /// Extract a transcript from bytes of a known kind.
    pub fn extract(&self, bytes: &[u8], kind: TranscriptKind) -> Result<Transcript> {
        if bytes.len() > self.max_upload_bytes {
            return Err(Error::Validation(format!(
                "Upload of {} bytes exceeds the {} byte limit",
                bytes.len(),
                self.max_upload_bytes
            )));
        }

        let text = match kind {
            TranscriptKind::Text => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                String::from_utf8(bytes.to_vec())
                    .map_err(|e| Error::UnsupportedEncoding(format!("Transcript is not valid UTF-8: {}", e)))?
            }
            TranscriptKind::Pdf => {
                log::debug!("Extracting PDF transcript");
                PdfReader::new().extract_text(bytes)?
            }
            TranscriptKind::Docx => {
                log::debug!("Extracting DOCX transcript");
                DocxReader::new().extract_text(Cursor::new(bytes))?
            }
            TranscriptKind::Pptx => {
                log::debug!("Extracting PPTX transcript");
                PptxParser::new().extract_text(Cursor::new(bytes))?
            }
        };

        Ok(Transcript::new(kind, text))
    }
}

impl Default for TranscriptExtractor {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_UPLOAD_BYTES)
    }
}
