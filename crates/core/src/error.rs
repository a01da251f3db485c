//! Error types for transcript processing and document generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning transcripts into business documents.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A required field was missing or empty.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The template type tag is not one of the known templates.
    #[error("Unknown template type: {0}")]
    UnknownTemplateType(String),

    /// The export format, platform, or destination is not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A plain-text upload was not valid UTF-8.
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// An external collaborator (chat platform, language model, publisher, store) failed.
    #[error("Collaborator failure: {0}")]
    CollaboratorFailure(String),

    /// The HTML-to-PDF rendering step failed.
    #[error("Render failure: {0}")]
    RenderFailure(String),

    /// ZIP archive error (for DOCX/PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing or writing error (for DOCX/PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// PDF parsing error.
    #[error("PDF error: {0}")]
    PdfError(String),

    /// Invalid or corrupted upload.
    #[error("Invalid or corrupted file: {0}")]
    CorruptedFile(String),

    /// A stored document does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Which side of a request an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad input from the caller (maps to a 4xx status).
    Client,
    /// Failure inside the system or one of its collaborators (maps to a 5xx status).
    Server,
}

impl Error {
    /// Classify the error for the request boundary.
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::Validation(_)
            | Error::UnknownTemplateType(_)
            | Error::UnsupportedFormat(_)
            | Error::UnsupportedEncoding(_)
            | Error::CorruptedFile(_)
            | Error::NotFound(_) => ErrorClass::Client,
            Error::IoError(_)
            | Error::CollaboratorFailure(_)
            | Error::RenderFailure(_)
            | Error::ZipError(_)
            | Error::XmlError(_)
            | Error::PdfError(_) => ErrorClass::Server,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_client_errors() {
        assert_eq!(
            Error::Validation("Key points are required".into()).class(),
            ErrorClass::Client
        );
        assert_eq!(
            Error::UnknownTemplateType("memo".into()).class(),
            ErrorClass::Client
        );
        assert_eq!(
            Error::UnsupportedEncoding("invalid utf-8".into()).class(),
            ErrorClass::Client
        );
    }

    #[test]
    fn test_collaborator_errors_are_server_errors() {
        assert_eq!(
            Error::CollaboratorFailure("slack unreachable".into()).class(),
            ErrorClass::Server
        );
        assert_eq!(
            Error::RenderFailure("wkhtmltopdf missing".into()).class(),
            ErrorClass::Server
        );
    }
}
