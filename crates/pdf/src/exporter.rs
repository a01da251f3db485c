//! PDF exporter implementation.

use crate::html::template_html;
use crate::renderer::PdfRenderer;
use bizdoc_core::{ExportFormat, Exporter, Result, TemplateDocument};

/// Exporter rendering template documents to PDF.
///
/// Rendering failures are returned as `Error::RenderFailure`; callers that
/// must always hand back a file decide whether to mask them.
pub struct PdfExporter {
    renderer: Box<dyn PdfRenderer>,
}

impl PdfExporter {
    /// Create an exporter using the given rendering engine.
    pub fn new(renderer: Box<dyn PdfRenderer>) -> Self {
        Self { renderer }
    }
}

impl Exporter for PdfExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn export(&self, document: &TemplateDocument) -> Result<Vec<u8>> {
        if document.content.is_empty() {
            log::warn!("Empty template content, skipping PDF export");
            return Ok(Vec::new());
        }

        let html = template_html(&document.content);
        log::debug!("Rendering {} ({} bytes of HTML)", document.template_type, html.len());
        self.renderer.render(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdoc_core::{Error, KeyPointList, TemplateBuilder, TemplateType};
    use std::sync::{Arc, Mutex};

    /// Records the HTML it receives and returns a fixed PDF.
    struct RecordingRenderer {
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl PdfRenderer for RecordingRenderer {
        fn render(&self, html: &str) -> Result<Vec<u8>> {
            self.seen.lock().unwrap().push(html.to_string());
            Ok(b"%PDF-1.4 fake".to_vec())
        }
    }

    struct BrokenRenderer;

    impl PdfRenderer for BrokenRenderer {
        fn render(&self, _html: &str) -> Result<Vec<u8>> {
            Err(Error::RenderFailure("wkhtmltopdf not found".into()))
        }
    }

    fn doc() -> TemplateDocument {
        TemplateBuilder::new().build(TemplateType::BusinessPlan, &KeyPointList::from_points(["Point A"]))
    }

    #[test]
    fn test_export_passes_template_html() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let exporter = PdfExporter::new(Box::new(RecordingRenderer { seen: seen.clone() }));

        let bytes = exporter.export(&doc()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("<b>Business Plan</b>"));
        assert!(seen[0].contains("1. Point A"));
    }

    #[test]
    fn test_render_failure_is_explicit() {
        let exporter = PdfExporter::new(Box::new(BrokenRenderer));
        assert!(matches!(exporter.export(&doc()), Err(Error::RenderFailure(_))));
    }

    #[test]
    fn test_empty_content_skips_renderer() {
        let exporter = PdfExporter::new(Box::new(BrokenRenderer));
        let mut empty = doc();
        empty.content.clear();
        assert!(exporter.export(&empty).unwrap().is_empty());
    }
}
