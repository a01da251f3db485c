//! Lookup table from export format to exporter.

use crate::config::RenderFailurePolicy;
use bizdoc_core::{Error, ExportFormat, ExportedArtifact, Exporter, Result, TemplateDocument};
use bizdoc_docx::DocxExporter;
use bizdoc_pdf::{PdfExporter, PdfRenderer};
use bizdoc_pptx::PptxExporter;
use std::collections::HashMap;

/// Registered exporters, one per format.
pub struct ExporterRegistry {
    exporters: HashMap<ExportFormat, Box<dyn Exporter>>,
}

impl ExporterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            exporters: HashMap::new(),
        }
    }

    /// Registry with the Word, PDF, and Slide exporters.
    pub fn standard(renderer: Box<dyn PdfRenderer>) -> Self {
        Self::new()
            .with_exporter(Box::new(DocxExporter::new()))
            .with_exporter(Box::new(PdfExporter::new(renderer)))
            .with_exporter(Box::new(PptxExporter::new()))
    }

    /// Register an exporter, replacing any previous one for its format.
    pub fn with_exporter(mut self, exporter: Box<dyn Exporter>) -> Self {
        self.exporters.insert(exporter.format(), exporter);
        self
    }

    /// Formats that have an exporter.
    pub fn formats(&self) -> Vec<ExportFormat> {
        ExportFormat::all()
            .into_iter()
            .filter(|f| self.exporters.contains_key(f))
            .collect()
    }

    fn lookup(&self, format: ExportFormat) -> Result<&dyn Exporter> {
        self.exporters
            .get(&format)
            .map(|e| e.as_ref())
            .ok_or_else(|| Error::UnsupportedFormat(format!("No exporter registered for {}", format)))
    }

    /// Export a document, applying the render failure policy.
    ///
    /// Under [`RenderFailurePolicy::MaskAsEmpty`] a render failure is logged
    /// and an empty artifact is returned. Other errors always propagate.
    pub fn export(
        &self,
        format: ExportFormat,
        document: &TemplateDocument,
        policy: RenderFailurePolicy,
    ) -> Result<ExportedArtifact> {
        let exporter = self.lookup(format)?;

        match exporter.export(document) {
            Ok(bytes) => Ok(ExportedArtifact::new(format, bytes)),
            Err(Error::RenderFailure(message)) if policy == RenderFailurePolicy::MaskAsEmpty => {
                log::error!("Failed to render {} export, returning empty file: {}", format, message);
                Ok(ExportedArtifact::empty(format))
            }
            Err(e) => Err(e),
        }
    }

    /// Export from a format tag such as `pdf` or `pptx`.
    pub fn export_tagged(
        &self,
        format: &str,
        document: &TemplateDocument,
        policy: RenderFailurePolicy,
    ) -> Result<ExportedArtifact> {
        self.export(format.parse()?, document, policy)
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
