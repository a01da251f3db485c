//! The transcript-to-document pipeline.
//!
//! Transcript → key-point extraction → normalization → template → export.
//! Every external system is passed in explicitly.

use crate::config::PipelineConfig;
use crate::extractor::TranscriptExtractor;
use crate::registry::ExporterRegistry;
use bizdoc_core::{
    ConversationSource, DocumentPublisher, Error, ExportFormat, ExportedArtifact, KeyPointExtractor,
    KeyPointList, KeyPointNormalizer, Platform, PublishDestination, Result, TemplateBuilder,
    TemplateDocument, TemplateType,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Orchestrates transcript processing and document generation.
pub struct TemplatePipeline {
    config: PipelineConfig,
    extractor: Box<dyn KeyPointExtractor>,
    registry: ExporterRegistry,
    sources: HashMap<Platform, Box<dyn ConversationSource>>,
    publishers: HashMap<PublishDestination, Box<dyn DocumentPublisher>>,
    transcripts: TranscriptExtractor,
    normalizer: KeyPointNormalizer,
    builder: TemplateBuilder,
}

impl TemplatePipeline {
    /// Create a pipeline around a key-point extractor and exporters.
    pub fn new(config: PipelineConfig, extractor: Box<dyn KeyPointExtractor>, registry: ExporterRegistry) -> Self {
        let transcripts = TranscriptExtractor::new(config.max_upload_bytes);
        Self {
            config,
            extractor,
            registry,
            sources: HashMap::new(),
            publishers: HashMap::new(),
            transcripts,
            normalizer: KeyPointNormalizer::new(),
            builder: TemplateBuilder::new(),
        }
    }

    /// Register a chat platform source.
    pub fn with_source(mut self, source: Box<dyn ConversationSource>) -> Self {
        self.sources.insert(source.platform(), source);
        self
    }

    /// Register a document publisher.
    pub fn with_publisher(mut self, publisher: Box<dyn DocumentPublisher>) -> Self {
        self.publishers.insert(publisher.destination(), publisher);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Extract key points from transcript text.
    pub fn key_points_from_text(&self, text: &str) -> Result<KeyPointList> {
        if text.trim().is_empty() {
            return Err(Error::Validation("Transcript is required".to_string()));
        }

        let reply = self.extractor.extract_key_points(text)?;
        let points = self.normalizer.normalize_reply(&reply)?;
        log::debug!("Extracted {} key points", points.len());
        Ok(points)
    }

    /// Fetch a conversation from a chat platform and extract its key points.
    pub fn key_points_from_conversation(&self, platform: Platform, id: &str) -> Result<KeyPointList> {
        if id.trim().is_empty() {
            return Err(Error::Validation(format!("{} conversation ID is required", platform)));
        }

        let source = self
            .sources
            .get(&platform)
            .ok_or_else(|| Error::UnsupportedFormat(format!("No {} integration configured", platform)))?;

        let conversation = source.fetch_conversation(id)?;
        if conversation.trim().is_empty() {
            return Err(Error::CollaboratorFailure(format!(
                "Failed to fetch {} conversation: {} is empty",
                platform, id
            )));
        }

        self.key_points_from_text(&conversation)
    }

    /// Extract key points from an uploaded transcript file.
    pub fn key_points_from_upload(&self, bytes: &[u8], filename: &str) -> Result<KeyPointList> {
        let transcript = self.transcripts.extract_upload(bytes, filename)?;
        log::debug!(
            "Extracted {} characters from {} ({:?})",
            transcript.text.len(),
            filename,
            transcript.origin
        );
        self.key_points_from_text(&transcript.text)
    }

    /// Generate a template from a type tag and raw key points.
    pub fn generate<S: AsRef<str>>(&self, template_type: &str, key_points: &[S]) -> Result<TemplateDocument> {
        let template_type = template_type.parse::<TemplateType>()?;
        let points = KeyPointList::from_points(key_points);

        if points.is_empty() {
            return Err(Error::Validation("Key points are required".to_string()));
        }

        Ok(self.builder.build(template_type, &points))
    }

    /// Generate a template and export it in one format.
    pub fn export<S: AsRef<str>>(
        &self,
        template_type: &str,
        key_points: &[S],
        format: ExportFormat,
    ) -> Result<ExportedArtifact> {
        let document = self.generate(template_type, key_points)?;
        let artifact = self
            .registry
            .export(format, &document, self.config.render_failure_policy)?;

        if artifact.is_empty() {
            log::warn!("{} export of {} produced an empty file", format, document.template_type);
        }
        Ok(artifact)
    }

    /// Write an artifact to `<dir>/<stem>.<ext>`, creating `dir` if needed.
    pub fn write_export(&self, artifact: &ExportedArtifact, dir: &Path, stem: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(artifact.file_name(stem));
        std::fs::write(&path, &artifact.bytes)?;
        log::debug!("Wrote {} bytes to {}", artifact.bytes.len(), path.display());
        Ok(path)
    }

    /// Publish content to an external document store, returning its URL.
    pub fn publish(&self, destination: PublishDestination, title: &str, content: &str) -> Result<String> {
        if content.trim().is_empty() {
            return Err(Error::Validation("Content is required".to_string()));
        }

        let publisher = self
            .publishers
            .get(&destination)
            .ok_or_else(|| Error::UnsupportedFormat(format!("No {} integration configured", destination)))?;

        let title = if title.trim().is_empty() {
            self.config.default_publish_title.as_str()
        } else {
            title
        };

        publisher.publish(title, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderFailurePolicy;
    use bizdoc_core::adapters::{PassthroughExtractor, SimulatedConversationSource, StaticConversationSource};
    use bizdoc_core::ports::google_docs_url;
    use bizdoc_docx::DocxExporter;
    use bizdoc_pdf::PdfRenderer;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// Extractor returning a fixed reply.
    struct CannedExtractor(Value);

    impl KeyPointExtractor for CannedExtractor {
        fn extract_key_points(&self, _text: &str) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    struct OfflineExtractor;

    impl KeyPointExtractor for OfflineExtractor {
        fn extract_key_points(&self, _text: &str) -> Result<Value> {
            Err(Error::CollaboratorFailure("connection refused".into()))
        }
    }

    struct MissingRenderer;

    impl PdfRenderer for MissingRenderer {
        fn render(&self, _html: &str) -> Result<Vec<u8>> {
            Err(Error::RenderFailure("not found".into()))
        }
    }

    /// Publisher remembering what it was asked to publish.
    struct RecordingPublisher {
        published: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl DocumentPublisher for RecordingPublisher {
        fn destination(&self) -> PublishDestination {
            PublishDestination::GoogleDocs
        }

        fn publish(&self, title: &str, content: &str) -> Result<String> {
            let mut published = self.published.lock().unwrap();
            published.push((title.to_string(), content.to_string()));
            Ok(google_docs_url(&format!("doc{}", published.len())))
        }
    }

    fn pipeline(extractor: Box<dyn KeyPointExtractor>) -> TemplatePipeline {
        TemplatePipeline::new(
            PipelineConfig::default(),
            extractor,
            ExporterRegistry::standard(Box::new(MissingRenderer)),
        )
    }

    #[test]
    fn test_key_points_from_text() {
        let p = pipeline(Box::new(CannedExtractor(json!("1. Reduce churn\n2. Expand to EU"))));
        let points = p.key_points_from_text("long meeting transcript").unwrap();
        assert_eq!(points.as_slice(), ["Reduce churn", "Expand to EU"]);
    }

    #[test]
    fn test_blank_transcript_is_validation_error() {
        let p = pipeline(Box::new(PassthroughExtractor));
        assert!(matches!(p.key_points_from_text("  \n "), Err(Error::Validation(_))));
    }

    #[test]
    fn test_extractor_error_object_propagates() {
        let p = pipeline(Box::new(CannedExtractor(json!({ "error": "quota exceeded" }))));
        let err = p.key_points_from_text("transcript").unwrap_err();
        assert!(matches!(err, Error::CollaboratorFailure(ref m) if m == "quota exceeded"));
    }

    #[test]
    fn test_extractor_transport_failure_propagates() {
        let p = pipeline(Box::new(OfflineExtractor));
        assert!(matches!(
            p.key_points_from_text("transcript"),
            Err(Error::CollaboratorFailure(_))
        ));
    }

    #[test]
    fn test_key_points_from_conversation() {
        let p = pipeline(Box::new(PassthroughExtractor))
            .with_source(Box::new(SimulatedConversationSource::new(Platform::WhatsApp)));
        let points = p.key_points_from_conversation(Platform::WhatsApp, "77").unwrap();
        assert_eq!(points.as_slice(), ["Sample WhatsApp conversation for thread ID: 77"]);
    }

    #[test]
    fn test_conversation_validation_and_routing() {
        let p = pipeline(Box::new(PassthroughExtractor))
            .with_source(Box::new(StaticConversationSource::new(Platform::Slack).with_conversation("C1", "   ")));

        assert!(matches!(
            p.key_points_from_conversation(Platform::Slack, ""),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            p.key_points_from_conversation(Platform::Slack, "C1"),
            Err(Error::CollaboratorFailure(_))
        ));
        assert!(matches!(
            p.key_points_from_conversation(Platform::Teams, "T1"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_key_points_from_upload() {
        let p = pipeline(Box::new(PassthroughExtractor));
        let points = p
            .key_points_from_upload(b"1. Hire a CFO\n\n2. Raise seed", "notes.txt")
            .unwrap();
        assert_eq!(points.as_slice(), ["Hire a CFO", "Raise seed"]);
    }

    #[test]
    fn test_upload_with_bad_encoding() {
        let p = pipeline(Box::new(PassthroughExtractor));
        let err = p.key_points_from_upload(&[0xc3, 0x28], "notes.txt").unwrap_err();
        assert!(matches!(err, Error::UnsupportedEncoding(_)));
    }

    #[test]
    fn test_generate() {
        let p = pipeline(Box::new(PassthroughExtractor));
        let doc = p.generate("business_plan", &["Reduce churn", "Expand to EU"]).unwrap();
        assert_eq!(doc.content, "Business Plan:\n\n1. Reduce churn\n2. Expand to EU");
    }

    #[test]
    fn test_generate_requires_key_points() {
        let p = pipeline(Box::new(PassthroughExtractor));
        let empty: [&str; 0] = [];
        assert!(matches!(p.generate("pitch_deck", &empty), Err(Error::Validation(_))));
        assert!(matches!(p.generate("pitch_deck", &["", "  "]), Err(Error::Validation(_))));
        assert!(matches!(
            p.generate("newsletter", &["A point"]),
            Err(Error::UnknownTemplateType(_))
        ));
    }

    #[test]
    fn test_export_masks_pdf_failure_by_default() {
        let p = pipeline(Box::new(PassthroughExtractor));
        let artifact = p.export("business_plan", &["Point A"], ExportFormat::Pdf).unwrap();
        assert!(artifact.is_empty());
        assert_eq!(artifact.mime_type(), "application/pdf");
    }

    #[test]
    fn test_export_propagates_when_strict() {
        let p = TemplatePipeline::new(
            PipelineConfig::default().with_render_failure_policy(RenderFailurePolicy::Propagate),
            Box::new(PassthroughExtractor),
            ExporterRegistry::standard(Box::new(MissingRenderer)),
        );
        let result = p.export("business_plan", &["Point A"], ExportFormat::Pdf);
        assert!(matches!(result, Err(Error::RenderFailure(_))));
    }

    #[test]
    fn test_write_export() {
        let p = TemplatePipeline::new(
            PipelineConfig::default(),
            Box::new(PassthroughExtractor),
            ExporterRegistry::new().with_exporter(Box::new(DocxExporter::new())),
        );
        let artifact = p.export("pitch_deck", &["Problem"], ExportFormat::Word).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("exports");
        let path = p.write_export(&artifact, &out_dir, "pitch_deck").unwrap();

        assert_eq!(path, out_dir.join("pitch_deck.docx"));
        assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes);
    }

    #[test]
    fn test_publish() {
        let published = Arc::new(Mutex::new(Vec::new()));
        let p = pipeline(Box::new(PassthroughExtractor)).with_publisher(Box::new(RecordingPublisher {
            published: published.clone(),
        }));

        let url = p
            .publish(PublishDestination::GoogleDocs, "", "Business Plan:\n\n1. A")
            .unwrap();
        assert_eq!(url, "https://docs.google.com/document/d/doc1");
        assert_eq!(
            published.lock().unwrap()[0],
            ("Generated Template".to_string(), "Business Plan:\n\n1. A".to_string())
        );

        assert!(matches!(
            p.publish(PublishDestination::GoogleDocs, "T", ""),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            p.publish(PublishDestination::Notion, "T", "body"),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
