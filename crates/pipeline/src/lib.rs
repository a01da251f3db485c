//! Transcript extraction, export dispatch, and the end-to-end pipeline
//! from conversations to exported business documents.

pub mod config;
pub mod extractor;
pub mod pipeline;
pub mod records;
pub mod registry;

pub use config::{PipelineConfig, RenderFailurePolicy};
pub use extractor::TranscriptExtractor;
pub use pipeline::TemplatePipeline;
pub use records::RecordService;
pub use registry::ExporterRegistry;
