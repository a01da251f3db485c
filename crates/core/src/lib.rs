//! Core domain types, key-point normalization, and template building
//! for turning conversation transcripts into business documents.

pub mod adapters;
pub mod error;
pub mod industry;
pub mod normalize;
pub mod ports;
pub mod template;
pub mod types;

pub use error::{Error, ErrorClass, Result};
pub use normalize::KeyPointNormalizer;
pub use ports::{
    ConversationSource, DocumentPublisher, DocumentStore, Exporter, KeyPointExtractor, Platform,
    PublishDestination,
};
pub use template::TemplateBuilder;
pub use types::{
    ExportFormat, ExportedArtifact, KeyPointList, TemplateDocument, TemplateType, Transcript,
    TranscriptKind,
};
