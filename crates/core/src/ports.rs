//! Interfaces to exporters and external collaborators.
//!
//! The pipeline receives these as explicit dependencies so every external
//! system can be substituted with an in-memory fake.

use crate::error::Result;
use crate::types::{ExportFormat, TemplateDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Serializes a template document into one output format.
pub trait Exporter: Send + Sync {
    /// The format this exporter produces.
    fn format(&self) -> ExportFormat;

    /// Export the document. Empty content yields empty bytes, not an error.
    fn export(&self, document: &TemplateDocument) -> Result<Vec<u8>>;
}

/// Language-model key-point extraction.
pub trait KeyPointExtractor: Send + Sync {
    /// Extract key points from transcript text.
    ///
    /// The reply is a string, a list of strings, or an object with an
    /// `error` field. Transport failures are returned as errors.
    fn extract_key_points(&self, text: &str) -> Result<Value>;
}

/// Chat platforms conversations can be fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Slack,
    WhatsApp,
    Teams,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Slack => "Slack",
            Platform::WhatsApp => "WhatsApp",
            Platform::Teams => "Teams",
        };
        f.write_str(name)
    }
}

/// Fetches a conversation transcript from a chat platform.
pub trait ConversationSource: Send + Sync {
    /// The platform this source talks to.
    fn platform(&self) -> Platform;

    /// Fetch the conversation (channel, thread, or team) as raw text.
    fn fetch_conversation(&self, id: &str) -> Result<String>;
}

/// External document stores a template can be published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishDestination {
    GoogleDocs,
    Notion,
}

impl fmt::Display for PublishDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishDestination::GoogleDocs => "Google Docs",
            PublishDestination::Notion => "Notion",
        };
        f.write_str(name)
    }
}

/// Link to a Google Docs document by its id.
pub fn google_docs_url(document_id: &str) -> String {
    format!("https://docs.google.com/document/d/{}", document_id)
}

/// Creates a document in an external store and returns its URL.
pub trait DocumentPublisher: Send + Sync {
    /// The destination this publisher writes to.
    fn destination(&self) -> PublishDestination;

    /// Create a document with the given title and body.
    fn publish(&self, title: &str, content: &str) -> Result<String>;
}

/// Key-value document database holding settings and users.
pub trait DocumentStore: Send + Sync {
    /// Read a document, `None` if it does not exist.
    fn get(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Create or replace a document.
    fn set(&self, collection: &str, id: &str, data: Value) -> Result<()>;

    /// Merge top-level fields into an existing document.
    fn update(&self, collection: &str, id: &str, data: Value) -> Result<()>;

    /// Delete a document. Deleting a missing document succeeds.
    fn delete(&self, collection: &str, id: &str) -> Result<()>;
}
