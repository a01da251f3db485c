//! In-process implementations of the collaborator ports.

use crate::error::{Error, Result};
use crate::ports::{ConversationSource, DocumentStore, KeyPointExtractor, Platform};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// Conversation source that returns a canned sample transcript for any id.
#[derive(Debug, Clone)]
pub struct SimulatedConversationSource {
    platform: Platform,
}

impl SimulatedConversationSource {
    /// Create a simulated source for a platform.
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl ConversationSource for SimulatedConversationSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn fetch_conversation(&self, id: &str) -> Result<String> {
        let scope = match self.platform {
            Platform::Slack => "channel",
            Platform::WhatsApp => "thread",
            Platform::Teams => "team",
        };
        Ok(format!(
            "Sample {} conversation for {} ID: {}",
            self.platform, scope, id
        ))
    }
}

/// Conversation source backed by a fixed set of transcripts.
#[derive(Debug, Clone)]
pub struct StaticConversationSource {
    platform: Platform,
    conversations: HashMap<String, String>,
}

impl StaticConversationSource {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            conversations: HashMap::new(),
        }
    }

    /// Add a transcript for a conversation id.
    pub fn with_conversation(mut self, id: impl Into<String>, transcript: impl Into<String>) -> Self {
        self.conversations.insert(id.into(), transcript.into());
        self
    }
}

impl ConversationSource for StaticConversationSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn fetch_conversation(&self, id: &str) -> Result<String> {
        self.conversations.get(id).cloned().ok_or_else(|| {
            Error::CollaboratorFailure(format!(
                "Failed to fetch {} conversation: {}",
                self.platform, id
            ))
        })
    }
}

/// Extractor that hands the transcript back unchanged, one key point per line.
///
/// Used when no language model is configured.
#[derive(Debug, Clone, Default)]
pub struct PassthroughExtractor;

impl KeyPointExtractor for PassthroughExtractor {
    fn extract_key_points(&self, text: &str) -> Result<Value> {
        Ok(Value::String(text.to_string()))
    }
}

/// Document store held in memory.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<(String, String), Value>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> Error {
    Error::CollaboratorFailure("Document store lock poisoned".to_string())
}

fn key(collection: &str, id: &str) -> (String, String) {
    (collection.to_string(), id.to_string())
}

impl DocumentStore for InMemoryDocumentStore {
    fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let documents = self.documents.read().map_err(|_| poisoned())?;
        Ok(documents.get(&key(collection, id)).cloned())
    }

    fn set(&self, collection: &str, id: &str, data: Value) -> Result<()> {
        let mut documents = self.documents.write().map_err(|_| poisoned())?;
        documents.insert(key(collection, id), data);
        Ok(())
    }

    fn update(&self, collection: &str, id: &str, data: Value) -> Result<()> {
        let mut documents = self.documents.write().map_err(|_| poisoned())?;
        let existing = documents
            .get_mut(&key(collection, id))
            .ok_or_else(|| Error::NotFound(format!("{}/{}", collection, id)))?;

        match (existing, data) {
            (Value::Object(current), Value::Object(fields)) => {
                for (field, value) in fields {
                    current.insert(field, value);
                }
            }
            (existing, data) => *existing = data,
        }
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let mut documents = self.documents.write().map_err(|_| poisoned())?;
        documents.remove(&key(collection, id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simulated_sources() {
        let whatsapp = SimulatedConversationSource::new(Platform::WhatsApp);
        assert_eq!(
            whatsapp.fetch_conversation("42").unwrap(),
            "Sample WhatsApp conversation for thread ID: 42"
        );

        let teams = SimulatedConversationSource::new(Platform::Teams);
        assert_eq!(
            teams.fetch_conversation("eng").unwrap(),
            "Sample Teams conversation for team ID: eng"
        );
    }

    #[test]
    fn test_static_source_missing_id() {
        let source = StaticConversationSource::new(Platform::Slack).with_conversation("C1", "hi");
        assert_eq!(source.fetch_conversation("C1").unwrap(), "hi");
        assert!(matches!(
            source.fetch_conversation("C2"),
            Err(Error::CollaboratorFailure(_))
        ));
    }

    #[test]
    fn test_store_update_merges_fields() {
        let store = InMemoryDocumentStore::new();
        store
            .set("settings", "s1", json!({ "theme": "dark", "lang": "en" }))
            .unwrap();
        store.update("settings", "s1", json!({ "lang": "de" })).unwrap();

        assert_eq!(
            store.get("settings", "s1").unwrap(),
            Some(json!({ "theme": "dark", "lang": "de" }))
        );
    }

    #[test]
    fn test_store_update_missing_document() {
        let store = InMemoryDocumentStore::new();
        let err = store.update("settings", "nope", json!({ "a": 1 })).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_store_delete() {
        let store = InMemoryDocumentStore::new();
        store.set("users", "u1", json!({ "name": "Ada" })).unwrap();
        store.delete("users", "u1").unwrap();
        store.delete("users", "u1").unwrap();
        assert_eq!(store.get("users", "u1").unwrap(), None);
    }
}
