//! Settings and user records kept in the document store.

use bizdoc_core::{DocumentStore, Error, Result};
use serde_json::Value;

const SETTINGS_COLLECTION: &str = "settings";
const USERS_COLLECTION: &str = "users";

/// Validated access to settings and user documents.
pub struct RecordService {
    store: Box<dyn DocumentStore>,
}

impl RecordService {
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Merge fields into an existing settings document.
    pub fn update_settings(&self, setting_id: &str, data: Value) -> Result<()> {
        require_record(setting_id, &data, "setting_id and settings_data are required")?;
        self.store.update(SETTINGS_COLLECTION, setting_id, data)
    }

    /// Create (or replace) a user document.
    pub fn create_user(&self, user_id: &str, data: Value) -> Result<()> {
        require_record(user_id, &data, "user_id and user_data are required")?;
        self.store.set(USERS_COLLECTION, user_id, data)
    }

    /// Read any document, failing with `NotFound` if it is absent.
    pub fn read_document(&self, collection: &str, id: &str) -> Result<Value> {
        self.store
            .get(collection, id)?
            .ok_or_else(|| Error::NotFound(format!("Document not found: {}/{}", collection, id)))
    }

    /// Delete any document.
    pub fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        self.store.delete(collection, id)
    }
}

fn require_record(id: &str, data: &Value, message: &str) -> Result<()> {
    let has_fields = matches!(data, Value::Object(map) if !map.is_empty());
    if id.trim().is_empty() || !has_fields {
        return Err(Error::Validation(message.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdoc_core::adapters::InMemoryDocumentStore;
    use serde_json::json;

    fn service() -> RecordService {
        RecordService::new(Box::new(InMemoryDocumentStore::new()))
    }

    #[test]
    fn test_create_and_read_user() {
        let records = service();
        records.create_user("u1", json!({ "name": "Ada", "plan": "pro" })).unwrap();
        assert_eq!(
            records.read_document("users", "u1").unwrap(),
            json!({ "name": "Ada", "plan": "pro" })
        );
    }

    #[test]
    fn test_record_validation() {
        let records = service();
        assert!(matches!(records.create_user("", json!({ "a": 1 })), Err(Error::Validation(_))));
        assert!(matches!(records.create_user("u1", json!({})), Err(Error::Validation(_))));
        assert!(matches!(records.update_settings("s1", json!("dark")), Err(Error::Validation(_))));
    }

    #[test]
    fn test_update_missing_settings() {
        let records = service();
        let err = records.update_settings("s1", json!({ "theme": "dark" })).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_delete_then_read() {
        let records = service();
        records.create_user("u1", json!({ "name": "Ada" })).unwrap();
        records.delete_document("users", "u1").unwrap();
        assert!(matches!(records.read_document("users", "u1"), Err(Error::NotFound(_))));
    }
}
