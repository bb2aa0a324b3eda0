use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::kv::KvError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct ConversationRecord {
    pub id: String,
    pub title: Option<String>,
    pub messages: Vec<StoredMessage>,
}

/// Persistence port for conversations. The gateway itself never persists
/// anything; a real adapter is supplied externally, and the in-memory one
/// below backs the demo endpoints and tests.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn list(&self) -> Result<Vec<ConversationRecord>, KvError>;

    async fn create(&self, title: Option<String>) -> Result<String, KvError>;

    async fn get(&self, id: &str) -> Result<Option<ConversationRecord>, KvError>;

    /// Appends to a conversation; returns whether the conversation existed.
    async fn append(&self, id: &str, message: StoredMessage) -> Result<bool, KvError>;

    /// Deletes a conversation; returns whether anything was removed.
    async fn delete(&self, id: &str) -> Result<bool, KvError>;
}

#[derive(Default)]
pub struct MemoryConversations {
    records: DashMap<String, ConversationRecord>,
}

impl MemoryConversations {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for MemoryConversations {
    async fn list(&self) -> Result<Vec<ConversationRecord>, KvError> {
        Ok(self.records.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn create(&self, title: Option<String>) -> Result<String, KvError> {
        let id = format!("conv_{}", Uuid::new_v4().simple());
        self.records.insert(
            id.clone(),
            ConversationRecord {
                id: id.clone(),
                title,
                messages: Vec::new(),
            },
        );
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<ConversationRecord>, KvError> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn append(&self, id: &str, message: StoredMessage) -> Result<bool, KvError> {
        match self.records.get_mut(id) {
            Some(mut entry) => {
                entry.messages.push(message);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, KvError> {
        Ok(self.records.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_get_append_delete() {
        let store = MemoryConversations::new();
        let id = store.create(Some("demo".to_string())).await.unwrap();
        assert!(id.starts_with("conv_"));

        let appended = store
            .append(
                &id,
                StoredMessage {
                    role: "user".to_string(),
                    content: "hi".to_string(),
                },
            )
            .await
            .unwrap();
        assert!(appended);

        let record = store.get(&id).await.unwrap().unwrap();
        assert_eq!(record.messages.len(), 1);

        assert!(store.delete(&id).await.unwrap());
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn append_to_unknown_conversation_is_noop() {
        let store = MemoryConversations::new();
        let appended = store
            .append(
                "conv_missing",
                StoredMessage {
                    role: "user".to_string(),
                    content: "hi".to_string(),
                },
            )
            .await
            .unwrap();
        assert!(!appended);
    }
}
