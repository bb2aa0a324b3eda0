pub mod conversations;
pub mod kv;

pub use conversations::{ConversationRecord, ConversationStore, MemoryConversations, StoredMessage};
pub use kv::{KvError, KvStore, MemoryKv};
