use serde::{Deserialize, Serialize};

/// Tác giả của một tin nhắn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Một cuộc hội thoại thuộc về một session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    /// Unix millis of the newest message in the conversation.
    pub last_message_at: i64,
    pub session_id: String,
}

/// Domain model đại diện một tin nhắn chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub role: Role,
    pub content: String,
    /// Unix millis.
    pub timestamp: i64,
}
