use crate::common::types::{Conversation, Message};

/// Sự kiện từ backend worker gửi lên UI.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// Fresh conversation list, most-recent-first.
    Conversations(Vec<Conversation>),
    /// Fresh message list for one conversation, chronological.
    Messages {
        conversation_id: String,
        messages: Vec<Message>,
    },
    ConversationCreated(Conversation),
    ConversationDeleted(String),
    /// A generateResponse round-trip finished, successfully or not.
    ResponseComplete {
        conversation_id: String,
    },
    /// A mutation failed; `context` is the user-facing notification text.
    RequestFailed {
        context: String,
    },
}
