/// Lệnh UI gửi xuống backend worker.
#[derive(Debug, Clone)]
pub enum BackendCommand {
    /// Re-fetch the conversation list for the current session.
    RefreshConversations,
    /// Mark a conversation as open; the worker fetches its messages
    /// immediately and keeps them fresh on every refresh tick.
    OpenConversation(String),
    /// Stop refreshing messages (no conversation selected).
    CloseConversation,
    CreateConversation {
        title: String,
    },
    DeleteConversation(String),
    /// Submit user text; the backend appends the user message and the
    /// generated assistant message to the conversation.
    SendMessage {
        conversation_id: String,
        content: String,
    },
}
