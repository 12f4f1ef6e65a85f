use crate::common::{BackendEvent, Conversation, Message};

use super::components::toasts::Toast;

/// Trạng thái cục bộ của UI. Everything durable lives on the backend;
/// this is only what the current frame needs.
pub struct AppState {
    pub session_id: String,
    pub conversations: Vec<Conversation>,
    pub selected_conversation: Option<String>,
    /// Messages of the selected conversation, chronological.
    pub messages: Vec<Message>,
    pub input_text: String,
    /// True while a generateResponse round-trip is in flight.
    pub generating: bool,
    pub toasts: Vec<Toast>,
}

impl AppState {
    pub fn new(session_id: String) -> Self {
        Self {
            session_id,
            conversations: Vec::new(),
            selected_conversation: None,
            messages: Vec::new(),
            input_text: String::new(),
            generating: false,
            toasts: Vec::new(),
        }
    }

    /// The composer may submit only when a conversation is open, nothing
    /// is generating, and the input is not just whitespace.
    pub fn can_send(&self) -> bool {
        self.selected_conversation.is_some()
            && !self.generating
            && !self.input_text.trim().is_empty()
    }

    pub fn is_selected(&self, conversation_id: &str) -> bool {
        self.selected_conversation.as_deref() == Some(conversation_id)
    }

    pub fn select_conversation(&mut self, conversation_id: String) {
        if !self.is_selected(&conversation_id) {
            self.messages.clear();
        }
        self.selected_conversation = Some(conversation_id);
    }

    pub fn clear_selection(&mut self) {
        self.selected_conversation = None;
        self.messages.clear();
    }

    pub fn apply_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Conversations(conversations) => {
                // Backend scopes these by session already; drop strays.
                self.conversations = conversations
                    .into_iter()
                    .filter(|c| c.session_id == self.session_id)
                    .collect();
                // Selection may have been deleted from another client.
                if let Some(selected) = self.selected_conversation.clone() {
                    if !self.conversations.iter().any(|c| c.id == selected) {
                        self.clear_selection();
                    }
                }
            }
            BackendEvent::Messages {
                conversation_id,
                messages,
            } => {
                if self.is_selected(&conversation_id) {
                    self.messages = messages
                        .into_iter()
                        .filter(|m| m.conversation_id == conversation_id)
                        .collect();
                }
            }
            BackendEvent::ConversationCreated(conversation) => {
                self.select_conversation(conversation.id.clone());
                self.conversations.insert(0, conversation);
            }
            BackendEvent::ConversationDeleted(conversation_id) => {
                self.conversations.retain(|c| c.id != conversation_id);
                if self.is_selected(&conversation_id) {
                    self.clear_selection();
                }
                self.push_toast(Toast::success("Conversation deleted"));
            }
            // Only one generation is ever in flight, so no id check here.
            BackendEvent::ResponseComplete { conversation_id } => {
                log::debug!("Generation finished for {conversation_id}");
                self.generating = false;
            }
            BackendEvent::RequestFailed { context } => {
                self.push_toast(Toast::error(context));
            }
        }
    }

    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
        // Giữ tối đa 5 toasts trên màn hình.
        if self.toasts.len() > 5 {
            self.toasts.remove(0);
        }
    }

    pub fn prune_toasts(&mut self) {
        self.toasts.retain(|toast| !toast.expired());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Role;
    use crate::ui::components::toasts::ToastLevel;

    fn state() -> AppState {
        AppState::new("session".to_string())
    }

    fn conversation(id: &str) -> Conversation {
        Conversation {
            id: id.to_string(),
            title: format!("Conversation {id}"),
            last_message_at: 0,
            session_id: "session".to_string(),
        }
    }

    fn message(id: &str, conversation_id: &str) -> Message {
        Message {
            id: id.to_string(),
            conversation_id: conversation_id.to_string(),
            role: Role::User,
            content: "hi".to_string(),
            timestamp: 0,
        }
    }

    #[test]
    fn cannot_send_without_selection() {
        let mut state = state();
        state.input_text = "hello".to_string();
        assert!(!state.can_send());
    }

    #[test]
    fn cannot_send_empty_or_whitespace_input() {
        let mut state = state();
        state.selected_conversation = Some("a".to_string());
        assert!(!state.can_send());
        state.input_text = "   \n\t".to_string();
        assert!(!state.can_send());
    }

    #[test]
    fn cannot_send_while_generating() {
        let mut state = state();
        state.selected_conversation = Some("a".to_string());
        state.input_text = "hello".to_string();
        state.generating = true;
        assert!(!state.can_send());
        state.generating = false;
        assert!(state.can_send());
    }

    #[test]
    fn deleting_selected_conversation_clears_selection() {
        let mut state = state();
        state.conversations = vec![conversation("a"), conversation("b")];
        state.select_conversation("a".to_string());
        state.messages = vec![message("m1", "a")];

        state.apply_event(BackendEvent::ConversationDeleted("a".to_string()));

        assert!(state.selected_conversation.is_none());
        assert!(state.messages.is_empty());
        assert_eq!(state.conversations.len(), 1);
        assert_eq!(state.toasts.last().unwrap().level, ToastLevel::Success);
    }

    #[test]
    fn deleting_other_conversation_keeps_selection() {
        let mut state = state();
        state.conversations = vec![conversation("a"), conversation("b")];
        state.select_conversation("a".to_string());

        state.apply_event(BackendEvent::ConversationDeleted("b".to_string()));

        assert_eq!(state.selected_conversation.as_deref(), Some("a"));
    }

    #[test]
    fn messages_for_other_conversation_are_ignored() {
        let mut state = state();
        state.select_conversation("a".to_string());

        state.apply_event(BackendEvent::Messages {
            conversation_id: "b".to_string(),
            messages: vec![message("m1", "b")],
        });

        assert!(state.messages.is_empty());
    }

    #[test]
    fn created_conversation_is_selected_and_listed_first() {
        let mut state = state();
        state.conversations = vec![conversation("old")];

        state.apply_event(BackendEvent::ConversationCreated(conversation("new")));

        assert_eq!(state.selected_conversation.as_deref(), Some("new"));
        assert_eq!(state.conversations[0].id, "new");
    }

    #[test]
    fn foreign_session_conversations_are_dropped() {
        let mut state = state();
        let mut foreign = conversation("x");
        foreign.session_id = "someone-else".to_string();

        state.apply_event(BackendEvent::Conversations(vec![conversation("a"), foreign]));

        assert_eq!(state.conversations.len(), 1);
        assert_eq!(state.conversations[0].id, "a");
    }

    #[test]
    fn refresh_without_selected_conversation_clears_selection() {
        let mut state = state();
        state.conversations = vec![conversation("a")];
        state.select_conversation("a".to_string());

        state.apply_event(BackendEvent::Conversations(vec![conversation("b")]));

        assert!(state.selected_conversation.is_none());
    }

    #[test]
    fn response_complete_clears_generating_flag() {
        let mut state = state();
        state.select_conversation("a".to_string());
        state.generating = true;

        state.apply_event(BackendEvent::ResponseComplete {
            conversation_id: "a".to_string(),
        });

        assert!(!state.generating);
    }

    #[test]
    fn failed_request_becomes_error_toast() {
        let mut state = state();
        state.apply_event(BackendEvent::RequestFailed {
            context: "Failed to generate response".to_string(),
        });

        let toast = state.toasts.last().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(toast.message, "Failed to generate response");
    }

    #[test]
    fn selecting_another_conversation_drops_stale_messages() {
        let mut state = state();
        state.select_conversation("a".to_string());
        state.messages = vec![message("m1", "a")];

        state.select_conversation("b".to_string());

        assert!(state.messages.is_empty());
    }
}
