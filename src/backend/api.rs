use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Serialize;

use crate::common::{Conversation, Message};
use crate::config::AppConfig;

/// HTTP client for the coding-assistant backend.
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    session_id: String,
    generate_timeout: Duration,
}

#[derive(Serialize)]
struct CreateConversationRequest<'a> {
    title: &'a str,
    session_id: &'a str,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    content: &'a str,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session_id: String) -> Result<Self, reqwest::Error> {
        let http = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            session_id,
            generate_timeout: config.generate_timeout(),
        })
    }

    /// All conversations for this session, most-recent-first.
    pub async fn get_conversations(&self) -> Result<Vec<Conversation>, reqwest::Error> {
        let url = format!("{}/conversations", self.base_url);
        let mut conversations = self
            .http
            .get(&url)
            .query(&[("session_id", self.session_id.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Conversation>>()
            .await?;

        // Backend already orders these; re-sort in case it does not.
        sort_conversations(&mut conversations);
        Ok(conversations)
    }

    /// All messages of one conversation, chronological.
    pub async fn get_messages(&self, conversation_id: &str) -> Result<Vec<Message>, reqwest::Error> {
        let url = format!("{}/conversations/{conversation_id}/messages", self.base_url);
        let mut messages = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Message>>()
            .await?;

        sort_messages(&mut messages);
        Ok(messages)
    }

    pub async fn create_conversation(&self, title: &str) -> Result<Conversation, reqwest::Error> {
        let url = format!("{}/conversations", self.base_url);
        let req = CreateConversationRequest {
            title,
            session_id: &self.session_id,
        };
        let conversation = self
            .http
            .post(&url)
            .json(&req)
            .send()
            .await?
            .error_for_status()?
            .json::<Conversation>()
            .await?;
        Ok(conversation)
    }

    pub async fn delete_conversation(&self, conversation_id: &str) -> Result<(), reqwest::Error> {
        let url = format!("{}/conversations/{conversation_id}", self.base_url);
        self.http
            .delete(&url)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Submit user text; resolves once the backend has appended both the
    /// user and the assistant message.
    pub async fn generate_response(
        &self,
        conversation_id: &str,
        content: &str,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/conversations/{conversation_id}/generate", self.base_url);
        let req = GenerateRequest { content };
        self.http
            .post(&url)
            .timeout(self.generate_timeout)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

fn sort_conversations(conversations: &mut [Conversation]) {
    conversations.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));
}

fn sort_messages(messages: &mut [Message]) {
    messages.sort_by_key(|message| message.timestamp);
}
