use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::common::{BackendCommand, BackendEvent};

use super::api::ApiClient;

/// Async half of the app: executes remote calls on behalf of the UI and
/// keeps the conversation list and the open conversation's messages fresh.
pub struct BackendWorker {
    api: ApiClient,
    event_sender: mpsc::Sender<BackendEvent>,
    command_receiver: mpsc::Receiver<BackendCommand>,
    refresh_interval: Duration,
    open_conversation: Option<String>,
}

impl BackendWorker {
    pub fn new(
        api: ApiClient,
        event_sender: mpsc::Sender<BackendEvent>,
        command_receiver: mpsc::Receiver<BackendCommand>,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            api,
            event_sender,
            command_receiver,
            refresh_interval,
            open_conversation: None,
        }
    }

    pub async fn run(mut self) {
        log::info!("Backend worker started");

        // The first tick fires immediately, which doubles as the initial load.
        let mut refresh = tokio::time::interval(self.refresh_interval);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                command = self.command_receiver.recv() => {
                    match command {
                        Some(command) => self.handle_command(command).await,
                        // UI dropped its sender; shut down.
                        None => break,
                    }
                }
                _ = refresh.tick() => {
                    self.refresh_conversations().await;
                    if let Some(id) = self.open_conversation.clone() {
                        self.refresh_messages(&id).await;
                    }
                }
            }
        }

        log::info!("Backend worker stopped");
    }

    async fn handle_command(&mut self, command: BackendCommand) {
        match command {
            BackendCommand::RefreshConversations => self.refresh_conversations().await,
            BackendCommand::OpenConversation(id) => {
                self.open_conversation = Some(id.clone());
                self.refresh_messages(&id).await;
            }
            BackendCommand::CloseConversation => self.open_conversation = None,
            BackendCommand::CreateConversation { title } => {
                match self.api.create_conversation(&title).await {
                    Ok(conversation) => {
                        self.open_conversation = Some(conversation.id.clone());
                        self.emit(BackendEvent::ConversationCreated(conversation))
                            .await;
                        self.refresh_conversations().await;
                    }
                    Err(err) => {
                        log::warn!("createConversation failed: {err}");
                        self.fail("Failed to create conversation").await;
                    }
                }
            }
            BackendCommand::DeleteConversation(id) => {
                match self.api.delete_conversation(&id).await {
                    Ok(()) => {
                        if self.open_conversation.as_deref() == Some(id.as_str()) {
                            self.open_conversation = None;
                        }
                        self.emit(BackendEvent::ConversationDeleted(id)).await;
                        self.refresh_conversations().await;
                    }
                    Err(err) => {
                        log::warn!("deleteConversation failed: {err}");
                        self.fail("Failed to delete conversation").await;
                    }
                }
            }
            BackendCommand::SendMessage {
                conversation_id,
                content,
            } => {
                match self.api.generate_response(&conversation_id, &content).await {
                    Ok(()) => {
                        self.refresh_messages(&conversation_id).await;
                        self.refresh_conversations().await;
                    }
                    Err(err) => {
                        log::warn!("generateResponse failed: {err}");
                        self.fail("Failed to generate response").await;
                    }
                }
                // Always release the composer, like a `finally` block.
                self.emit(BackendEvent::ResponseComplete { conversation_id })
                    .await;
            }
        }
    }

    /// Periodic read failures are logged, not toasted; a dead backend
    /// would otherwise spam a notification every tick.
    async fn refresh_conversations(&mut self) {
        match self.api.get_conversations().await {
            Ok(conversations) => {
                self.emit(BackendEvent::Conversations(conversations)).await;
            }
            Err(err) => log::warn!("getConversations failed: {err}"),
        }
    }

    async fn refresh_messages(&mut self, conversation_id: &str) {
        match self.api.get_messages(conversation_id).await {
            Ok(messages) => {
                self.emit(BackendEvent::Messages {
                    conversation_id: conversation_id.to_string(),
                    messages,
                })
                .await;
            }
            Err(err) => log::warn!("getMessages failed: {err}"),
        }
    }

    async fn fail(&mut self, context: &str) {
        self.emit(BackendEvent::RequestFailed {
            context: context.to_string(),
        })
        .await;
    }

    async fn emit(&mut self, event: BackendEvent) {
        if let Err(err) = self.event_sender.send(event).await {
            log::warn!("Failed to notify UI: {err}");
        }
    }
}
