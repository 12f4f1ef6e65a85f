use chrono::Local;
use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{BackendCommand, BackendEvent};

use super::components::sidebar::SidebarAction;
use super::components::{chat_area, input_bar, sidebar, toasts};
use super::state::AppState;

pub struct ChatApp {
    state: AppState,
    command_sender: mpsc::Sender<BackendCommand>,
    event_receiver: mpsc::Receiver<BackendEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        session_id: String,
        command_sender: mpsc::Sender<BackendCommand>,
        event_receiver: mpsc::Receiver<BackendEvent>,
    ) -> Self {
        Self {
            state: AppState::new(session_id),
            command_sender,
            event_receiver,
        }
    }

    fn handle_backend_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.apply_event(event);
        }
    }

    fn send_command(&mut self, command: BackendCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to backend worker: {err}");
        }
    }

    fn handle_sidebar_action(&mut self, action: SidebarAction) {
        match action {
            SidebarAction::Create => {
                let title = format!("Coding Session {}", Local::now().format("%Y-%m-%d"));
                self.send_command(BackendCommand::CreateConversation { title });
            }
            SidebarAction::Select(conversation_id) => {
                self.state.select_conversation(conversation_id.clone());
                self.send_command(BackendCommand::OpenConversation(conversation_id));
            }
            // Selection is cleared once the backend confirms the delete.
            SidebarAction::Delete(conversation_id) => {
                self.send_command(BackendCommand::DeleteConversation(conversation_id));
            }
        }
    }

    fn send_user_message(&mut self, content: String) {
        let Some(conversation_id) = self.state.selected_conversation.clone() else {
            return;
        };
        self.state.generating = true;
        self.send_command(BackendCommand::SendMessage {
            conversation_id,
            content,
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_backend_events();
        self.state.prune_toasts();

        let mut sidebar_action = None;
        egui::SidePanel::left("conversation_sidebar")
            .default_width(260.0)
            .show(ctx, |ui| {
                sidebar_action = sidebar::render(ui, &self.state);
            });
        if let Some(action) = sidebar_action {
            self.handle_sidebar_action(action);
        }

        let mut outgoing = None;
        egui::TopBottomPanel::bottom("composer").show(ctx, |ui| {
            if self.state.selected_conversation.is_some() {
                outgoing = input_bar::render(ui, &mut self.state);
            }
        });
        if let Some(content) = outgoing {
            self.send_user_message(content);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            chat_area::render(ui, &self.state);
        });

        toasts::render(ctx, &self.state.toasts);

        // Backend events arrive outside the frame loop; keep polling.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
