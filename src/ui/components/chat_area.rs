use eframe::egui;

use crate::common::{Message, Role};
use crate::ui::format_time;
use crate::ui::markdown;
use crate::ui::state::AppState;

pub fn render(ui: &mut egui::Ui, state: &AppState) {
    if state.selected_conversation.is_none() {
        render_welcome(ui);
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if state.messages.is_empty() && !state.generating {
                render_empty_conversation(ui);
            } else {
                for message in &state.messages {
                    render_message(ui, message);
                }
            }

            if state.generating {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Generating response...");
                });
            }
        });
}

fn render_message(ui: &mut egui::Ui, message: &Message) {
    // Tin nhắn của user căn phải, assistant căn trái
    let align = match message.role {
        Role::User => egui::Align::Max,
        Role::Assistant => egui::Align::Min,
    };

    ui.with_layout(egui::Layout::top_down(align), |ui| {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.8);
                markdown::render(ui, &message.content);
                ui.label(
                    egui::RichText::new(format_time(message.timestamp))
                        .weak()
                        .small(),
                );
            });
    });
    ui.add_space(8.0);
}

fn render_welcome(ui: &mut egui::Ui) {
    ui.add_space(ui.available_height() * 0.3);
    ui.vertical_centered(|ui| {
        ui.heading("Welcome to your AI coding assistant");
        ui.add_space(6.0);
        ui.label("Start a new conversation to begin coding together.");
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new("Code review • Debugging • Architecture • Code examples").weak(),
        );
    });
}

fn render_empty_conversation(ui: &mut egui::Ui) {
    ui.add_space(ui.available_height() * 0.3);
    ui.vertical_centered(|ui| {
        ui.heading("Ready to code together!");
        ui.add_space(6.0);
        ui.label("Ask me anything about programming, debugging, architecture, or code review.");
    });
}
