use eframe::egui;

use crate::ui::format_date;
use crate::ui::state::AppState;

/// What the user did in the sidebar this frame, if anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarAction {
    Create,
    Select(String),
    Delete(String),
}

pub fn render(ui: &mut egui::Ui, state: &AppState) -> Option<SidebarAction> {
    let mut action = None;

    ui.add_space(8.0);
    let new_button = egui::Button::new("+ New Conversation");
    if ui
        .add_sized([ui.available_width(), 30.0], new_button)
        .clicked()
    {
        action = Some(SidebarAction::Create);
    }
    ui.add_space(4.0);
    ui.separator();

    // Session token là danh tính duy nhất của người dùng ẩn danh
    egui::TopBottomPanel::bottom("session_footer").show_inside(ui, |ui| {
        let short = &state.session_id[..12.min(state.session_id.len())];
        ui.label(egui::RichText::new(format!("Session {short}")).weak().small());
    });

    if state.conversations.is_empty() {
        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            ui.label("Start your first conversation!");
            ui.label(
                egui::RichText::new("Click \"New Conversation\" above")
                    .weak()
                    .small(),
            );
        });
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for conversation in &state.conversations {
            let selected = state.is_selected(&conversation.id);

            ui.horizontal(|ui| {
                // Nút xóa nằm bên phải
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("×").clicked() {
                        action = Some(SidebarAction::Delete(conversation.id.clone()));
                    }
                    ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                        if ui
                            .selectable_label(selected, conversation.title.as_str())
                            .clicked()
                        {
                            action = Some(SidebarAction::Select(conversation.id.clone()));
                        }
                    });
                });
            });
            ui.label(
                egui::RichText::new(format_date(conversation.last_message_at))
                    .weak()
                    .small(),
            );
            ui.separator();
        }
    });

    action
}
