use eframe::egui;

use crate::ui::state::AppState;

/// Composer. Returns the trimmed user text when a send was triggered.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Option<String> {
    let mut send = false;

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(state.can_send(), egui::Button::new("Send"))
                .clicked()
            {
                send = true;
            }

            let editor = egui::TextEdit::multiline(&mut state.input_text)
                .desired_rows(3)
                .desired_width(ui.available_width())
                .hint_text("Ask about code, debugging, architecture, or paste code for review...");
            let response = ui.add_enabled(!state.generating, editor);

            // Ctrl+Enter (Cmd+Enter trên macOS) để gửi
            if response.has_focus()
                && ui.input(|i| i.key_pressed(egui::Key::Enter) && i.modifiers.command)
            {
                send = true;
            }
        });
    });
    ui.label(egui::RichText::new("Ctrl+Enter to send").weak().small());
    ui.add_space(4.0);

    if send && state.can_send() {
        let content = state.input_text.trim().to_string();
        state.input_text.clear();
        return Some(content);
    }

    None
}
