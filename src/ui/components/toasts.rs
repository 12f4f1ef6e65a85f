use std::time::{Duration, Instant};

use eframe::egui;

const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// Transient notification shown in the bottom-right corner.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    created_at: Instant,
}

impl Toast {
    fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error)
    }

    pub fn expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_LIFETIME
    }
}

pub fn render(ctx: &egui::Context, toasts: &[Toast]) {
    if toasts.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toast_stack"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .interactable(false)
        .show(ctx, |ui| {
            for toast in toasts {
                let fill = match toast.level {
                    ToastLevel::Success => egui::Color32::DARK_GREEN,
                    ToastLevel::Error => egui::Color32::DARK_RED,
                };
                egui::Frame::popup(ui.style()).fill(fill).show(ui, |ui| {
                    ui.label(egui::RichText::new(&toast.message).color(egui::Color32::WHITE));
                });
                ui.add_space(6.0);
            }
        });
}
