use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, RichText};

use csv_finder::services::{NotifyKind, Notifier};

const TOAST_LIFETIME: Duration = Duration::from_millis(1000);
const MAX_TOASTS: usize = 4;

struct Toast {
    kind: NotifyKind,
    message: String,
    shown_at: Instant,
}

/// Short-lived notifications stacked at the bottom of the window.
#[derive(Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Notifier for Toasts {
    fn notify(&mut self, kind: NotifyKind, message: &str) {
        self.items.push(Toast {
            kind,
            message: message.to_string(),
            shown_at: Instant::now(),
        });
        if self.items.len() > MAX_TOASTS {
            self.items.remove(0);
        }
    }
}

impl Toasts {
    pub fn show(&mut self, ctx: &egui::Context) {
        self.items.retain(|t| t.shown_at.elapsed() < TOAST_LIFETIME);
        if self.items.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                for toast in &self.items {
                    let color = match toast.kind {
                        NotifyKind::Success => Color32::from_rgb(90, 200, 120),
                        NotifyKind::Error => Color32::from_rgb(230, 80, 80),
                    };
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(RichText::new(&toast.message).color(color));
                    });
                }
            });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
