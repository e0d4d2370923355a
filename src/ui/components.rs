//! Shared UI components for the dashboard

use eframe::egui::{self, Color32, RichText, Stroke};

use crate::app::HealwatchApp;
use crate::event::Status;
use crate::ui::theme::Theme;

/// Render one KPI card: a small caption over a large value
pub fn metric_card(ui: &mut egui::Ui, theme: &Theme, title: &str, value: &str, color: Color32) {
    egui::Frame::new()
        .fill(theme.bg_medium)
        .stroke(Stroke::new(1.0, theme.border))
        .corner_radius(6.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical(|ui| {
                ui.label(RichText::new(title.to_uppercase()).color(theme.text_muted).size(11.0));
                ui.add_space(4.0);
                ui.label(RichText::new(value).color(color).size(32.0).strong().monospace());
            });
        });
}

/// Render a status badge, colored by status
pub fn status_badge(ui: &mut egui::Ui, theme: &Theme, status: &Status) {
    let color = theme.status_color(status);
    egui::Frame::new()
        .fill(color.gamma_multiply(0.15))
        .stroke(Stroke::new(1.0, color))
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(6, 1))
        .show(ui, |ui| {
            ui.add(
                egui::Label::new(RichText::new(status.as_str()).color(color).size(11.0).strong())
                    .selectable(false),
            );
        });
}

/// Render a section heading
pub fn section_heading(ui: &mut egui::Ui, theme: &Theme, text: &str) {
    ui.label(RichText::new(text).color(theme.accent).size(16.0).strong());
    ui.add_space(6.0);
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut HealwatchApp, ctx: &egui::Context) {
    if !app.ui.show_about_dialog {
        return;
    }

    let theme = app.ui.current_theme.clone();

    egui::Window::new("About Healwatch")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 200.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(RichText::new("Healwatch").size(24.0).strong().color(theme.accent));
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Self-healing workflow monitor")
                        .size(14.0)
                        .color(theme.text_secondary),
                );
                ui.add_space(12.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme.text_muted),
                );
                ui.add_space(12.0);
                ui.label(RichText::new(format!("Feed: {}", app.dashboard.source())).color(theme.text_muted));
                ui.add_space(12.0);

                if ui.button("Close").clicked() {
                    app.ui.show_about_dialog = false;
                }

                ui.add_space(8.0);
            });
        });
}
