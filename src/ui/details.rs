//! Side panel with the full record of the selected event

use eframe::egui::{self, RichText};

use crate::app::HealwatchApp;
use crate::event::TIME_PLACEHOLDER;
use crate::ui::components::{section_heading, status_badge};

/// Render the details panel if a row is selected
pub fn render_details_panel(app: &mut HealwatchApp, ctx: &egui::Context) {
    let Some(event) = app.ui.selected_event(app.dashboard.view().events()).cloned() else {
        return;
    };
    let theme = app.ui.current_theme.clone();

    egui::SidePanel::right("event_details")
        .resizable(true)
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            section_heading(ui, &theme, "Event");

            let detected_at = event
                .timestamp
                .map(|ts| ts.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| TIME_PLACEHOLDER.to_string());

            for (label, value) in [
                ("ID", event.id.to_string()),
                ("Workflow", event.workflow_name.clone()),
                ("Detected", detected_at),
            ] {
                ui.label(RichText::new(label).color(theme.text_muted).size(11.0));
                ui.label(RichText::new(value).color(theme.text_primary));
                ui.add_space(6.0);
            }

            ui.label(RichText::new("Status").color(theme.text_muted).size(11.0));
            ui.horizontal(|ui| {
                status_badge(ui, &theme, &event.status);
                if let Some(action) = event.status.action() {
                    ui.label(RichText::new(action).color(theme.status_color(&event.status)).italics());
                }
            });
            if event.fix_attempted {
                ui.label(RichText::new("Fix attempted").color(theme.text_secondary).size(11.0));
            }
            ui.add_space(6.0);

            ui.label(RichText::new("Error").color(theme.text_muted).size(11.0));
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.label(RichText::new(&event.error).color(theme.text_secondary).monospace());
            });

            ui.add_space(12.0);
            if ui.button("Close").clicked() {
                app.ui.selected = None;
            }
        });
}
