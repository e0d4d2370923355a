use eframe::egui::{self, RichText};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::feed::EventSource;
use crate::state::{DashboardState, UiState};
use crate::ui::components::render_about_dialog;
use crate::ui::{render_dashboard, render_details_panel};

/// How often to repaint while idle, so the staleness clock stays current
const IDLE_REPAINT: Duration = Duration::from_secs(1);

/// Main application state
pub struct HealwatchApp {
    /// Application configuration
    pub config: Config,
    /// The mounted dashboard; dropping the app unmounts it
    pub dashboard: DashboardState,
    /// Presentation-only state
    pub ui: UiState,
    /// Status message for the status bar
    pub status_message: String,
}

impl HealwatchApp {
    /// Create a new application instance and start polling
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, source: Arc<dyn EventSource>) -> Self {
        let ctx = cc.egui_ctx.clone();
        let dashboard = DashboardState::mount(source, config.feed.poll_interval(), move || {
            ctx.request_repaint();
        });

        let ui = UiState::new(config.display.theme.theme());

        Self {
            config,
            dashboard,
            ui,
            status_message: "Connecting...".to_string(),
        }
    }

    /// Apply finished fetches to the snapshot
    fn poll_dashboard(&mut self) {
        for event in self.dashboard.poll() {
            event.log();
            if let Some(msg) = event.status_message() {
                self.status_message = msg;
            }
        }
        self.ui.retain_selection(self.dashboard.view().events());
    }
}

impl eframe::App for HealwatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        self.poll_dashboard();

        let theme = self.ui.current_theme.clone();

        // Header
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.ui.show_about_dialog = true;
                    }
                });
            });

            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("n8n // SELF_HEALER")
                        .color(theme.accent)
                        .size(20.0)
                        .strong()
                        .monospace(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new("SYSTEM ONLINE").color(theme.success).monospace());
                    ui.label(RichText::new("●").color(theme.success));
                });
            });
            ui.add_space(4.0);
        });

        // Status bar at bottom
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&self.status_message).color(theme.text_secondary));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(self.dashboard.source()).color(theme.text_muted).size(11.0));
                });
            });
        });

        render_details_panel(self, ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            render_dashboard(self, ui);
        });

        render_about_dialog(self, ctx);

        ctx.request_repaint_after(IDLE_REPAINT);
    }
}
