//! Dashboard UI rendering

use eframe::egui::{self, RichText, Sense, Stroke};

use crate::app::HealwatchApp;
use crate::event::EventId;
use crate::ui::components::{metric_card, section_heading, status_badge};
use crate::ui::theme::Theme;
use crate::view::{DashboardView, LOADING_PLACEHOLDER, LoadedView, RowView};

const TIME_WIDTH: f32 = 80.0;
const WORKFLOW_WIDTH: f32 = 180.0;
const STATUS_WIDTH: f32 = 90.0;
const ACTION_WIDTH: f32 = 110.0;
const MIN_ERROR_WIDTH: f32 = 120.0;
const ROW_HEIGHT: f32 = 22.0;

/// Render the dashboard body: placeholder while loading, else cards and table
pub fn render_dashboard(app: &mut HealwatchApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let view = DashboardView::build(app.dashboard.view(), &app.config.display);

    match view {
        DashboardView::Loading => {
            section_heading(ui, &theme, "Event Log");
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new(LOADING_PLACEHOLDER).color(theme.text_secondary));
            });
        }
        DashboardView::Loaded(loaded) => {
            render_metrics(ui, &theme, &loaded);
            ui.add_space(16.0);
            section_heading(ui, &theme, "Event Log");
            if let Some(staleness) = &loaded.staleness {
                let color = if staleness.is_stale() { theme.error } else { theme.text_muted };
                ui.label(RichText::new(staleness.to_string()).color(color).size(11.0));
                ui.add_space(4.0);
            }
            if let Some(clicked) = render_table(ui, &theme, &loaded.rows, app.ui.selected.as_ref()) {
                app.ui.toggle_selection(&clicked);
            }
        }
    }
}

fn render_metrics(ui: &mut egui::Ui, theme: &Theme, view: &LoadedView) {
    let metrics = view.metrics;
    ui.columns(3, |cols| {
        metric_card(
            &mut cols[0],
            theme,
            "Active Errors",
            &metrics.active_errors.to_string(),
            theme.error,
        );
        metric_card(
            &mut cols[1],
            theme,
            "Self-Healed",
            &metrics.self_healed.to_string(),
            theme.success,
        );
        metric_card(
            &mut cols[2],
            theme,
            "Success Rate",
            &format!("{}%", metrics.success_rate),
            theme.text_primary,
        );
    });
}

/// Render the event table. Returns the id of a clicked row, if any.
fn render_table(
    ui: &mut egui::Ui,
    theme: &Theme,
    rows: &[RowView],
    selected: Option<&EventId>,
) -> Option<EventId> {
    let error_width = (ui.available_width()
        - TIME_WIDTH
        - WORKFLOW_WIDTH
        - STATUS_WIDTH
        - ACTION_WIDTH
        - 5.0 * ui.spacing().item_spacing.x)
        .max(MIN_ERROR_WIDTH);

    // Header
    ui.horizontal(|ui| {
        for (title, width) in [
            ("Time", TIME_WIDTH),
            ("Workflow", WORKFLOW_WIDTH),
            ("Error", error_width),
            ("Status", STATUS_WIDTH),
            ("Action", ACTION_WIDTH),
        ] {
            ui.add_sized(
                [width, ROW_HEIGHT],
                egui::Label::new(RichText::new(title).color(theme.text_muted).strong())
                    .selectable(false),
            );
        }
    });
    ui.separator();

    let mut clicked = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for row in rows {
                let is_selected = selected == Some(&row.key);
                // Scope by event id so row identity survives reordering
                let response = ui
                    .push_id(&row.key, |ui| render_row(ui, theme, row, error_width, is_selected))
                    .response
                    .interact(Sense::click());

                if response.clicked() {
                    clicked = Some(row.key.clone());
                }
            }
        });

    clicked
}

fn render_row(ui: &mut egui::Ui, theme: &Theme, row: &RowView, error_width: f32, selected: bool) {
    let fill = if selected { theme.selection } else { egui::Color32::TRANSPARENT };
    let accent = theme.status_color(&row.status);

    egui::Frame::new()
        .fill(fill)
        .stroke(Stroke::new(if selected { 1.0 } else { 0.0 }, accent))
        .corner_radius(3.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                cell(ui, TIME_WIDTH, RichText::new(&row.time).color(theme.text_secondary).monospace());
                cell(ui, WORKFLOW_WIDTH, RichText::new(&row.workflow).color(theme.text_primary));
                cell(ui, error_width, RichText::new(&row.error).color(theme.text_secondary));

                ui.allocate_ui(egui::vec2(STATUS_WIDTH, ROW_HEIGHT), |ui| {
                    status_badge(ui, theme, &row.status);
                });

                let action = match (row.action, row.fix_attempted) {
                    (Some(action), true) => format!("{} *", action),
                    (Some(action), false) => action.to_string(),
                    (None, _) => String::new(),
                };
                cell(ui, ACTION_WIDTH, RichText::new(action).color(accent).italics());
            });
        });
}

fn cell(ui: &mut egui::Ui, width: f32, text: RichText) {
    ui.add_sized(
        [width, ROW_HEIGHT],
        egui::Label::new(text).truncate().selectable(false),
    );
}
