use eframe::egui::{self, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

use crate::event::Status;

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Neon,
    Amber,
}

impl ThemePreset {
    /// Get the theme colors for this preset
    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Neon => Theme::neon(),
            ThemePreset::Amber => Theme::amber(),
        }
    }
}

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg_darkest: Color32,
    pub bg_dark: Color32,
    pub bg_medium: Color32,
    pub bg_light: Color32,

    // Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    pub accent: Color32,

    // Status colors: Detected, Resolved, anything else
    pub error: Color32,
    pub success: Color32,
    pub neutral: Color32,

    pub border: Color32,
    pub selection: Color32,
}

impl Theme {
    /// Neon theme - terminal green on near-black, the classic ops-console look
    pub fn neon() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(5, 8, 10),
            bg_dark: Color32::from_rgb(10, 14, 18),
            bg_medium: Color32::from_rgb(18, 24, 30),
            bg_light: Color32::from_rgb(30, 40, 48),

            text_primary: Color32::from_rgb(224, 242, 236),
            text_secondary: Color32::from_rgb(160, 190, 180),
            text_muted: Color32::from_rgb(96, 120, 112),

            accent: Color32::from_rgb(0, 255, 157),

            error: Color32::from_rgb(255, 59, 92),
            success: Color32::from_rgb(0, 230, 118),
            neutral: Color32::from_rgb(140, 150, 160),

            border: Color32::from_rgb(36, 52, 60),
            selection: Color32::from_rgb(0, 255, 157).gamma_multiply(0.2),
        }
    }

    /// Amber theme - warm monochrome
    pub fn amber() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(16, 16, 18),
            bg_dark: Color32::from_rgb(24, 24, 27),
            bg_medium: Color32::from_rgb(32, 32, 36),
            bg_light: Color32::from_rgb(48, 48, 54),

            text_primary: Color32::from_rgb(250, 250, 250),
            text_secondary: Color32::from_rgb(200, 200, 200),
            text_muted: Color32::from_rgb(140, 140, 140),

            accent: Color32::from_rgb(245, 158, 11),

            error: Color32::from_rgb(239, 68, 68),
            success: Color32::from_rgb(34, 197, 94),
            neutral: Color32::from_rgb(161, 161, 170),

            border: Color32::from_rgb(63, 63, 70),
            selection: Color32::from_rgb(245, 158, 11).gamma_multiply(0.3),
        }
    }

    /// Color for a status badge or row accent
    pub fn status_color(&self, status: &Status) -> Color32 {
        match status {
            Status::Detected => self.error,
            Status::Resolved => self.success,
            Status::Other(_) => self.neutral,
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.window_fill = self.bg_dark;
        visuals.panel_fill = self.bg_dark;
        visuals.faint_bg_color = self.bg_medium;
        visuals.extreme_bg_color = self.bg_darkest;

        visuals.widgets.noninteractive.bg_fill = self.bg_medium;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        visuals.widgets.inactive.bg_fill = self.bg_medium;
        visuals.widgets.inactive.weak_bg_fill = self.bg_light;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.hovered.bg_fill = self.bg_light;
        visuals.widgets.hovered.weak_bg_fill = self.bg_light;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);

        visuals.selection.bg_fill = self.selection;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        ctx.set_visuals(visuals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_in_config() {
        let json = serde_json::to_string(&ThemePreset::Amber).unwrap();
        assert_eq!(json, "\"amber\"");
        assert_eq!(ThemePreset::default(), ThemePreset::Neon);
    }

    #[test]
    fn test_status_colors() {
        let theme = Theme::neon();
        assert_eq!(theme.status_color(&Status::Detected), theme.error);
        assert_eq!(theme.status_color(&Status::Resolved), theme.success);
        assert_eq!(theme.status_color(&Status::Other("Queued".into())), theme.neutral);
    }
}
