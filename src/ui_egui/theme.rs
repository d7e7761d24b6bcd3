//! Style provider for the recurrence editor
//!
//! An [`EditorStyle`] is handed to each widget at construction instead of
//! being read from shared globals, so two editors on screen can be styled
//! independently.

use egui::Color32;

/// Colors and sizes used by the recurrence editor and its embedded widgets
#[derive(Debug, Clone, PartialEq)]
pub struct EditorStyle {
    /// Whether this is a dark style (affects base egui::Visuals)
    pub is_dark: bool,

    /// Vertical gap between form groups
    pub form_group_spacing: f32,

    /// Width reserved for right-aligned control labels
    pub control_label_width: f32,

    /// Width of the start date picker button
    pub date_picker_width: f32,

    /// Width of the frequency ("Repeat") dropdown
    pub repeat_dropdown_width: f32,

    /// Width of the weekly interval input
    pub weekly_frequency_input_width: f32,

    /// Width of the monthly interval input
    pub monthly_frequency_input_width: f32,

    /// Width of the monthly "on day" dropdown
    pub monthly_on_day_dropdown_width: f32,

    /// Width of the monthly "on the" dropdowns
    pub monthly_on_the_day_dropdown_width: f32,

    /// Panel background
    pub background: Color32,

    /// Control label color
    pub label_color: Color32,

    /// Today's date in the calendar grid
    pub today_color: Color32,

    /// Secondary text (hints, weekday headers)
    pub text_secondary: Color32,
}

impl EditorStyle {
    /// Create the default Light style
    pub fn light() -> Self {
        Self {
            is_dark: false,
            background: Color32::from_rgb(245, 245, 245),
            label_color: Color32::from_rgb(40, 40, 40),
            today_color: Color32::from_rgb(50, 150, 50),
            text_secondary: Color32::from_rgb(100, 100, 100),
            ..Self::base()
        }
    }

    /// Create the default Dark style
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            background: Color32::from_rgb(30, 30, 30),
            label_color: Color32::from_rgb(240, 240, 240),
            today_color: Color32::from_rgb(110, 200, 110),
            text_secondary: Color32::from_rgb(170, 170, 170),
            ..Self::base()
        }
    }

    /// Resolve a style by its settings name, falling back to light.
    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            "light" => Self::light(),
            other => {
                log::warn!("Unknown style '{}', using light", other);
                Self::light()
            }
        }
    }

    fn base() -> Self {
        Self {
            is_dark: false,
            form_group_spacing: 15.0,
            control_label_width: 110.0,
            date_picker_width: 220.0,
            repeat_dropdown_width: 300.0,
            weekly_frequency_input_width: 60.0,
            monthly_frequency_input_width: 60.0,
            monthly_on_day_dropdown_width: 300.0,
            monthly_on_the_day_dropdown_width: 120.0,
            background: Color32::from_rgb(245, 245, 245),
            label_color: Color32::from_rgb(40, 40, 40),
            today_color: Color32::from_rgb(50, 150, 50),
            text_secondary: Color32::from_rgb(100, 100, 100),
        }
    }

    /// Apply this style's base visuals to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.background;
        visuals.panel_fill = self.background;

        ctx.set_visuals(visuals);
    }
}

impl Default for EditorStyle {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_style() {
        let style = EditorStyle::light();
        assert!(!style.is_dark);
        assert_eq!(style.background, Color32::from_rgb(245, 245, 245));
        assert_eq!(style.repeat_dropdown_width, 300.0);
        assert_eq!(style.monthly_on_the_day_dropdown_width, 120.0);
    }

    #[test]
    fn test_dark_style() {
        let style = EditorStyle::dark();
        assert!(style.is_dark);
        assert_eq!(style.background, Color32::from_rgb(30, 30, 30));
        assert_eq!(style.weekly_frequency_input_width, 60.0);
    }

    #[test]
    fn test_unknown_name_falls_back_to_light() {
        assert_eq!(EditorStyle::from_name("sepia"), EditorStyle::light());
    }
}
