//! Form layout helpers shared by the recurrence editor widgets.

use egui::RichText;

use super::theme::EditorStyle;

/// A vertical group followed by the style's group spacing.
pub fn form_group<R>(
    ui: &mut egui::Ui,
    style: &EditorStyle,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    let inner = ui.vertical(add_contents).inner;
    ui.add_space(style.form_group_spacing);
    inner
}

pub fn labeled_row<F>(ui: &mut egui::Ui, style: &EditorStyle, label: &str, add_contents: F)
where
    F: FnOnce(&mut egui::Ui),
{
    ui.horizontal(|ui| {
        render_form_label(ui, style, label);
        add_contents(ui);
    });
}

fn render_form_label(ui: &mut egui::Ui, style: &EditorStyle, label: &str) {
    let text = RichText::new(label).strong().color(style.label_color);
    ui.allocate_ui_with_layout(
        egui::Vec2::new(style.control_label_width, 24.0),
        egui::Layout::right_to_left(egui::Align::Center),
        move |ui| {
            ui.label(text);
        },
    );
}
