//! Recurrence rule editor widget.
//!
//! Handles frequency selection, interval, weekly BYDAY toggles, the monthly
//! "on day" / "on the" patterns, and optional start and end settings.
//!
//! The widget is controlled: it is handed the current rule string each frame
//! and returns a new string only when the user changed something.

use chrono::{Local, NaiveDate};

use super::date_picker::{CalendarWidget, DatePickerEvent};
use super::theme::EditorStyle;
use super::widgets::labeled_row;
use crate::models::recurrence::{
    MonthlyMode, ParsedRRule, RecurrenceFrequency, RuleEnd, RuleForm, SetPosition, Weekday,
};
use crate::utils::date::{date_to_iso, parse_iso_date};

const END_LABELS: [&str; 3] = ["Never", "After", "On date"];

/// Which parts of the rule editor are shown and which frequencies are offered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEditorConfig {
    pub hide_start: bool,
    pub hide_end: bool,
    pub repeat: Vec<RecurrenceFrequency>,
}

impl Default for RuleEditorConfig {
    fn default() -> Self {
        Self {
            hide_start: false,
            hide_end: false,
            repeat: RecurrenceFrequency::all().to_vec(),
        }
    }
}

pub struct RuleEditor {
    id: egui::Id,
    config: RuleEditorConfig,
}

impl RuleEditor {
    pub fn new(id_source: impl std::hash::Hash, config: RuleEditorConfig) -> Self {
        Self {
            id: egui::Id::new(id_source),
            config,
        }
    }

    pub fn config(&self) -> &RuleEditorConfig {
        &self.config
    }

    /// Resolve `value` into the form the controls edit.
    pub fn form_for(&self, value: &str, today: NaiveDate) -> RuleForm {
        RuleForm::from_parsed(&ParsedRRule::parse(value), &self.config.repeat, today)
    }

    /// Serialize a form honoring the hidden sections.
    pub fn rule_for(&self, form: &RuleForm) -> String {
        form.build(!self.config.hide_start, !self.config.hide_end)
    }

    /// Render the editor for `value`; `calendar` is used for every date field.
    ///
    /// Returns the new prefixed rule when the user changed the form.
    pub fn show<C: CalendarWidget + ?Sized>(
        &self,
        ui: &mut egui::Ui,
        value: &str,
        calendar: &C,
        style: &EditorStyle,
    ) -> Option<String> {
        let today = Local::now().date_naive();
        let original = self.form_for(value, today);
        let mut form = original.clone();

        ui.vertical(|ui| {
            self.render_repeat(ui, &mut form, style);

            match form.frequency {
                RecurrenceFrequency::Weekly => self.render_weekly(ui, &mut form, style),
                RecurrenceFrequency::Monthly => self.render_monthly(ui, &mut form, style),
                RecurrenceFrequency::Yearly | RecurrenceFrequency::Daily => {
                    self.render_interval(ui, &mut form, style, style.weekly_frequency_input_width)
                }
            }

            if !self.config.hide_start {
                self.render_start(ui, &mut form, calendar, style);
            }
            if !self.config.hide_end {
                self.render_end(ui, &mut form, calendar, style, today);
            }
        });

        if form == original {
            return None;
        }

        let rule = self.rule_for(&form);
        log::debug!("Rule editor produced '{}'", rule);
        Some(rule)
    }

    fn render_repeat(&self, ui: &mut egui::Ui, form: &mut RuleForm, style: &EditorStyle) {
        labeled_row(ui, style, "Repeat:", |ui| {
            egui::ComboBox::from_id_source(self.id.with("repeat_combo"))
                .width(style.repeat_dropdown_width)
                .selected_text(form.frequency.as_str())
                .show_ui(ui, |ui| {
                    for freq in &self.config.repeat {
                        ui.selectable_value(&mut form.frequency, *freq, freq.as_str());
                    }
                });
        });
    }

    fn render_interval(
        &self,
        ui: &mut egui::Ui,
        form: &mut RuleForm,
        style: &EditorStyle,
        input_width: f32,
    ) {
        labeled_row(ui, style, "Every:", |ui| {
            ui.add_sized(
                [input_width, 20.0],
                egui::DragValue::new(&mut form.interval).range(1..=999),
            );
            ui.label(form.frequency.unit_label());
        });
    }

    fn render_weekly(&self, ui: &mut egui::Ui, form: &mut RuleForm, style: &EditorStyle) {
        self.render_interval(ui, form, style, style.weekly_frequency_input_width);

        labeled_row(ui, style, "On:", |ui| {
            ui.horizontal_wrapped(|ui| {
                for day in Weekday::all() {
                    let selected = form.weekday_flag(day);
                    if ui
                        .selectable_label(selected, day.short_label())
                        .on_hover_text(day.as_str())
                        .clicked()
                    {
                        form.set_weekday_flag(day, !selected);
                    }
                }
            });
        });
    }

    fn render_monthly(&self, ui: &mut egui::Ui, form: &mut RuleForm, style: &EditorStyle) {
        self.render_interval(ui, form, style, style.monthly_frequency_input_width);

        let (mut day, mut position, mut weekday) = match form.monthly {
            MonthlyMode::OnDay(day) => (day, SetPosition::First, Weekday::Monday),
            MonthlyMode::OnThe(position, weekday) => (1, position, weekday),
        };
        let mut on_day = matches!(form.monthly, MonthlyMode::OnDay(_));

        labeled_row(ui, style, "", |ui| {
            if ui.radio(on_day, "on day").clicked() {
                on_day = true;
            }
            ui.add_enabled_ui(on_day, |ui| {
                egui::ComboBox::from_id_source(self.id.with("monthly_on_day"))
                    .width(style.monthly_on_day_dropdown_width)
                    .selected_text(day.to_string())
                    .show_ui(ui, |ui| {
                        for d in 1..=31 {
                            ui.selectable_value(&mut day, d, d.to_string());
                        }
                    });
            });
        });

        labeled_row(ui, style, "", |ui| {
            if ui.radio(!on_day, "on the").clicked() {
                on_day = false;
            }
            ui.add_enabled_ui(!on_day, |ui| {
                egui::ComboBox::from_id_source(self.id.with("monthly_on_the_which"))
                    .width(style.monthly_on_the_day_dropdown_width)
                    .selected_text(position.as_str())
                    .show_ui(ui, |ui| {
                        for pos in SetPosition::all() {
                            ui.selectable_value(&mut position, pos, pos.as_str());
                        }
                    });
                egui::ComboBox::from_id_source(self.id.with("monthly_on_the_day"))
                    .width(style.monthly_on_the_day_dropdown_width)
                    .selected_text(weekday.as_str())
                    .show_ui(ui, |ui| {
                        for wd in Weekday::all() {
                            ui.selectable_value(&mut weekday, wd, wd.as_str());
                        }
                    });
            });
        });

        form.monthly = if on_day {
            MonthlyMode::OnDay(day)
        } else {
            MonthlyMode::OnThe(position, weekday)
        };
    }

    fn render_start<C: CalendarWidget + ?Sized>(
        &self,
        ui: &mut egui::Ui,
        form: &mut RuleForm,
        calendar: &C,
        style: &EditorStyle,
    ) {
        labeled_row(ui, style, "Start:", |ui| {
            let value = date_to_iso(form.start_date);
            if let Some(DatePickerEvent::Selected(iso)) =
                calendar.show_calendar(ui, self.id.with("start_date"), &value, style)
            {
                if let Some(date) = parse_iso_date(&iso) {
                    form.start_date = date;
                }
            }
        });
    }

    fn render_end<C: CalendarWidget + ?Sized>(
        &self,
        ui: &mut egui::Ui,
        form: &mut RuleForm,
        calendar: &C,
        style: &EditorStyle,
        today: NaiveDate,
    ) {
        labeled_row(ui, style, "End:", |ui| {
            let mut kind = match form.end {
                RuleEnd::Never => 0,
                RuleEnd::After(_) => 1,
                RuleEnd::OnDate(_) => 2,
            };
            egui::ComboBox::from_id_source(self.id.with("end_combo"))
                .width(style.monthly_on_the_day_dropdown_width)
                .selected_text(END_LABELS[kind])
                .show_ui(ui, |ui| {
                    for (index, label) in END_LABELS.iter().enumerate() {
                        ui.selectable_value(&mut kind, index, *label);
                    }
                });

            form.end = match (kind, form.end) {
                (0, _) => RuleEnd::Never,
                (1, RuleEnd::After(count)) => RuleEnd::After(count),
                (1, _) => RuleEnd::After(1),
                (_, RuleEnd::OnDate(date)) => RuleEnd::OnDate(date),
                (_, _) => RuleEnd::OnDate(today),
            };

            let end = form.end;
            match end {
                RuleEnd::Never => {}
                RuleEnd::After(mut count) => {
                    ui.add_sized(
                        [style.monthly_frequency_input_width, 20.0],
                        egui::DragValue::new(&mut count).range(1..=999),
                    );
                    ui.label("executions");
                    form.end = RuleEnd::After(count);
                }
                RuleEnd::OnDate(date) => {
                    match calendar.show_calendar(ui, self.id.with("end_date"), &date_to_iso(date), style) {
                        Some(DatePickerEvent::Selected(iso)) => {
                            if let Some(date) = parse_iso_date(&iso) {
                                form.end = RuleEnd::OnDate(date);
                            }
                        }
                        Some(DatePickerEvent::Cleared) => form.end = RuleEnd::Never,
                        None => {}
                    }
                }
            }
        });
    }
}
