//! Date picker widget bound to an ISO-8601 string.
//!
//! A button shows the bound date; clicking it toggles an inline month
//! calendar. Open/viewing state is kept in egui temp memory under the
//! widget id, so the widget itself stays a plain configuration value.

use chrono::{Datelike, Duration, Local, NaiveDate};
use egui::RichText;

use super::theme::EditorStyle;
use crate::utils::date::{date_to_iso, days_in_month, format_display_date, parse_iso_date, shift_month};

/// What the user did with a date picker this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatePickerEvent {
    /// A day was picked; carries the ISO-8601 value (noon UTC of that day)
    Selected(String),
    /// The clear button was pressed
    Cleared,
}

/// A widget that edits an ISO-8601 date value.
///
/// The rule editor takes any implementation as its calendar, so the host can
/// hand it the same picker it uses for the start date.
pub trait CalendarWidget {
    fn show_calendar(
        &self,
        ui: &mut egui::Ui,
        id: egui::Id,
        value: &str,
        style: &EditorStyle,
    ) -> Option<DatePickerEvent>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    pub show_clear_button: bool,
    pub date_format: String,
}

impl Default for DatePicker {
    fn default() -> Self {
        Self {
            show_clear_button: true,
            date_format: "MM/DD/YYYY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct PickerMemory {
    open: bool,
    viewing: Option<NaiveDate>,
}

/// Result from the inline calendar
enum CalendarAction {
    None,
    Selected(NaiveDate),
    Close,
}

impl DatePicker {
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
            ..Self::default()
        }
    }

    pub fn show_clear_button(mut self, show: bool) -> Self {
        self.show_clear_button = show;
        self
    }

    /// Whether the calendar of the picker shown under `id` is open.
    pub fn is_open(ctx: &egui::Context, id: egui::Id) -> bool {
        ctx.data(|d| d.get_temp::<PickerMemory>(id))
            .is_some_and(|memory| memory.open)
    }

    /// Open or close the calendar of the picker shown under `id`.
    pub fn set_open(ctx: &egui::Context, id: egui::Id, open: bool) {
        ctx.data_mut(|d| {
            let memory = d.get_temp_mut_or_default::<PickerMemory>(id);
            memory.open = open;
        });
    }

    /// Render the picker for `value` and report what the user did.
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        id: egui::Id,
        value: &str,
        style: &EditorStyle,
    ) -> Option<DatePickerEvent> {
        let today = Local::now().date_naive();
        let current = parse_iso_date(value);
        let shown = current.unwrap_or(today);

        let mut memory = ui
            .data(|d| d.get_temp::<PickerMemory>(id))
            .unwrap_or_default();
        let mut event = None;

        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                let label = match current {
                    Some(date) => format!("📅 {}", format_display_date(date, &self.date_format)),
                    None => "📅 Select a date".to_string(),
                };
                let response = ui
                    .add_sized(
                        [style.date_picker_width, 24.0],
                        egui::SelectableLabel::new(memory.open, label),
                    )
                    .on_hover_text("Click to select date");
                if response.clicked() {
                    memory.open = !memory.open;
                    memory.viewing = Some(shown);
                }

                if self.show_clear_button
                    && current.is_some()
                    && ui.small_button("✖").on_hover_text("Clear").clicked()
                {
                    memory.open = false;
                    event = Some(DatePickerEvent::Cleared);
                }
            });

            if memory.open {
                let viewing = memory.viewing.get_or_insert(shown);
                match render_calendar(ui, id, current, viewing, today, style) {
                    CalendarAction::Selected(date) => {
                        memory.open = false;
                        event = Some(DatePickerEvent::Selected(date_to_iso(date)));
                    }
                    CalendarAction::Close => memory.open = false,
                    CalendarAction::None => {}
                }
            }
        });

        ui.data_mut(|d| d.insert_temp(id, memory));
        event
    }
}

impl CalendarWidget for DatePicker {
    fn show_calendar(
        &self,
        ui: &mut egui::Ui,
        id: egui::Id,
        value: &str,
        style: &EditorStyle,
    ) -> Option<DatePickerEvent> {
        self.show(ui, id, value, style)
    }
}

/// Weeks (Sunday first) covering the month of `viewing`.
pub fn month_grid(viewing: NaiveDate) -> Vec<[NaiveDate; 7]> {
    let first_of_month = viewing - Duration::days(viewing.day0() as i64);
    let last_of_month =
        first_of_month + Duration::days(days_in_month(viewing.year(), viewing.month()) as i64 - 1);
    let start_weekday = first_of_month.weekday().num_days_from_sunday() as i64;

    let mut week_start = first_of_month - Duration::days(start_weekday);
    let mut weeks = Vec::with_capacity(6);
    while week_start <= last_of_month {
        let mut week = [week_start; 7];
        for (offset, day) in week.iter_mut().enumerate() {
            *day = week_start + Duration::days(offset as i64);
        }
        weeks.push(week);
        week_start += Duration::days(7);
    }
    weeks
}

fn render_calendar(
    ui: &mut egui::Ui,
    id: egui::Id,
    current: Option<NaiveDate>,
    viewing: &mut NaiveDate,
    today: NaiveDate,
    style: &EditorStyle,
) -> CalendarAction {
    let mut action = CalendarAction::None;

    ui.vertical(|ui| {
        ui.set_max_width(style.date_picker_width);

        ui.horizontal(|ui| {
            if ui.small_button("◀◀").on_hover_text("Previous year").clicked() {
                *viewing = shift_month(*viewing, -12);
            }
            if ui.small_button("◀").on_hover_text("Previous month").clicked() {
                *viewing = shift_month(*viewing, -1);
            }

            let header = viewing.format("%b %Y").to_string();
            ui.add_space(4.0);
            if ui.selectable_label(false, header).on_hover_text("Go to today").clicked() {
                *viewing = today;
            }
            ui.add_space(4.0);

            if ui.small_button("▶").on_hover_text("Next month").clicked() {
                *viewing = shift_month(*viewing, 1);
            }
            if ui.small_button("▶▶").on_hover_text("Next year").clicked() {
                *viewing = shift_month(*viewing, 12);
            }
        });

        ui.separator();

        egui::Grid::new(id.with("calendar_grid"))
            .num_columns(7)
            .spacing([2.0, 2.0])
            .min_col_width(22.0)
            .show(ui, |ui| {
                for name in ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"] {
                    ui.label(RichText::new(name).small().strong().color(style.text_secondary));
                }
                ui.end_row();

                for week in month_grid(*viewing) {
                    for day in week {
                        let day_str = day.day().to_string();
                        let text = if day == today {
                            RichText::new(day_str).strong().color(style.today_color)
                        } else if day.month() != viewing.month() {
                            RichText::new(day_str).weak()
                        } else {
                            RichText::new(day_str)
                        };

                        if ui.selectable_label(Some(day) == current, text).clicked() {
                            action = CalendarAction::Selected(day);
                        }
                    }
                    ui.end_row();
                }
            });

        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("Today").clicked() {
                action = CalendarAction::Selected(today);
            }
            if ui.button("Close").clicked() {
                action = CalendarAction::Close;
            }
        });
    });

    action
}
