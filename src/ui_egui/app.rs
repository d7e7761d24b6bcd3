//! Demo host for the recurrence editor.
//!
//! Plays the role of the owning form: it keeps the last reported pair, feeds
//! it back as props on the next frame and shows what the pair expands to.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use egui::{Color32, RichText};

use super::recurrence_editor::{RecurrenceEditor, RecurrenceProps};
use super::theme::EditorStyle;
use crate::models::recurrence::RecurrenceChange;
use crate::models::settings::{EditorSettings, ReconcileMode};
use crate::services::occurrence::preview_occurrences;
use crate::services::settings::SettingsService;

const MAX_LOG_ENTRIES: usize = 20;

type Outbox = Rc<RefCell<Vec<RecurrenceChange>>>;

pub struct RecurrenceDemoApp {
    settings: EditorSettings,
    settings_service: SettingsService,
    editor: RecurrenceEditor,
    /// Changes reported by the editor and not yet consumed
    outbox: Outbox,
    /// Props handed to the editor every frame
    props: RecurrenceProps,
    last_change: Option<RecurrenceChange>,
    change_log: Vec<RecurrenceChange>,
    preview: Result<Vec<DateTime<Utc>>, String>,
    /// Text fields used to push arbitrary props into the editor
    rule_input: String,
    start_input: String,
    status: Option<String>,
}

impl eframe::App for RecurrenceDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.render_menu_bar(ui, ctx);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Standup schedule");
                ui.add_space(8.0);
                self.editor.show(ui, &self.props);
                self.consume_changes();

                ui.separator();
                self.render_owner_view(ui);
            });
        });
    }
}

impl RecurrenceDemoApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings_service: SettingsService,
        settings: EditorSettings,
    ) -> Self {
        let style = EditorStyle::from_name(&settings.theme);
        style.apply_to_context(&cc.egui_ctx);
        Self::with_settings(settings_service, settings, style)
    }

    /// Build the app without a window, e.g. for tests.
    pub fn with_settings(
        settings_service: SettingsService,
        settings: EditorSettings,
        style: EditorStyle,
    ) -> Self {
        let outbox: Outbox = Rc::default();
        let sink = Rc::clone(&outbox);
        let editor = RecurrenceEditor::new(
            "standup-recurrence",
            move |rule: &str, start_date: &str| {
                sink.borrow_mut().push(RecurrenceChange {
                    rrule: rule.to_string(),
                    start_date: start_date.to_string(),
                });
            },
            style,
        )
        .with_reconcile_mode(settings.reconcile_mode)
        .with_date_format(settings.date_format.clone());

        log::info!(
            "Recurrence demo ready (theme={}, reconcile={:?})",
            settings.theme,
            settings.reconcile_mode
        );

        Self {
            settings,
            settings_service,
            editor,
            outbox,
            props: RecurrenceProps::default(),
            last_change: None,
            change_log: Vec::new(),
            preview: Ok(Vec::new()),
            rule_input: String::new(),
            start_input: String::new(),
            status: None,
        }
    }

    pub fn props(&self) -> &RecurrenceProps {
        &self.props
    }

    pub fn last_change(&self) -> Option<&RecurrenceChange> {
        self.last_change.as_ref()
    }

    pub fn preview(&self) -> &Result<Vec<DateTime<Utc>>, String> {
        &self.preview
    }

    /// Apply everything the editor reported since the last frame.
    ///
    /// Each pair becomes the props of the next frame, the way a parent form
    /// stores the value and passes it back down.
    pub fn consume_changes(&mut self) {
        let changes: Vec<RecurrenceChange> = self.outbox.borrow_mut().drain(..).collect();
        for change in changes {
            log::info!("Owner received '{}' starting {}", change.rrule, change.start_date);
            self.props = RecurrenceProps::new(change.rrule.clone(), change.start_date.clone());
            self.preview = preview_occurrences(
                &change.rrule,
                &change.start_date,
                self.settings.preview_count,
            )
            .map_err(|e| e.to_string());

            self.change_log.push(change.clone());
            if self.change_log.len() > MAX_LOG_ENTRIES {
                self.change_log.remove(0);
            }
            self.last_change = Some(change);
        }
    }

    fn render_menu_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            let dark = self.settings.theme == "dark";
            let label = if dark { "☀ Light" } else { "🌙 Dark" };
            if ui.button(label).clicked() {
                self.settings.theme = if dark { "light" } else { "dark" }.to_string();
                let style = EditorStyle::from_name(&self.settings.theme);
                style.apply_to_context(ctx);
                self.editor.set_style(style);
                self.save_settings();
            }

            ui.separator();
            ui.label(match self.settings.reconcile_mode {
                ReconcileMode::Legacy => "Reconcile: legacy",
                ReconcileMode::PerField => "Reconcile: per field",
            });

            if let Some(status) = &self.status {
                ui.separator();
                ui.label(RichText::new(status).small());
            }
        });
    }

    fn render_owner_view(&mut self, ui: &mut egui::Ui) {
        ui.heading("Owner view");
        ui.add_space(4.0);

        match &self.last_change {
            Some(change) => {
                let json = serde_json::to_string_pretty(change)
                    .unwrap_or_else(|e| format!("<unserializable: {e}>"));
                ui.label(RichText::new(json).monospace());
            }
            None => {
                ui.label(RichText::new("Nothing reported yet").italics());
            }
        }

        ui.add_space(8.0);
        ui.label(RichText::new("Next occurrences").strong());
        match &self.preview {
            Ok(dates) if dates.is_empty() => {
                ui.label(RichText::new("No occurrences").italics());
            }
            Ok(dates) => {
                for date in dates {
                    ui.label(date.format("%a %b %d, %Y").to_string());
                }
            }
            Err(err) => {
                ui.label(RichText::new(format!("⚠ {err}")).color(Color32::from_rgb(200, 150, 0)));
            }
        }

        ui.add_space(8.0);
        egui::CollapsingHeader::new("Push props").show(ui, |ui| {
            egui::Grid::new("props_grid").num_columns(2).show(ui, |ui| {
                ui.label("Rule:");
                ui.text_edit_singleline(&mut self.rule_input);
                ui.end_row();
                ui.label("Start date:");
                ui.text_edit_singleline(&mut self.start_input);
                ui.end_row();
            });
            if ui.button("Apply as props").clicked() {
                self.props = RecurrenceProps {
                    rule: Some(self.rule_input.trim().to_string()),
                    start_date: Some(self.start_input.trim().to_string()),
                };
                log::debug!("Pushed props {:?}", self.props);
            }
        });

        egui::CollapsingHeader::new(format!("Change log ({})", self.change_log.len())).show(
            ui,
            |ui| {
                for change in self.change_log.iter().rev() {
                    ui.label(
                        RichText::new(format!("{}  @ {}", change.rrule, change.start_date))
                            .monospace()
                            .small(),
                    );
                }
            },
        );
    }

    fn save_settings(&mut self) {
        match self.settings_service.update(&self.settings) {
            Ok(()) => self.status = Some("Settings saved".to_string()),
            Err(e) => {
                log::error!("Failed to save settings: {e:?}");
                self.status = Some("Failed to save settings".to_string());
            }
        }
    }
}
