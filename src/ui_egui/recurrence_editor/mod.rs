//! Recurrence editor: a start date picker plus a rule editor, reported as one pair.
//!
//! The owner passes [`RecurrenceProps`] every frame and receives
//! `(rule, start_date)` through its [`ChangeSink`] on mount and after every
//! user edit. Rules leave the editor without the internal `RRULE:` prefix.

mod state;

pub use state::{reconcile, RecurrenceProps, RecurrenceState};

use super::date_picker::{DatePicker, DatePickerEvent};
use super::rule_editor::{RuleEditor, RuleEditorConfig};
use super::theme::EditorStyle;
use super::widgets::{form_group, labeled_row};
use crate::models::recurrence::{strip_prefix, with_prefix, RecurrenceFrequency};
use crate::models::settings::ReconcileMode;

/// Receives every outbound `(rule, start_date)` pair.
pub trait ChangeSink {
    fn on_change(&mut self, rule: &str, start_date: &str);
}

impl<F> ChangeSink for F
where
    F: FnMut(&str, &str),
{
    fn on_change(&mut self, rule: &str, start_date: &str) {
        self(rule, start_date)
    }
}

/// Rule editor configuration used by the recurrence editor: no start or end
/// section, monthly and weekly only.
pub fn standup_rule_config() -> RuleEditorConfig {
    RuleEditorConfig {
        hide_start: true,
        hide_end: true,
        repeat: vec![RecurrenceFrequency::Monthly, RecurrenceFrequency::Weekly],
    }
}

pub struct RecurrenceEditor {
    id: egui::Id,
    state: RecurrenceState,
    mounted: bool,
    reconcile_mode: ReconcileMode,
    style: EditorStyle,
    date_picker: DatePicker,
    rule_editor: RuleEditor,
    on_change: Box<dyn ChangeSink>,
}

impl RecurrenceEditor {
    /// `id_source` must be unique among editors shown in the same context.
    pub fn new(
        id_source: impl std::hash::Hash,
        on_change: impl ChangeSink + 'static,
        style: EditorStyle,
    ) -> Self {
        let id = egui::Id::new(id_source);
        Self {
            id,
            state: RecurrenceState::initial(),
            mounted: false,
            reconcile_mode: ReconcileMode::default(),
            style,
            date_picker: DatePicker::default().show_clear_button(false),
            rule_editor: RuleEditor::new(id.with("rule"), standup_rule_config()),
            on_change: Box::new(on_change),
        }
    }

    pub fn with_reconcile_mode(mut self, mode: ReconcileMode) -> Self {
        self.reconcile_mode = mode;
        self
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_picker.date_format = date_format.into();
        self
    }

    fn start_date_picker_id(&self) -> egui::Id {
        self.id.with("recurrence-start-date-picker")
    }

    pub fn state(&self) -> &RecurrenceState {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn style(&self) -> &EditorStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: EditorStyle) {
        self.style = style;
    }

    /// Merge incoming props into local state. Never notifies the owner.
    pub fn apply_props(&mut self, props: &RecurrenceProps) {
        if let Some(next) = reconcile(props, &self.state, self.reconcile_mode) {
            log::debug!(
                "Props replaced recurrence state: '{}' @ {} -> '{}' @ {}",
                self.state.rule,
                self.state.start_date,
                next.rule,
                next.start_date
            );
            self.state = next;
        }
    }

    /// Report the current state once after the first render.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        log::info!("Recurrence editor mounted");
        Self::send_changes(self.on_change.as_mut(), &self.state.rule, &self.state.start_date);
    }

    pub fn on_rule_change(&mut self, rule: &str) {
        self.state.rule = with_prefix(rule);
        Self::send_changes(self.on_change.as_mut(), &self.state.rule, &self.state.start_date);
    }

    pub fn on_start_date_change(&mut self, start_date: &str) {
        self.state.start_date = start_date.to_string();
        Self::send_changes(self.on_change.as_mut(), &self.state.rule, &self.state.start_date);
    }

    /// Every outbound notification passes through here.
    fn send_changes(sink: &mut dyn ChangeSink, rule: &str, start_date: &str) {
        let rule = strip_prefix(rule);
        log::debug!("Recurrence changed: '{}' starting {}", rule, start_date);
        sink.on_change(&rule, start_date);
    }

    /// Reconcile `props`, draw the editor and dispatch whatever the user did.
    pub fn show(&mut self, ui: &mut egui::Ui, props: &RecurrenceProps) -> egui::Response {
        self.apply_props(props);

        let mut date_event = None;
        let mut rule_change = None;

        let response = ui
            .vertical(|ui| {
                form_group(ui, &self.style, |ui| {
                    labeled_row(ui, &self.style, "Start Date:", |ui| {
                        date_event = self.date_picker.show(
                            ui,
                            self.start_date_picker_id(),
                            &self.state.start_date,
                            &self.style,
                        );
                    });
                });

                form_group(ui, &self.style, |ui| {
                    rule_change = self.rule_editor.show(
                        ui,
                        &self.state.rule,
                        &self.date_picker,
                        &self.style,
                    );
                });
            })
            .response;

        self.mount();

        match date_event {
            Some(DatePickerEvent::Selected(start_date)) => self.on_start_date_change(&start_date),
            Some(DatePickerEvent::Cleared) => {
                log::debug!("Ignoring clear on start date picker");
            }
            None => {}
        }

        if let Some(rule) = rule_change {
            self.on_rule_change(&rule);
        }

        response
    }
}
