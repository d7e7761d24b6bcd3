// Property-based tests for the recurrence editor's outbound contract
// Any rule or date the widgets can hand over must reach the owner intact

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use standup_recurrence::models::recurrence::{
    MonthlyMode, ParsedRRule, RecurrenceFrequency, RuleForm, SetPosition, Weekday,
};
use standup_recurrence::models::settings::ReconcileMode;
use standup_recurrence::ui_egui::recurrence_editor::reconcile;
use standup_recurrence::ui_egui::theme::EditorStyle;
use standup_recurrence::ui_egui::{RecurrenceEditor, RecurrenceProps, RecurrenceState};

type Calls = Rc<RefCell<Vec<(String, String)>>>;

fn recording_editor() -> (RecurrenceEditor, Calls) {
    let calls: Calls = Rc::default();
    let sink = Rc::clone(&calls);
    let editor = RecurrenceEditor::new(
        "standup",
        move |rule: &str, start: &str| {
            sink.borrow_mut().push((rule.to_string(), start.to_string()));
        },
        EditorStyle::default(),
    );
    (editor, calls)
}

fn weekday() -> impl Strategy<Value = Weekday> {
    (0usize..7).prop_map(|i| Weekday::all()[i])
}

fn set_position() -> impl Strategy<Value = SetPosition> {
    (0usize..5).prop_map(|i| SetPosition::all()[i])
}

fn monthly_mode() -> impl Strategy<Value = MonthlyMode> {
    prop_oneof![
        (1u32..=31).prop_map(MonthlyMode::OnDay),
        (set_position(), weekday()).prop_map(|(p, w)| MonthlyMode::OnThe(p, w)),
    ]
}

/// Rules as the rule editor produces them (prefixed, no start or end)
fn editor_rule() -> impl Strategy<Value = String> {
    (
        prop::bool::ANY,
        1u32..=999,
        monthly_mode(),
        prop::array::uniform7(prop::bool::ANY),
    )
        .prop_map(|(monthly, interval, mode, flags)| {
            let mut form = RuleForm::from_parsed(
                &ParsedRRule::default(),
                &[],
                chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            );
            form.frequency = if monthly {
                RecurrenceFrequency::Monthly
            } else {
                RecurrenceFrequency::Weekly
            };
            form.interval = interval;
            form.monthly = mode;
            form.byday_flags = flags;
            form.build(false, false)
        })
}

fn iso_date() -> impl Strategy<Value = String> {
    (2000i32..2100, 1u32..=12, 1u32..=28, 0u32..24)
        .prop_map(|(y, m, d, h)| format!("{y:04}-{m:02}-{d:02}T{h:02}:00:00.000Z"))
}

proptest! {
    /// Property: the rule handler hands over exactly the rule minus its prefix
    #[test]
    fn prop_rule_handler_passes_rule_through(rule in editor_rule(), start in iso_date()) {
        let (mut editor, calls) = recording_editor();
        editor.on_start_date_change(&start);
        editor.on_rule_change(&rule);

        let last = calls.borrow().last().cloned().unwrap();
        prop_assert_eq!(last.0, rule.trim_start_matches("RRULE:").to_string());
        prop_assert_eq!(last.1, start);
    }

    /// Property: the start date handler pairs any date with the current rule
    #[test]
    fn prop_start_handler_keeps_rule(rule in editor_rule(), start in iso_date()) {
        let (mut editor, calls) = recording_editor();
        editor.on_rule_change(&rule);
        editor.on_start_date_change(&start);

        let last = calls.borrow().last().cloned().unwrap();
        prop_assert_eq!(last.0, rule.trim_start_matches("RRULE:").to_string());
        prop_assert_eq!(last.1, start);
    }

    /// Property: the owner never sees the internal prefix, whatever comes in
    #[test]
    fn prop_prefix_never_escapes(raw in ".*", start in iso_date()) {
        let (mut editor, calls) = recording_editor();
        editor.mount();
        editor.apply_props(&RecurrenceProps::new(raw.clone(), start.clone()));
        editor.on_rule_change(&raw);
        editor.on_start_date_change(&start);

        for (rule, _) in calls.borrow().iter() {
            prop_assert!(!rule.contains("RRULE:"));
        }
    }

    /// Property: with the legacy guard a matching rule blocks any start date update
    #[test]
    fn prop_legacy_rule_match_blocks_update(rule in editor_rule(), d1 in iso_date(), d2 in iso_date()) {
        let prev = RecurrenceState::new(&rule, d1);
        let props = RecurrenceProps::new(rule, d2);
        prop_assert_eq!(reconcile(&props, &prev, ReconcileMode::Legacy), None);
    }

    /// Property: reconciling the state's own values is always a no-op
    #[test]
    fn prop_reconcile_is_idempotent(rule in editor_rule(), start in iso_date(), per_field in prop::bool::ANY) {
        let mode = if per_field { ReconcileMode::PerField } else { ReconcileMode::Legacy };
        let state = RecurrenceState::new(&rule, start.clone());
        let props = RecurrenceProps::new(rule, start);
        prop_assert_eq!(reconcile(&props, &state, mode), None);
    }
}
