use crate::models::recurrence::{with_prefix, DEFAULT_RULE};
use crate::models::settings::ReconcileMode;
use crate::utils::date::now_iso;

/// Local state of a recurrence editor, owned from mount to unmount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceState {
    /// Always carries the `RRULE:` prefix
    pub rule: String,
    /// ISO-8601
    pub start_date: String,
}

impl RecurrenceState {
    pub fn new(rule: &str, start_date: impl Into<String>) -> Self {
        Self {
            rule: with_prefix(rule),
            start_date: start_date.into(),
        }
    }

    /// Every weekday, starting now.
    pub fn initial() -> Self {
        Self::new(DEFAULT_RULE, now_iso())
    }
}

impl Default for RecurrenceState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Values the owner passes down every frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurrenceProps {
    pub rule: Option<String>,
    pub start_date: Option<String>,
}

impl RecurrenceProps {
    pub fn new(rule: impl Into<String>, start_date: impl Into<String>) -> Self {
        Self {
            rule: Some(rule.into()),
            start_date: Some(start_date.into()),
        }
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Merge incoming props into `prev`.
///
/// Returns `None` when the state stays as it is. Incoming rules are compared
/// in their prefixed form.
pub fn reconcile(
    props: &RecurrenceProps,
    prev: &RecurrenceState,
    mode: ReconcileMode,
) -> Option<RecurrenceState> {
    let incoming_rule = non_empty(&props.rule).map(with_prefix);
    let incoming_start = non_empty(&props.start_date);

    let next = match mode {
        ReconcileMode::Legacy => {
            let rule_matches = incoming_rule.as_deref() == Some(prev.rule.as_str());
            let start_matches = props.start_date.as_deref() == Some(prev.start_date.as_str());
            // Either field matching suppresses the whole update.
            if rule_matches || start_matches {
                return None;
            }

            RecurrenceState {
                rule: incoming_rule.unwrap_or_else(|| prev.rule.clone()),
                start_date: incoming_start
                    .map(str::to_string)
                    .unwrap_or_else(|| prev.start_date.clone()),
            }
        }
        ReconcileMode::PerField => RecurrenceState {
            rule: incoming_rule.unwrap_or_else(|| prev.rule.clone()),
            start_date: incoming_start
                .map(str::to_string)
                .unwrap_or_else(|| prev.start_date.clone()),
        },
    };

    (next != *prev).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    const R: &str = "RRULE:FREQ=WEEKLY;INTERVAL=1;BYDAY=MO";
    const R2: &str = "RRULE:FREQ=MONTHLY;INTERVAL=1;BYMONTHDAY=15";
    const D: &str = "2025-03-03T12:00:00.000Z";
    const D2: &str = "2025-04-01T12:00:00.000Z";

    fn prev() -> RecurrenceState {
        RecurrenceState::new(R, D)
    }

    #[test]
    fn test_initial_state_is_prefixed_weekday_rule() {
        let state = RecurrenceState::initial();
        assert_eq!(state.rule, "RRULE:FREQ=WEEKLY;INTERVAL=1;BYDAY=MO,TU,WE,TH,FR");
        assert!(crate::utils::date::parse_iso_datetime(&state.start_date).is_some());
    }

    #[test]
    fn test_legacy_rule_match_suppresses_start_date_update() {
        let props = RecurrenceProps::new(R, D2);
        assert_eq!(reconcile(&props, &prev(), ReconcileMode::Legacy), None);
    }

    #[test]
    fn test_legacy_start_match_suppresses_rule_update() {
        let props = RecurrenceProps::new(R2, D);
        assert_eq!(reconcile(&props, &prev(), ReconcileMode::Legacy), None);
    }

    #[test]
    fn test_legacy_compares_unprefixed_props() {
        let props = RecurrenceProps::new("FREQ=WEEKLY;INTERVAL=1;BYDAY=MO", D2);
        assert_eq!(reconcile(&props, &prev(), ReconcileMode::Legacy), None);
    }

    #[test_case(ReconcileMode::Legacy ; "legacy")]
    #[test_case(ReconcileMode::PerField ; "per field")]
    fn test_both_fields_differ_replaces_both(mode: ReconcileMode) {
        let props = RecurrenceProps::new("FREQ=MONTHLY;INTERVAL=1;BYMONTHDAY=15", D2);
        assert_eq!(
            reconcile(&props, &prev(), mode),
            Some(RecurrenceState::new(R2, D2))
        );
    }

    #[test_case(ReconcileMode::Legacy ; "legacy")]
    #[test_case(ReconcileMode::PerField ; "per field")]
    fn test_identical_props_are_a_no_op(mode: ReconcileMode) {
        let props = RecurrenceProps::new(R, D);
        assert_eq!(reconcile(&props, &prev(), mode), None);
    }

    #[test_case(ReconcileMode::Legacy ; "legacy")]
    #[test_case(ReconcileMode::PerField ; "per field")]
    fn test_absent_props_keep_state(mode: ReconcileMode) {
        assert_eq!(reconcile(&RecurrenceProps::default(), &prev(), mode), None);
        let empty = RecurrenceProps::new("", "");
        assert_eq!(reconcile(&empty, &prev(), mode), None);
    }

    #[test]
    fn test_legacy_missing_rule_falls_back_to_previous() {
        let props = RecurrenceProps::default().with_start_date(D2);
        assert_eq!(
            reconcile(&props, &prev(), ReconcileMode::Legacy),
            Some(RecurrenceState::new(R, D2))
        );
    }

    #[test]
    fn test_per_field_updates_only_the_changed_field() {
        let props = RecurrenceProps::new(R, D2);
        assert_eq!(
            reconcile(&props, &prev(), ReconcileMode::PerField),
            Some(RecurrenceState::new(R, D2))
        );

        let props = RecurrenceProps::new(R2, D);
        assert_eq!(
            reconcile(&props, &prev(), ReconcileMode::PerField),
            Some(RecurrenceState::new(R2, D))
        );
    }
}
