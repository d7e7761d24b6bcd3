// Unit tests for the RRULE model
// Covers parsing of owner-stored rules and what the rule editor builds back

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use standup_recurrence::models::recurrence::{
    strip_prefix, with_prefix, MonthlyMode, ParsedRRule, RecurrenceFrequency, RuleEnd, RuleForm,
    SetPosition, Weekday,
};
use test_case::test_case;

const STANDUP_FREQUENCIES: [RecurrenceFrequency; 2] =
    [RecurrenceFrequency::Monthly, RecurrenceFrequency::Weekly];

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn standup_form(rule: &str) -> RuleForm {
    RuleForm::from_parsed(&ParsedRRule::parse(rule), &STANDUP_FREQUENCIES, ymd(2025, 1, 1))
}

#[test_case("FREQ=DAILY", RecurrenceFrequency::Daily ; "daily")]
#[test_case("FREQ=WEEKLY;BYDAY=MO", RecurrenceFrequency::Weekly ; "weekly")]
#[test_case("RRULE:FREQ=MONTHLY;BYMONTHDAY=3", RecurrenceFrequency::Monthly ; "prefixed monthly")]
#[test_case("FREQ=YEARLY;INTERVAL=1", RecurrenceFrequency::Yearly ; "yearly")]
fn test_parse_frequency(rule: &str, expected: RecurrenceFrequency) {
    assert_eq!(ParsedRRule::parse(rule).frequency, Some(expected));
}

#[test_case("FREQ=WEEKLY;INTERVAL=2", 2 ; "fortnightly")]
#[test_case("FREQ=MONTHLY;INTERVAL=3", 3 ; "quarterly")]
#[test_case("FREQ=WEEKLY;INTERVAL=0", 1 ; "zero is clamped")]
fn test_parse_interval(rule: &str, expected: u32) {
    assert_eq!(ParsedRRule::parse(rule).interval, Some(expected));
}

#[test]
fn test_parse_weekday_flags_are_monday_first() {
    let parsed = ParsedRRule::parse("FREQ=WEEKLY;BYDAY=SU,WE");
    assert_eq!(parsed.byday_flags, [false, false, true, false, false, false, true]);
}

#[test_case("FREQ=MONTHLY;BYSETPOS=-1;BYDAY=FR", SetPosition::Last, Weekday::Friday ; "setpos form")]
#[test_case("FREQ=MONTHLY;BYDAY=2TU", SetPosition::Second, Weekday::Tuesday ; "positional form")]
#[test_case("FREQ=MONTHLY;BYDAY=+1MO", SetPosition::First, Weekday::Monday ; "signed positional form")]
fn test_parse_monthly_on_the(rule: &str, position: SetPosition, weekday: Weekday) {
    assert_eq!(
        ParsedRRule::parse(rule).monthly,
        Some(MonthlyMode::OnThe(position, weekday))
    );
}

#[test]
fn test_parse_ignores_out_of_range_month_day() {
    assert_eq!(ParsedRRule::parse("FREQ=MONTHLY;BYMONTHDAY=32").monthly, None);
}

#[test]
fn test_parse_end_and_start() {
    let parsed = ParsedRRule::parse("DTSTART:20250301T000000Z\nRRULE:FREQ=DAILY;UNTIL=20251231T000000Z");
    assert_eq!(parsed.start_date, Some(ymd(2025, 3, 1)));
    assert_eq!(parsed.end, RuleEnd::OnDate(ymd(2025, 12, 31)));

    let parsed = ParsedRRule::parse("FREQ=DAILY;COUNT=10");
    assert_eq!(parsed.end, RuleEnd::After(10));
}

#[test]
fn test_parse_garbage_is_empty() {
    assert_eq!(ParsedRRule::parse("not a rule"), ParsedRRule::default());
}

#[test_case("FREQ=WEEKLY;INTERVAL=1;BYDAY=MO,TU,WE,TH,FR" ; "weekdays")]
#[test_case("FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,TH" ; "fortnightly")]
#[test_case("FREQ=MONTHLY;INTERVAL=1;BYMONTHDAY=15" ; "fifteenth")]
#[test_case("FREQ=MONTHLY;INTERVAL=3;BYSETPOS=-1;BYDAY=FR" ; "quarterly last friday")]
fn test_standup_rules_rebuild_unchanged(rule: &str) {
    let form = standup_form(rule);
    assert_eq!(strip_prefix(&form.build(false, false)), rule);
}

#[test]
fn test_unoffered_frequency_falls_back_to_first_option() {
    let form = standup_form("FREQ=DAILY;INTERVAL=4");
    assert_eq!(form.frequency, RecurrenceFrequency::Monthly);
    assert_eq!(form.interval, 4);
    assert_eq!(form.build(false, false), "RRULE:FREQ=MONTHLY;INTERVAL=4;BYMONTHDAY=1");
}

#[test]
fn test_build_with_start_and_end() {
    let mut form = standup_form("FREQ=WEEKLY;INTERVAL=1;BYDAY=FR");
    form.start_date = ymd(2025, 2, 14);
    form.end = RuleEnd::After(6);

    assert_eq!(
        form.build(true, true),
        "DTSTART:20250214T000000Z\nRRULE:FREQ=WEEKLY;INTERVAL=1;BYDAY=FR;COUNT=6"
    );
    assert_eq!(
        form.build(false, false),
        "RRULE:FREQ=WEEKLY;INTERVAL=1;BYDAY=FR"
    );
}

#[test]
fn test_toggling_weekdays() {
    let mut form = standup_form("FREQ=WEEKLY;INTERVAL=1;BYDAY=MO");
    form.set_weekday_flag(Weekday::Monday, false);
    form.set_weekday_flag(Weekday::Wednesday, true);
    assert!(form.weekday_flag(Weekday::Wednesday));
    assert_eq!(form.build(false, false), "RRULE:FREQ=WEEKLY;INTERVAL=1;BYDAY=WE");

    form.set_weekday_flag(Weekday::Wednesday, false);
    assert_eq!(form.build(false, false), "RRULE:FREQ=WEEKLY;INTERVAL=1");
}

#[test]
fn test_prefix_helpers() {
    assert_eq!(with_prefix("FREQ=DAILY"), "RRULE:FREQ=DAILY");
    assert_eq!(with_prefix("RRULE:FREQ=DAILY"), "RRULE:FREQ=DAILY");
    assert_eq!(strip_prefix(&with_prefix("FREQ=DAILY")), "FREQ=DAILY");
}
