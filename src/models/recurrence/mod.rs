//! Recurrence rule model shared by the rule editor and the recurrence editor.
//!
//! Rules travel through the UI as RFC 5545 strings. Internally they always
//! carry the `RRULE:` prefix; the owner of the recurrence editor only ever sees
//! the bare `FREQ=...` form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Literal prefix carried by every rule held inside the editor.
pub const RRULE_PREFIX: &str = "RRULE:";

/// Every weekday, the rule a fresh editor starts with.
pub const DEFAULT_RULE: &str = "FREQ=WEEKLY;INTERVAL=1;BYDAY=MO,TU,WE,TH,FR";

/// Returns `rule` in the prefixed form used for internal state.
pub fn with_prefix(rule: &str) -> String {
    if rule.starts_with(RRULE_PREFIX) {
        rule.to_string()
    } else {
        format!("{RRULE_PREFIX}{rule}")
    }
}

/// Removes every occurrence of the internal prefix.
pub fn strip_prefix(rule: &str) -> String {
    let mut stripped = rule.replace(RRULE_PREFIX, "");
    // removing one occurrence can splice together another; input such as
    // `RRULRRULE:E:` loses the spliced characters as well
    while stripped.contains(RRULE_PREFIX) {
        stripped = stripped.replace(RRULE_PREFIX, "");
    }
    stripped
}

/// One outbound notification, in the shape the owner persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceChange {
    pub rrule: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecurrenceFrequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
}

impl RecurrenceFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yearly => "Yearly",
            Self::Monthly => "Monthly",
            Self::Weekly => "Weekly",
            Self::Daily => "Daily",
        }
    }

    pub fn to_rrule_freq(&self) -> &'static str {
        match self {
            Self::Yearly => "YEARLY",
            Self::Monthly => "MONTHLY",
            Self::Weekly => "WEEKLY",
            Self::Daily => "DAILY",
        }
    }

    pub fn from_rrule_freq(value: &str) -> Option<Self> {
        match value {
            "YEARLY" => Some(Self::Yearly),
            "MONTHLY" => Some(Self::Monthly),
            "WEEKLY" => Some(Self::Weekly),
            "DAILY" => Some(Self::Daily),
            _ => None,
        }
    }

    /// Unit shown after the interval input.
    pub fn unit_label(&self) -> &'static str {
        match self {
            Self::Yearly => "year(s)",
            Self::Monthly => "month(s)",
            Self::Weekly => "week(s)",
            Self::Daily => "day(s)",
        }
    }

    pub fn all() -> [Self; 4] {
        [Self::Yearly, Self::Monthly, Self::Weekly, Self::Daily]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    pub fn to_rrule_day(&self) -> &'static str {
        match self {
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
            Self::Sunday => "SU",
        }
    }

    pub fn from_rrule_day(day: &str) -> Option<Self> {
        match day {
            "MO" => Some(Self::Monday),
            "TU" => Some(Self::Tuesday),
            "WE" => Some(Self::Wednesday),
            "TH" => Some(Self::Thursday),
            "FR" => Some(Self::Friday),
            "SA" => Some(Self::Saturday),
            "SU" => Some(Self::Sunday),
            _ => None,
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
            Self::Sunday => "Sun",
        }
    }

    /// Position in the Monday-first flag array.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn all() -> [Self; 7] {
        [
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }
}

/// Which occurrence of a weekday inside the month ("on the first Monday").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetPosition {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl SetPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "First",
            Self::Second => "Second",
            Self::Third => "Third",
            Self::Fourth => "Fourth",
            Self::Last => "Last",
        }
    }

    pub fn value(&self) -> i32 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
            Self::Last => -1,
        }
    }

    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            4 => Some(Self::Fourth),
            -1 => Some(Self::Last),
            _ => None,
        }
    }

    pub fn all() -> [Self; 5] {
        [Self::First, Self::Second, Self::Third, Self::Fourth, Self::Last]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyMode {
    /// BYMONTHDAY=n
    OnDay(u32),
    /// BYSETPOS=p;BYDAY=dd
    OnThe(SetPosition, Weekday),
}

impl Default for MonthlyMode {
    fn default() -> Self {
        Self::OnDay(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleEnd {
    #[default]
    Never,
    After(u32),
    OnDate(NaiveDate),
}

/// Parse the date part of an RRULE date value (`YYYYMMDD` optionally followed by `T...`).
pub fn parse_rule_date(value: &str) -> Option<NaiveDate> {
    let digits = value.get(..8)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year = digits[0..4].parse::<i32>().ok()?;
    let month = digits[4..6].parse::<u32>().ok()?;
    let day = digits[6..8].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn format_rule_date(date: NaiveDate) -> String {
    format!("{}T000000Z", date.format("%Y%m%d"))
}

/// Holds whatever could be read out of an RRULE string.
///
/// Parsing never fails; unknown keys and malformed values are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedRRule {
    pub frequency: Option<RecurrenceFrequency>,
    pub interval: Option<u32>,
    pub monthly: Option<MonthlyMode>,
    pub byday_flags: [bool; 7],
    pub end: RuleEnd,
    pub start_date: Option<NaiveDate>,
}

impl ParsedRRule {
    /// Parse an RRULE string, with or without prefix and DTSTART line.
    pub fn parse(rule: &str) -> Self {
        let mut result = Self::default();
        let mut set_position = None;
        let mut single_day = None;

        for line in rule.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if let Some(value) = line.strip_prefix("DTSTART") {
                // DTSTART:20190101T000000Z or DTSTART;TZID=...:20190101T000000
                result.start_date = value
                    .rsplit_once(':')
                    .and_then(|(_, date)| parse_rule_date(date));
                continue;
            }

            let body = line.strip_prefix(RRULE_PREFIX).unwrap_or(line);
            for part in body.split(';') {
                let Some((key, value)) = part.split_once('=') else {
                    continue;
                };
                match key.trim().to_ascii_uppercase().as_str() {
                    "FREQ" => {
                        result.frequency = RecurrenceFrequency::from_rrule_freq(value.trim());
                    }
                    "INTERVAL" => {
                        if let Ok(val) = value.trim().parse::<u32>() {
                            result.interval = Some(val.max(1));
                        }
                    }
                    "COUNT" => {
                        if let Ok(val) = value.trim().parse::<u32>() {
                            result.end = RuleEnd::After(val);
                        }
                    }
                    "UNTIL" => {
                        if let Some(date) = parse_rule_date(value.trim()) {
                            result.end = RuleEnd::OnDate(date);
                        }
                    }
                    "BYMONTHDAY" => {
                        if let Ok(day) = value.trim().parse::<u32>() {
                            if (1..=31).contains(&day) {
                                result.monthly = Some(MonthlyMode::OnDay(day));
                            }
                        }
                    }
                    "BYSETPOS" => {
                        set_position = value.trim().parse::<i32>().ok().and_then(SetPosition::from_value);
                    }
                    "BYDAY" => {
                        for day in value.split(',').map(str::trim) {
                            if day.len() > 2 && day.is_char_boundary(day.len() - 2) {
                                let (position, code) = day.split_at(day.len() - 2);
                                let weekday = Weekday::from_rrule_day(code);
                                let position = position
                                    .trim_start_matches('+')
                                    .parse::<i32>()
                                    .ok()
                                    .and_then(SetPosition::from_value);
                                if let (Some(position), Some(weekday)) = (position, weekday) {
                                    result.monthly = Some(MonthlyMode::OnThe(position, weekday));
                                }
                            } else if let Some(weekday) = Weekday::from_rrule_day(day) {
                                result.byday_flags[weekday.index()] = true;
                                single_day = Some(weekday);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        if let (Some(position), Some(weekday)) = (set_position, single_day) {
            if result.byday_flags.iter().filter(|flag| **flag).count() == 1 {
                result.monthly = Some(MonthlyMode::OnThe(position, weekday));
            }
        }

        result
    }
}

/// Fully resolved form state of the rule editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleForm {
    pub frequency: RecurrenceFrequency,
    pub interval: u32,
    pub monthly: MonthlyMode,
    pub byday_flags: [bool; 7], // [Mon, Tue, Wed, Thu, Fri, Sat, Sun]
    pub end: RuleEnd,
    pub start_date: NaiveDate,
}

impl RuleForm {
    /// Resolve a parsed rule against the frequencies the editor offers.
    ///
    /// A frequency that is missing or not offered falls back to the first
    /// offered one (or weekly when nothing is offered).
    pub fn from_parsed(parsed: &ParsedRRule, allowed: &[RecurrenceFrequency], today: NaiveDate) -> Self {
        let fallback = allowed.first().copied().unwrap_or(RecurrenceFrequency::Weekly);
        let frequency = parsed
            .frequency
            .filter(|freq| allowed.is_empty() || allowed.contains(freq))
            .unwrap_or(fallback);

        Self {
            frequency,
            interval: parsed.interval.unwrap_or(1),
            monthly: parsed.monthly.unwrap_or_default(),
            byday_flags: parsed.byday_flags,
            end: parsed.end,
            start_date: parsed.start_date.unwrap_or(today),
        }
    }

    pub fn weekday_flag(&self, weekday: Weekday) -> bool {
        self.byday_flags[weekday.index()]
    }

    pub fn set_weekday_flag(&mut self, weekday: Weekday, value: bool) {
        self.byday_flags[weekday.index()] = value;
    }

    /// Build the prefixed rule string.
    ///
    /// `include_start` prepends a DTSTART line, `include_end` appends COUNT/UNTIL.
    pub fn build(&self, include_start: bool, include_end: bool) -> String {
        let mut parts = vec![
            format!("FREQ={}", self.frequency.to_rrule_freq()),
            format!("INTERVAL={}", self.interval.max(1)),
        ];

        match self.frequency {
            RecurrenceFrequency::Weekly => self.append_standard_byday(&mut parts),
            RecurrenceFrequency::Monthly => match self.monthly {
                MonthlyMode::OnDay(day) => parts.push(format!("BYMONTHDAY={}", day)),
                MonthlyMode::OnThe(position, weekday) => {
                    parts.push(format!("BYSETPOS={}", position.value()));
                    parts.push(format!("BYDAY={}", weekday.to_rrule_day()));
                }
            },
            RecurrenceFrequency::Yearly | RecurrenceFrequency::Daily => {}
        }

        if include_end {
            match self.end {
                RuleEnd::Never => {}
                RuleEnd::After(count) => parts.push(format!("COUNT={}", count)),
                RuleEnd::OnDate(until) => parts.push(format!("UNTIL={}", format_rule_date(until))),
            }
        }

        let rule = format!("{RRULE_PREFIX}{}", parts.join(";"));
        if include_start {
            format!("DTSTART:{}\n{}", format_rule_date(self.start_date), rule)
        } else {
            rule
        }
    }

    fn append_standard_byday(&self, parts: &mut Vec<String>) {
        let days: Vec<&str> = Weekday::all()
            .iter()
            .filter(|day| self.weekday_flag(**day))
            .map(|day| day.to_rrule_day())
            .collect();

        if !days.is_empty() {
            parts.push(format!("BYDAY={}", days.join(",")));
        }
    }
}
