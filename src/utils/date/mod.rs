// Date utility functions
// ISO-8601 conversions shared by the date picker and the occurrence preview

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Current instant as ISO-8601 UTC with millisecond precision, e.g. `2026-10-19T08:15:00.123Z`.
pub fn now_iso() -> String {
    to_iso(Utc::now())
}

pub fn to_iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Noon UTC of `date`, which keeps the calendar day stable for every UTC offset in use.
pub fn date_to_iso(date: NaiveDate) -> String {
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));
    to_iso(Utc.from_utc_datetime(&noon))
}

/// Parse an ISO-8601 value into a UTC instant.
///
/// Accepts RFC 3339 date-times, plain `YYYY-MM-DD` (midnight UTC) and compact
/// `YYYYMMDD[THHMMSS[Z]]`.
pub fn parse_iso_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }

    let compact = value.trim_end_matches('Z');
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(compact, "%Y%m%dT%H%M%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    NaiveDate::parse_from_str(compact, "%Y%m%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Calendar day of an ISO-8601 value, read in UTC.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    parse_iso_datetime(value).map(|instant| instant.date_naive())
}

/// Shift a date by whole months, clamping the day to the target month's length.
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let total_months = date.year() * 12 + (date.month() as i32 - 1) + delta;
    let new_year = total_months.div_euclid(12);
    let new_month = (total_months.rem_euclid(12) + 1) as u32;
    let max_day = days_in_month(new_year, new_month);
    let day = date.day().min(max_day);
    NaiveDate::from_ymd_opt(new_year, new_month, day).unwrap_or(date)
}

/// Get the number of days in a given month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

/// Format a date for display based on the date format setting.
///
/// # Arguments
/// * `date` - The date to format
/// * `date_format` - The format preference ("MM/DD/YYYY", "DD/MM/YYYY" or "YYYY/MM/DD")
pub fn format_display_date(date: NaiveDate, date_format: &str) -> String {
    if date_format.starts_with("DD/MM") || date_format.starts_with("dd/mm") {
        date.format("%d/%m/%Y").to_string()
    } else if date_format.starts_with("YYYY") || date_format.starts_with("yyyy") {
        date.format("%Y/%m/%d").to_string()
    } else {
        date.format("%m/%d/%Y").to_string()
    }
}
