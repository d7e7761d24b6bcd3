//! Upcoming-occurrence preview for an outbound `(rule, start_date)` pair.
//!
//! The recurrence editor never validates rule grammar itself. The preview is
//! where a rule first meets a real RFC 5545 evaluator.

use chrono::{DateTime, Utc};
use rrule::RRuleSet;
use thiserror::Error;

use crate::models::recurrence::strip_prefix;
use crate::utils::date::parse_iso_datetime;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("start date '{0}' is not an ISO-8601 value")]
    InvalidStartDate(String),
    #[error("rule is empty")]
    EmptyRule,
    #[error("invalid recurrence rule: {0}")]
    InvalidRule(#[from] rrule::RRuleError),
}

/// Compose the RFC 5545 text (`DTSTART` line plus `RRULE` line) for a pair.
pub fn compose_rule_set(rule: &str, start_date: &str) -> Result<String, PreviewError> {
    let start = parse_iso_datetime(start_date)
        .ok_or_else(|| PreviewError::InvalidStartDate(start_date.to_string()))?;

    let body = strip_prefix(rule);
    let body = body.trim();
    if body.is_empty() {
        return Err(PreviewError::EmptyRule);
    }

    Ok(format!(
        "DTSTART:{}\nRRULE:{}",
        start.format("%Y%m%dT%H%M%SZ"),
        body
    ))
}

/// First `limit` occurrences of `rule` starting at `start_date`.
pub fn preview_occurrences(
    rule: &str,
    start_date: &str,
    limit: u16,
) -> Result<Vec<DateTime<Utc>>, PreviewError> {
    let text = compose_rule_set(rule, start_date)?;
    let set: RRuleSet = text.parse()?;
    let result = set.all(limit);

    log::debug!(
        "Expanded {} occurrence(s) for '{}' (limited: {})",
        result.dates.len(),
        rule,
        result.limited
    );

    Ok(result
        .dates
        .into_iter()
        .map(|date| date.with_timezone(&Utc))
        .collect())
}
