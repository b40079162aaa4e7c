use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::core::errors::{AdminError, Result};
use crate::core::models::audit_entry::{AuditAction, AuditEntry};
use crate::core::models::selection::Selection;

/// Optional bounds on the entry timestamp.
///
/// Only constrains when both ends are set; both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= *ts && *ts <= end,
            _ => true,
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// Compound audit trail filter: text ∧ action ∧ user ∧ date range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuditFilter {
    /// Case-insensitive substring of user name, action code or details.
    pub search: String,
    pub action: Selection<AuditAction>,
    pub user: Selection<String>,
    pub range: DateRange,
}

impl AuditFilter {
    pub fn matches(&self, entry: &AuditEntry) -> bool {
        self.matches_search(entry)
            && self.action.accepts(&entry.action)
            && self.user.accepts(&entry.user_name)
            && self.range.contains(&entry.timestamp)
    }

    fn matches_search(&self, entry: &AuditEntry) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        entry.user_name.to_lowercase().contains(&needle)
            || entry.action.code().to_lowercase().contains(&needle)
            || entry.details.to_lowercase().contains(&needle)
    }

    /// Keep matching entries, preserving source order.
    pub fn apply<'a>(&self, entries: &'a [AuditEntry]) -> Vec<&'a AuditEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }

    /// True when no criterion narrows the result.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.action == Selection::All
            && self.user == Selection::All
            && !self.range.is_bounded()
    }
}

/// Parse a date bound: `YYYY-MM-DD` (midnight UTC) or an RFC 3339 instant.
pub fn parse_bound(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| Utc.from_utc_datetime(&dt))
            .ok_or_else(|| AdminError::InvalidDate {
                input: trimmed.to_string(),
            });
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AdminError::InvalidDate {
            input: trimmed.to_string(),
        })
}

/// Distinct user names in first-seen order, for the user filter choices.
pub fn distinct_users(entries: &[AuditEntry]) -> Vec<String> {
    let mut users: Vec<String> = Vec::new();
    for entry in entries {
        if !users.contains(&entry.user_name) {
            users.push(entry.user_name.clone());
        }
    }
    users
}
