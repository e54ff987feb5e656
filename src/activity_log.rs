//! Append-only, newest-first record of operator actions and their outcomes.

use std::collections::VecDeque;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::info;

/// What gets recorded: a ready-made line or a structured value.
#[derive(Clone, Debug, PartialEq)]
pub enum LogPayload {
    Text(String),
    Structured(Value),
}

impl LogPayload {
    /// Renders the payload as it appears in the log.
    ///
    /// Structured values use two-space indented JSON with keys in insertion
    /// order.
    pub fn render(&self) -> String {
        match self {
            LogPayload::Text(text) => text.clone(),
            LogPayload::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

impl From<&str> for LogPayload {
    fn from(text: &str) -> Self {
        LogPayload::Text(text.to_string())
    }
}

impl From<String> for LogPayload {
    fn from(text: String) -> Self {
        LogPayload::Text(text)
    }
}

impl From<Value> for LogPayload {
    fn from(value: Value) -> Self {
        LogPayload::Structured(value)
    }
}

/// A single immutable log entry.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    at: DateTime<Utc>,
    /// ISO-8601 timestamp with millisecond precision, e.g. `2026-01-01T12:00:00.000Z`.
    pub timestamp: String,
    pub payload: String,
}

impl LogEntry {
    /// The entry as rendered in the log: `[<timestamp>] <text>` plus a blank line.
    pub fn line(&self) -> String {
        format!("[{}] {}\n\n", self.timestamp, self.payload)
    }

    /// When the entry was recorded.
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.at
    }
}

/// The activity log itself.
///
/// Entries are kept newest first and never edited, evicted or deduplicated.
#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends an entry stamped with the current time.
    pub fn record(&mut self, data: impl Into<LogPayload>) -> &LogEntry {
        self.record_at(Utc::now(), data)
    }

    /// Prepends an entry stamped with `at`.
    ///
    /// A stamp older than the newest entry is raised to match it, so
    /// timestamps never decrease from oldest to newest.
    pub fn record_at(&mut self, at: DateTime<Utc>, data: impl Into<LogPayload>) -> &LogEntry {
        let at = match self.entries.front() {
            Some(newest) if newest.at > at => newest.at,
            _ => at,
        };
        let payload = data.into().render();
        let timestamp = at.to_rfc3339_opts(SecondsFormat::Millis, true);

        info!(target: "robo_painel::activity", %timestamp, "{payload}");

        self.entries.push_front(LogEntry {
            at,
            timestamp,
            payload,
        });
        &self.entries[0]
    }

    /// The whole log as displayed, newest entry first.
    pub fn text(&self) -> String {
        self.entries.iter().map(LogEntry::line).collect()
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The capability of writing to the activity log.
pub trait LogSink {
    fn record(&self, payload: LogPayload);
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_767_225_600 + secs, 0).unwrap()
    }

    #[test]
    fn strings_are_recorded_verbatim() {
        let mut log = ActivityLog::new();
        let entry = log.record_at(at(0), "Falha ao criar ordem: boom");
        assert_eq!(entry.payload, "Falha ao criar ordem: boom");
        assert_eq!(entry.timestamp, "2026-01-01T00:00:00.000Z");
        assert_eq!(
            log.text(),
            "[2026-01-01T00:00:00.000Z] Falha ao criar ordem: boom\n\n"
        );
    }

    #[test]
    fn structured_values_are_pretty_printed_in_insertion_order() {
        let mut log = ActivityLog::new();
        log.record_at(at(0), json!({"message": "lista de ordens atualizada", "total": 2}));
        assert_eq!(
            log.newest().unwrap().payload,
            "{\n  \"message\": \"lista de ordens atualizada\",\n  \"total\": 2\n}"
        );
    }

    #[test]
    fn newest_entry_comes_first() {
        let mut log = ActivityLog::new();
        log.record_at(at(0), "first");
        log.record_at(at(1), "second");

        let payloads: Vec<_> = log.entries().map(|e| e.payload.as_str()).collect();
        assert_eq!(payloads, ["second", "first"]);
        assert!(log.text().starts_with("[2026-01-01T00:00:01.000Z] second\n\n"));
        assert!(log.text().ends_with("first\n\n"));
    }

    #[test]
    fn recording_never_touches_prior_entries() {
        let mut log = ActivityLog::new();
        log.record_at(at(0), "same");
        let before = log.text();
        log.record_at(at(0), "same");

        assert_eq!(log.len(), 2);
        assert!(log.text().ends_with(&before));
    }

    #[test]
    fn timestamps_never_go_backwards() {
        let mut log = ActivityLog::new();
        log.record_at(at(10), "later");
        let entry = log.record_at(at(5), "clock stepped back");
        assert_eq!(entry.recorded_at(), at(10));
    }

    #[test]
    fn live_timestamps_are_non_decreasing() {
        let mut log = ActivityLog::new();
        for i in 0..20 {
            log.record(format!("entry {i}"));
        }
        let stamps: Vec<_> = log.entries().map(LogEntry::recorded_at).collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
    }
}
