use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stackviz_core::{TraceStep, Verdict};

/// One past `check` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub balanced: bool,
    pub timestamp: DateTime<Utc>,
    pub steps: Vec<TraceStep>,
    #[serde(
        rename = "errorPosition",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub error_position: Option<usize>,
}

impl HistoryEntry {
    pub fn new(expression: &str, verdict: &Verdict, timestamp: DateTime<Utc>) -> Self {
        Self {
            expression: expression.to_string(),
            balanced: verdict.balanced,
            timestamp,
            steps: verdict.steps.clone(),
            error_position: verdict.error_position,
        }
    }
}

/// Bounded, most-recent-first record of checks. Lives as long as the process.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Up to `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().take(limit)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackviz_core::validate;

    fn entry(expression: &str) -> HistoryEntry {
        HistoryEntry::new(expression, &validate(expression), Utc::now())
    }

    #[test]
    fn test_newest_first() {
        let mut history = History::with_capacity(10);
        history.record(entry("()"));
        history.record(entry("(("));
        history.record(entry("[]"));

        let expressions: Vec<&str> = history.recent(10).map(|e| e.expression.as_str()).collect();
        assert_eq!(expressions, vec!["[]", "((", "()"]);
    }

    #[test]
    fn test_oldest_evicted_at_capacity() {
        let mut history = History::with_capacity(10);
        for i in 0..12 {
            history.record(entry(&format!("({i})")));
        }
        assert_eq!(history.len(), 10);

        let expressions: Vec<&str> = history.recent(10).map(|e| e.expression.as_str()).collect();
        assert_eq!(expressions.first(), Some(&"(11)"));
        assert_eq!(expressions.last(), Some(&"(2)"));
    }

    #[test]
    fn test_recent_limit() {
        let mut history = History::with_capacity(10);
        for i in 0..7 {
            history.record(entry(&format!("[{i}]")));
        }
        assert_eq!(history.recent(5).count(), 5);
        assert_eq!(history.recent(50).count(), 7);
        assert_eq!(history.recent(0).count(), 0);
    }

    #[test]
    fn test_entry_copies_verdict() {
        let e = entry("(]");
        assert!(!e.balanced);
        assert_eq!(e.steps.len(), 2);
        assert_eq!(e.error_position, Some(1));

        let value = serde_json::to_value(&e).unwrap();
        assert_eq!(value["errorPosition"], 1);
        let balanced = serde_json::to_value(entry("()")).unwrap();
        assert!(balanced.get("errorPosition").is_none());
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut history = History::with_capacity(0);
        history.record(entry("a"));
        history.record(entry("b"));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
        assert!(!history.is_empty());
    }
}
