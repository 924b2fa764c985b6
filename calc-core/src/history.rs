//! The ordered record of past evaluations.

use serde::{Deserialize, Serialize};

/// Separates the raw input from the simplification steps in [`HistoryEntry::expression`].
pub const SEPARATOR: &str = " → ";

/// The result of an entry whose expression failed to evaluate.
pub const ERR: &str = "ERR";

/// The result of an entry whose expression was graphed.
pub const GRAPH: &str = "GRAPH";

/// A single evaluation in the history.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryEntry {
    /// Unique identifier, strictly increasing in creation order.
    pub id: u64,

    /// The expression as displayed. The first segment is the raw input; later segments, joined
    /// with [`SEPARATOR`], are simplification steps.
    pub expression: String,

    /// The formatted result, [`ERR`], [`GRAPH`], or free text for informational entries.
    pub result: String,

    /// Milliseconds since the Unix epoch at which the entry was created.
    pub timestamp: i64,
}

impl HistoryEntry {
    /// Returns the raw input that produced this entry, without any simplification steps.
    pub fn input(&self) -> &str {
        first_segment(&self.expression)
    }
}

/// Returns the part of a displayed expression before the first [`SEPARATOR`].
pub fn first_segment(expression: &str) -> &str {
    expression
        .split_once(SEPARATOR)
        .map_or(expression, |(first, _)| first)
}

/// The largest id accepted from stored data, the largest integer a JSON number holds exactly.
/// Larger ids leave too little room for new entries and are renumbered on load.
pub const MAX_STORED_ID: u64 = 1 << 53;

/// The history of evaluations, stored oldest first and capped at a fixed number of entries.
#[derive(Clone, Debug, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
    limit: usize,
}

impl History {
    /// Creates an empty history holding at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        Self { entries: Vec::new(), limit: limit.max(1) }
    }

    /// Creates a history from already validated entries, keeping only the newest `limit` of
    /// them.
    ///
    /// The ids of the entries must be positive, strictly increasing and at most
    /// [`MAX_STORED_ID`].
    pub fn from_entries(mut entries: Vec<HistoryEntry>, limit: usize) -> Self {
        let limit = limit.max(1);
        if entries.len() > limit {
            entries.drain(..entries.len() - limit);
        }
        Self { entries, limit }
    }

    /// The id the next entry will receive.
    pub fn next_id(&self) -> u64 {
        self.entries.iter().map(|entry| entry.id).max().unwrap_or(0) + 1
    }

    /// Appends a new entry, dropping the oldest entries if the limit is exceeded. Returns the id
    /// of the new entry.
    pub fn push(
        &mut self,
        expression: impl Into<String>,
        result: impl Into<String>,
        timestamp: i64,
    ) -> u64 {
        let id = self.next_id();
        self.entries.push(HistoryEntry {
            id,
            expression: expression.into(),
            result: result.into(),
            timestamp,
        });

        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }
        id
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the entry with the given id.
    pub fn get(&self, id: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Returns the entry with the largest id, which is the most recently created one.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.iter().max_by_key(|entry| entry.id)
    }

    /// Returns the entry at `index` when ordered newest first.
    pub fn nth_newest(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.iter().rev().nth(index)
    }

    /// Returns the entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// A cursor over the history, ordered newest first, used to recall previous inputs.
///
/// The cursor starts at "none", meaning no entry is recalled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Recall {
    cursor: Option<usize>,
}

impl Recall {
    /// Returns the newest-first index of the recalled entry, if any.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Moves the cursor to "none".
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// Moves the cursor one entry towards the oldest entry, returning the recalled entry. Moving
    /// past the oldest entry keeps the cursor where it is.
    pub fn previous<'a>(&mut self, history: &'a History) -> Option<&'a HistoryEntry> {
        if history.is_empty() {
            return None;
        }

        let index = match self.cursor {
            None => 0,
            Some(index) => (index + 1).min(history.len() - 1),
        };
        self.cursor = Some(index);
        history.nth_newest(index)
    }

    /// Moves the cursor one entry towards the newest entry, returning the recalled entry. Moving
    /// past the newest entry resets the cursor to "none" and returns [`None`].
    pub fn next<'a>(&mut self, history: &'a History) -> Option<&'a HistoryEntry> {
        match self.cursor {
            None | Some(0) => {
                self.cursor = None;
                None
            },
            Some(index) => {
                let index = (index - 1).min(history.len().saturating_sub(1));
                self.cursor = Some(index);
                history.nth_newest(index)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn ids(history: &History) -> Vec<u64> {
        history.entries().iter().map(|entry| entry.id).collect()
    }

    #[test]
    fn ids_are_monotonic() {
        let mut history = History::new(100);
        assert_eq!(history.push("1+1", "2", 0), 1);
        assert_eq!(history.push("2+2", "4", 0), 2);
        history.clear();
        assert_eq!(history.push("3+3", "6", 0), 1);
    }

    #[test]
    fn limit_drops_oldest() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.push(i.to_string(), i.to_string(), 0);
        }
        assert_eq!(ids(&history), vec![3, 4, 5]);
        assert_eq!(history.next_id(), 6);
        assert_eq!(history.latest().unwrap().id, 5);
    }

    #[test]
    fn first_segment_strips_trace() {
        assert_eq!(first_segment("(2+3)*4 → 5*4"), "(2+3)*4");
        assert_eq!(first_segment("1+1"), "1+1");
    }

    #[test]
    fn recall_walks_newest_first() {
        let mut history = History::new(100);
        history.push("a", "1", 0);
        history.push("b", "2", 0);

        let mut recall = Recall::default();
        assert_eq!(recall.previous(&history).unwrap().expression, "b");
        assert_eq!(recall.previous(&history).unwrap().expression, "a");
        assert_eq!(recall.previous(&history).unwrap().expression, "a");
        assert_eq!(recall.cursor(), Some(1));

        assert_eq!(recall.next(&history).unwrap().expression, "b");
        assert_eq!(recall.next(&history), None);
        assert_eq!(recall.cursor(), None);
        assert_eq!(recall.next(&history), None);
    }

    #[test]
    fn recall_on_empty_history() {
        let history = History::new(100);
        let mut recall = Recall::default();
        assert_eq!(recall.previous(&history), None);
        assert_eq!(recall.cursor(), None);
    }
}
