//! Session history.
//!
//! Mirrors what a browser keeps per tab: a list of visited locations and a
//! cursor. Pushing while the cursor is not at the end drops the forward
//! entries, exactly like following a link after pressing back.

/// Navigation history the router reads its location from.
pub trait History: Send + Sync {
    /// Append `path` after the cursor and move onto it.
    fn push(&mut self, path: &str);

    /// Location the cursor points at.
    fn location(&self) -> &str;

    /// Move one entry back. Returns false at the first entry.
    fn back(&mut self) -> bool;

    /// Move one entry forward. Returns false at the last entry.
    fn forward(&mut self) -> bool;

    fn can_go_back(&self) -> bool;

    fn can_go_forward(&self) -> bool;

    /// Number of entries, including the current one.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory [`History`] for one terminal session.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<String>,
    cursor: usize,
    max_entries: usize,
}

impl SessionHistory {
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    /// Start a history whose only entry is `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }

    /// Cap the number of entries; the oldest are dropped first.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl History for SessionHistory {
    fn push(&mut self, path: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path.to_string());
        if self.entries.len() > self.max_entries {
            let overflow = self.entries.len() - self.max_entries;
            self.entries.drain(..overflow);
        }
        self.cursor = self.entries.len() - 1;
    }

    fn location(&self) -> &str {
        &self.entries[self.cursor]
    }

    fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
