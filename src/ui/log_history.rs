//! Bounded history of log lines for the dashboard.

use std::collections::VecDeque;

/// Keeps the most recent `capacity` lines, dropping the oldest when full.
#[derive(Clone, Debug)]
pub struct LogHistory {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogHistory {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "log history needs room for at least one line");
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// The newest `n` lines, oldest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &str> {
        self.iter().skip(self.len().saturating_sub(n))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
