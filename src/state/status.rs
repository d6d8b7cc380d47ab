//! Bounded history of status messages

use std::collections::VecDeque;

/// Ring buffer of status lines; the newest entry is shown in the status bar.
#[derive(Debug, Clone)]
pub struct StatusLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl StatusLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a message, evicting the oldest when full
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "status", "{}", message);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(|s| s.as_str())
    }

    /// Oldest first
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.as_str())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
