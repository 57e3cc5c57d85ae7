//! In-memory navigation history.

use trellis_core::Location;

/// A stack of locations with a cursor.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    index: usize,
}

impl MemoryHistory {
    /// Create a history holding `initial`.
    pub fn new(initial: impl Into<Location>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    /// The current location.
    pub fn location(&self) -> &Location {
        &self.entries[self.index]
    }

    /// Push a new entry, discarding any forward entries.
    pub fn push(&mut self, location: impl Into<Location>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location.into());
        self.index = self.entries.len() - 1;
    }

    /// Replace the current entry.
    pub fn replace(&mut self, location: impl Into<Location>) {
        self.entries[self.index] = location.into();
    }

    /// Move back one entry. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Move forward one entry. Returns false at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Location::default())
    }
}
