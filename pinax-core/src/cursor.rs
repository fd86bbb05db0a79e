//! SD directory cursor
//!
//! The panel shows six file names at a time, addressed downward from the
//! cursor. Paging moves the cursor in steps of five so adjacent windows
//! overlap by one entry, as the panel personality expects.

/// Entries the cursor moves per page request
const PAGE_STEP: u16 = 5;

/// Cursor into the flat SD directory listing
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCursor {
    index: u16,
}

impl FileCursor {
    /// Create a cursor at the first entry
    pub fn new() -> Self {
        Self { index: 0 }
    }

    /// Current cursor position
    pub fn index(&self) -> u16 {
        self.index
    }

    /// Point at the newest entry after a fresh directory load
    pub fn reset(&mut self, file_count: u16) {
        self.index = file_count.max(1) - 1;
    }

    /// Move the window up; only moves while a full step stays in range
    pub fn page_up(&mut self, file_count: u16) {
        if file_count > PAGE_STEP && self.index.saturating_add(PAGE_STEP) < file_count {
            self.index += PAGE_STEP;
        }
    }

    /// Move the window down; only moves once a full step above zero
    pub fn page_down(&mut self, file_count: u16) {
        if file_count > PAGE_STEP && self.index >= PAGE_STEP {
            self.index -= PAGE_STEP;
        }
    }

    /// Resolve a slot key from the panel into a file index
    ///
    /// Slot 0 is the cursor itself, slot 1 the entry below it, and so on.
    /// Keys past the cursor are invalid and yield `None`.
    pub fn select(&self, key: u8) -> Option<u16> {
        let key = key as u16;
        if self.index.wrapping_add(10).wrapping_sub(key) >= 10 {
            Some(self.index.wrapping_sub(key))
        } else {
            None
        }
    }
}
