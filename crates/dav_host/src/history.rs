//! Browser history and document-chrome contracts.

use std::{cell::RefCell, rc::Rc};

/// Browser history capability consumed by navigation.
///
/// Implementations never expose the history stack; navigation only reads the current entry and
/// pushes new ones.
pub trait BrowserHistory {
    /// Path of the current history entry (`location.pathname`).
    fn current_path(&self) -> String;

    /// Pushes a new history entry bound to `path`.
    fn push_path(&self, path: &str);

    /// Sets the document title.
    fn set_title(&self, title: &str);
}

#[derive(Debug, Default)]
struct MemoryHistoryState {
    entries: Vec<String>,
    title: String,
}

#[derive(Debug, Clone)]
/// In-memory history used by tests and non-browser hosts.
pub struct MemoryHistory {
    state: Rc<RefCell<MemoryHistoryState>>,
}

impl MemoryHistory {
    /// Starts a history whose only entry is `initial_path`.
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(MemoryHistoryState {
                entries: vec![initial_path.into()],
                title: String::new(),
            })),
        }
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.state.borrow().entries.clone()
    }

    /// Current document title.
    pub fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    /// Simulates the user pressing back: drops the newest entry, keeping at least one.
    pub fn back(&self) {
        let mut state = self.state.borrow_mut();
        if state.entries.len() > 1 {
            state.entries.pop();
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl BrowserHistory for MemoryHistory {
    fn current_path(&self) -> String {
        self.state
            .borrow()
            .entries
            .last()
            .cloned()
            .unwrap_or_else(|| "/".to_string())
    }

    fn push_path(&self, path: &str) {
        self.state.borrow_mut().entries.push(path.to_string());
    }

    fn set_title(&self, title: &str) {
        self.state.borrow_mut().title = title.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_history_push_and_back() {
        let history = MemoryHistory::new("/a/");
        history.push_path("/a/b/");
        assert_eq!(history.current_path(), "/a/b/");

        history.back();
        history.back();
        assert_eq!(history.current_path(), "/a/");
        assert_eq!(history.entries(), vec!["/a/".to_string()]);
    }
}
