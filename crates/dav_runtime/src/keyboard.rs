//! Arrow-key focus movement across rendered listing rows.

use std::rc::Rc;

use dav_host::FocusSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Keys the navigator reacts to.
pub enum NavKey {
    /// `ArrowUp`.
    Up,
    /// `ArrowDown`.
    Down,
}

impl NavKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            _ => None,
        }
    }
}

/// Row that should receive focus after `key`, or `None` when focus stays put.
///
/// With nothing focused, `Down` selects the first row and `Up` does nothing. Movement stops at
/// either end; there is no wraparound.
pub fn next_focus(key: NavKey, focused: Option<usize>, rows: usize) -> Option<usize> {
    if rows == 0 {
        return None;
    }
    match (key, focused) {
        (NavKey::Down, None) => Some(0),
        (NavKey::Up, None) => None,
        (NavKey::Down, Some(index)) => index.checked_add(1).filter(|next| *next < rows),
        (NavKey::Up, Some(index)) => index.checked_sub(1).filter(|prev| *prev < rows),
    }
}

#[derive(Clone)]
/// Moves focus between listing rows on ArrowUp/ArrowDown.
pub struct KeyboardNavigator {
    surface: Rc<dyn FocusSurface>,
}

impl KeyboardNavigator {
    /// Creates a navigator over `surface`.
    pub fn new(surface: Rc<dyn FocusSurface>) -> Self {
        Self { surface }
    }

    /// Handles a key press and reports whether it was consumed.
    ///
    /// Both arrow keys are consumed even when focus cannot move, so the caller suppresses the
    /// browser's default scrolling for them.
    pub fn handle_key(&self, key: &str) -> bool {
        let Some(key) = NavKey::from_key(key) else {
            return false;
        };
        if let Some(index) = next_focus(key, self.surface.focused_row(), self.surface.row_count())
        {
            self.surface.focus_row(index);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use pretty_assertions::assert_eq;

    use super::*;

    struct Rows {
        count: usize,
        focused: Cell<Option<usize>>,
        focus_calls: RefCell<Vec<usize>>,
    }

    impl Rows {
        fn new(count: usize, focused: Option<usize>) -> Rc<Self> {
            Rc::new(Self {
                count,
                focused: Cell::new(focused),
                focus_calls: RefCell::new(Vec::new()),
            })
        }
    }

    impl FocusSurface for Rows {
        fn row_count(&self) -> usize {
            self.count
        }

        fn focused_row(&self) -> Option<usize> {
            self.focused.get()
        }

        fn focus_row(&self, index: usize) {
            self.focused.set(Some(index));
            self.focus_calls.borrow_mut().push(index);
        }
    }

    #[test]
    fn next_focus_table() {
        let cases = [
            (NavKey::Down, None, 3, Some(0)),
            (NavKey::Up, None, 3, None),
            (NavKey::Down, Some(0), 3, Some(1)),
            (NavKey::Down, Some(2), 3, None),
            (NavKey::Up, Some(2), 3, Some(1)),
            (NavKey::Up, Some(0), 3, None),
            (NavKey::Down, None, 0, None),
        ];

        for (key, focused, rows, expected) in cases {
            assert_eq!(
                next_focus(key, focused, rows),
                expected,
                "key={key:?} focused={focused:?} rows={rows}"
            );
        }
    }

    #[test]
    fn arrow_down_walks_rows_and_stops_at_the_end() {
        let rows = Rows::new(2, None);
        let navigator = KeyboardNavigator::new(rows.clone());

        assert!(navigator.handle_key("ArrowDown"));
        assert!(navigator.handle_key("ArrowDown"));
        assert!(navigator.handle_key("ArrowDown"));

        assert_eq!(*rows.focus_calls.borrow(), vec![0, 1]);
        assert_eq!(rows.focused.get(), Some(1));
    }

    #[test]
    fn arrow_up_without_focus_is_consumed_but_does_nothing() {
        let rows = Rows::new(3, None);
        let navigator = KeyboardNavigator::new(rows.clone());

        assert!(navigator.handle_key("ArrowUp"));
        assert!(rows.focus_calls.borrow().is_empty());
    }

    #[test]
    fn other_keys_are_not_consumed() {
        let rows = Rows::new(3, Some(1));
        let navigator = KeyboardNavigator::new(rows.clone());

        assert!(!navigator.handle_key("Enter"));
        assert!(!navigator.handle_key("ArrowLeft"));
        assert!(rows.focus_calls.borrow().is_empty());
    }
}
