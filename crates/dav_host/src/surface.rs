//! Rendering capabilities the runtime draws onto.

use crate::Entry;

/// Rendering capability the listing is drawn onto.
pub trait ListSurface {
    /// Toggles the loading indicator.
    fn set_loading(&self, loading: bool);
    /// Removes every rendered row.
    fn clear(&self);
    /// Appends a row for `entry`.
    fn append(&self, entry: &Entry);
}

#[derive(Debug, Clone, Copy, Default)]
/// Surface that renders nothing.
pub struct NoopListSurface;

impl ListSurface for NoopListSurface {
    fn set_loading(&self, _loading: bool) {}

    fn clear(&self) {}

    fn append(&self, _entry: &Entry) {}
}

/// Focus capability over the rendered rows, in rendered order.
pub trait FocusSurface {
    /// Number of rendered rows.
    fn row_count(&self) -> usize;
    /// Index of the row holding focus (directly or within), if any.
    fn focused_row(&self) -> Option<usize>;
    /// Moves focus to row `index`.
    fn focus_row(&self, index: usize);
}
