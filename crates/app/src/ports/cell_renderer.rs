//! Cell renderer port — the display surface the monitor draws on.

use std::sync::Arc;

use dmxmon_domain::cell::{CellLabel, CellUpdate};

/// A display surface made of one cell per DMX channel.
///
/// The monitor creates every cell exactly once, in channel order, and keeps
/// the returned handles. After that it only restyles cells through
/// [`render`](Self::render); cells are never recreated or reordered.
pub trait CellRenderer {
    /// Handle to a created cell.
    type Cell;

    /// Append a new, blank cell for `label` and return its handle.
    fn create_cell(&self, label: CellLabel) -> Self::Cell;

    /// Apply `update` to a previously created cell.
    fn render(&self, cell: &Self::Cell, update: &CellUpdate);
}

impl<T: CellRenderer> CellRenderer for Arc<T> {
    type Cell = T::Cell;

    fn create_cell(&self, label: CellLabel) -> Self::Cell {
        (**self).create_cell(label)
    }

    fn render(&self, cell: &Self::Cell, update: &CellUpdate) {
        (**self).render(cell, update);
    }
}
