//! In-memory display surface for the monitor.

use std::sync::{PoisonError, RwLock};

use serde::Serialize;

use dmxmon_app::ports::CellRenderer;
use dmxmon_domain::cell::{CellLabel, CellUpdate, Color};

/// What one cell currently shows.
///
/// Colours are `None` until the first update sets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    /// 1-based channel number.
    pub channel: usize,
    /// Hover title (`Channel N`).
    pub title: String,
    /// Displayed value, empty when cleared.
    pub text: String,
    pub background: Option<Color>,
    pub foreground: Option<Color>,
}

impl CellView {
    fn blank(label: CellLabel) -> Self {
        Self {
            channel: label.number(),
            title: label.title(),
            text: String::new(),
            background: None,
            foreground: None,
        }
    }

    fn apply(&mut self, update: &CellUpdate) {
        self.text = update.text();
        self.background = Some(update.background());
        if let Some(foreground) = update.foreground() {
            self.foreground = Some(foreground);
        }
    }
}

/// Cell grid shared between the monitor task and HTTP handlers.
#[derive(Debug, Default)]
pub struct GridRenderer {
    cells: RwLock<Vec<CellView>>,
}

impl GridRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every cell, in channel order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CellView> {
        self.cells
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CellRenderer for GridRenderer {
    type Cell = usize;

    fn create_cell(&self, label: CellLabel) -> usize {
        let mut cells = self.cells.write().unwrap_or_else(PoisonError::into_inner);
        cells.push(CellView::blank(label));
        cells.len() - 1
    }

    fn render(&self, cell: &usize, update: &CellUpdate) {
        let mut cells = self.cells.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(view) = cells.get_mut(*cell) {
            view.apply(update);
        }
    }
}
