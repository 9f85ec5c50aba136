//! Display cells — one per DMX channel — and how a value is styled.
//!
//! A cell shows a channel value as text on a gray background whose
//! darkness follows the value: `0` is white, `255` is black. Text turns
//! white once the value is above [`WHITE_TEXT_THRESHOLD`].

use std::fmt;

use serde::{Serialize, Serializer};

use crate::channel::MAX_CHANNEL_VALUE;

/// Values strictly above this get white text.
pub const WHITE_TEXT_THRESHOLD: i32 = 90;

/// Static description of a cell, fixed when the cell is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLabel {
    index: usize,
}

impl CellLabel {
    /// Label for the 0-based channel `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// 1-based channel number shown to the user.
    #[must_use]
    pub const fn number(self) -> usize {
        self.index + 1
    }

    /// Hover title, e.g. `Channel 12`.
    #[must_use]
    pub fn title(self) -> String {
        format!("Channel {}", self.number())
    }
}

/// A CSS colour as produced by the cell styling rules.
///
/// `Gray` is not clamped: an out-of-range channel value produces an
/// out-of-range component, exactly as computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
    Gray(i64),
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => f.write_str("#ffffff"),
            Self::Black => f.write_str("#000000"),
            Self::Gray(level) => write!(f, "rgb({level},{level},{level})"),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A change to apply to one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellUpdate {
    /// Show a received value.
    Value {
        value: i32,
        background: Color,
        foreground: Color,
    },
    /// No data for this channel: blank text on a white background.
    /// The foreground colour is left as it was.
    Cleared,
}

impl CellUpdate {
    /// Background used for cleared cells.
    pub const CLEARED_BACKGROUND: Color = Color::White;

    /// Style a received channel value.
    #[must_use]
    pub fn for_value(value: i32) -> Self {
        let remaining = i64::from(MAX_CHANNEL_VALUE) - i64::from(value);
        let foreground = if value > WHITE_TEXT_THRESHOLD {
            Color::White
        } else {
            Color::Black
        };
        Self::Value {
            value,
            background: Color::Gray(remaining),
            foreground,
        }
    }

    /// Text the cell displays after this update (empty when cleared).
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Value { value, .. } => value.to_string(),
            Self::Cleared => String::new(),
        }
    }

    /// Background colour the cell has after this update.
    #[must_use]
    pub fn background(&self) -> Color {
        match self {
            Self::Value { background, .. } => *background,
            Self::Cleared => Self::CLEARED_BACKGROUND,
        }
    }

    /// Foreground colour set by this update, `None` when it is left unchanged.
    #[must_use]
    pub fn foreground(&self) -> Option<Color> {
        match self {
            Self::Value { foreground, .. } => Some(*foreground),
            Self::Cleared => None,
        }
    }
}
