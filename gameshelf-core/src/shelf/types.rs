//! Shared types for the shelf engine

use serde::{Deserialize, Serialize};

/// Number of tile rows rendered at once.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(from = "RowModeRepr", into = "u8")]
pub enum RowMode {
    /// A single row.
    #[default]
    One = 1,
    /// Two stacked rows.
    Two = 2,
}

impl RowMode {
    /// Every supported density.
    pub const ALL: [Self; 2] = [Self::One, Self::Two];

    /// Rows on screen.
    pub fn rows(self) -> usize {
        self as usize
    }

    /// Lenient conversion; unsupported densities fall back to a single row.
    pub fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::One,
            2 => Self::Two,
            other => {
                log::warn!(
                    "Unsupported row mode {other}, falling back to one row"
                );
                Self::One
            }
        }
    }

    /// Parse `1`/`2`/`one`/`two` (case-insensitive), falling back to one row.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "1" | "one" => Self::One,
            "2" | "two" => Self::Two,
            _ => {
                log::warn!(
                    "Unrecognized row mode {trimmed:?}, falling back to one row"
                );
                Self::One
            }
        }
    }

    /// Numeric form used in config files.
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

impl From<RowMode> for u8 {
    fn from(mode: RowMode) -> Self {
        mode.to_u8()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RowModeRepr {
    Number(u64),
    Text(String),
}

impl From<RowModeRepr> for RowMode {
    fn from(repr: RowModeRepr) -> Self {
        match repr {
            RowModeRepr::Number(n) => {
                RowMode::from_u8(u8::try_from(n).unwrap_or(u8::MAX))
            }
            RowModeRepr::Text(s) => RowMode::parse(&s),
        }
    }
}

impl std::fmt::Display for RowMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "Single row"),
            Self::Two => write!(f, "Double row"),
        }
    }
}

/// Directional arrow on either side of the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards the start.
    Prev,
    /// Towards the end.
    Next,
}

/// One entry of the displayed sequence.
///
/// The add slot is a distinct variant rather than a reserved resource value,
/// so every consumer has to handle it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Slot {
    /// A host item.
    Real {
        /// Logical index into the host collection.
        index: usize,
        /// Resource reference, as supplied.
        resource: String,
    },
    /// The trailing "add new" slot.
    AddSlot,
}

impl Slot {
    /// Logical index into the host collection, `None` for the add slot.
    pub fn logical_index(&self) -> Option<usize> {
        match self {
            Slot::Real { index, .. } => Some(*index),
            Slot::AddSlot => None,
        }
    }
}

/// Outward signals. These three are the whole host contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "signal", content = "index", rename_all = "snake_case")]
pub enum ShelfSignal {
    /// A real item was selected.
    ItemSelected(usize),
    /// A real item was long-pressed.
    ItemLongPressed(usize),
    /// The add slot was selected.
    AddRequested,
}

/// What a long-press on a real tile does to the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongPressPolicy {
    /// Select the pressed tile, then report the long-press.
    #[default]
    SelectAndNotify,
    /// Report the long-press and leave the selection untouched.
    NotifyOnly,
}

/// Receiver for outward signals.
///
/// Long-press handling is optional; the other two callbacks are required.
pub trait ShelfHost {
    /// A real item was selected.
    fn item_selected(&mut self, index: usize);

    /// A real item was long-pressed.
    fn item_long_pressed(&mut self, index: usize) {
        let _ = index;
    }

    /// The add slot was selected.
    fn add_requested(&mut self);

    /// Route a signal to the matching callback.
    fn dispatch(&mut self, signal: ShelfSignal) {
        match signal {
            ShelfSignal::ItemSelected(index) => self.item_selected(index),
            ShelfSignal::ItemLongPressed(index) => {
                self.item_long_pressed(index)
            }
            ShelfSignal::AddRequested => self.add_requested(),
        }
    }
}
