//! Shelf constants
//!
//! Compiled defaults for layout, gesture classification and arrow feedback.
//! [`crate::ShelfConfig`] overrides any of these at runtime; tuning should
//! happen here so every shelf picks up the same feel.

/// Tile geometry and shelf sizing.
pub mod layout {
    /// Base tile width (px) used to derive the column count from the viewport.
    pub const TILE_WIDTH: f32 = 160.0;
    /// Gap between neighbouring tiles (px), both horizontally and vertically.
    pub const TILE_SPACING: f32 = 16.0;
    /// The shelf never grows taller than this (px).
    pub const MAX_SHELF_HEIGHT: f32 = 720.0;
    /// Shelf height as a fraction of viewport width when narrower than the cap.
    pub const SHELF_HEIGHT_RATIO: f32 = 0.9;
    /// Upper bound on the column count, pinned or derived.
    pub const MAX_COLUMNS: usize = 1024;
    /// Viewport assumed until the host reports a real one.
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    /// Viewport height assumed until the host reports a real one.
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 800.0;
}

/// Pointer gesture classification.
pub mod gesture {
    /// Contact held at least this long (ms) is a long-press instead of a tap.
    pub const LONG_PRESS_MS: u64 = 500;
    /// Pointer travel (px) beyond which a contact is treated as a drag and
    /// produces neither a select nor a long-press.
    pub const DRAG_TOLERANCE_PX: f32 = 10.0;
}

/// Directional arrow feedback.
pub mod arrows {
    /// Length of the bounce animation played on every arrow activation (ms).
    pub const BOUNCE_MS: u64 = 400;
}
