//! Visual directives: a pure projection of shelf state for the renderer
//!
//! The renderer subscribes to these snapshots and does all actual animation
//! itself; nothing here feeds back into navigation.

use std::time::Instant;

use serde::Serialize;

use super::model::ShelfModel;
use super::types::{Direction, RowMode, Slot};
use super::windower::Windower;
use crate::constants::layout;

/// One on-screen tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleTile {
    /// Position in the displayed sequence.
    pub position: usize,
    /// What the tile shows.
    #[serde(flatten)]
    pub slot: Slot,
    /// The tile holds the selected item.
    pub selected: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelfDirectives {
    /// On-screen tiles in display order.
    pub visible: Vec<VisibleTile>,
    /// Current density.
    pub row_mode: RowMode,
    /// Tiles per row.
    pub columns: usize,
    /// Square tile edge length (px).
    pub tile_edge: f32,
    /// Shelf height (px).
    pub shelf_height: f32,
    /// 0-based page of the current window.
    pub page: usize,
    /// Pages in the displayed sequence, at least one.
    pub page_count: usize,
    /// PREV would move.
    pub can_prev: bool,
    /// NEXT would move.
    pub can_next: bool,
    /// PREV arrow is mid-bounce.
    pub bouncing_prev: bool,
    /// NEXT arrow is mid-bounce.
    pub bouncing_next: bool,
    /// A real item is selected, so the edit command is available.
    pub edit_enabled: bool,
}

/// Shelf height for a viewport width: `min(720, 0.9 × width)`.
pub fn shelf_height(viewport_width: f32) -> f32 {
    (viewport_width.max(0.0) * layout::SHELF_HEIGHT_RATIO)
        .min(layout::MAX_SHELF_HEIGHT)
}

/// Tile edge that fits both the column width and the stacked rows.
pub fn tile_edge(
    tile_width: f32,
    tile_spacing: f32,
    shelf_height: f32,
    row_mode: RowMode,
) -> f32 {
    let rows = row_mode.rows() as f32;
    let per_row = (shelf_height - tile_spacing * (rows - 1.0)) / rows;
    tile_width.min(per_row).max(0.0)
}

/// Project the model into the directives for the frame at `now`.
pub fn directives(model: &ShelfModel, now: Instant) -> ShelfDirectives {
    let state = model.state();
    let config = model.config();
    let slots = model.visible_slots();
    let offset = state.scroll_offset();
    let total = state.display_len();
    let selected = state.selected_index();

    let range = model.visible_range();
    let visible = range
        .clone()
        .zip(state.slots(range))
        .map(|(position, slot)| VisibleTile {
            position,
            selected: slot.logical_index().is_some()
                && slot.logical_index() == selected,
            slot,
        })
        .collect();

    let height = shelf_height(model.viewport().width);

    ShelfDirectives {
        visible,
        row_mode: state.row_mode(),
        columns: model.windower().columns(),
        tile_edge: tile_edge(
            config.tile_width(),
            config.tile_spacing(),
            height,
            state.row_mode(),
        ),
        shelf_height: height,
        page: Windower::page_of(offset, total, slots),
        page_count: Windower::page_count(total, slots),
        can_prev: offset > 0,
        can_next: offset.saturating_add(slots) < total,
        bouncing_prev: model.is_bouncing(Direction::Prev, now),
        bouncing_next: model.is_bouncing(Direction::Next, now),
        edit_enabled: selected.is_some(),
    }
}

impl ShelfModel {
    /// Shorthand for [`directives`].
    pub fn directives(&self, now: Instant) -> ShelfDirectives {
        directives(self, now)
    }
}
