//! Windower: density-aware paging over the displayed sequence
//!
//! The shelf shows `columns × rows` slots at a time. The scroll offset is a
//! slot index (the first visible slot), not a pixel position, so paging and
//! re-clamping are exact integer arithmetic.

use std::ops::Range;

use super::types::RowMode;
use crate::constants::layout;

/// Column count plus the paging arithmetic built on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Windower {
    columns: usize,
}

impl Default for Windower {
    fn default() -> Self {
        Self::from_viewport(
            layout::DEFAULT_VIEWPORT_WIDTH,
            layout::TILE_WIDTH,
            layout::TILE_SPACING,
        )
    }
}

impl Windower {
    /// Windower with a fixed column count, clamped to
    /// `1..=layout::MAX_COLUMNS`.
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.clamp(1, layout::MAX_COLUMNS),
        }
    }

    /// Windower whose column count is derived from the viewport width.
    pub fn from_viewport(
        viewport_width: f32,
        tile_width: f32,
        tile_spacing: f32,
    ) -> Self {
        Self::new(Self::columns_for_width(
            viewport_width,
            tile_width,
            tile_spacing,
        ))
    }

    /// Count of fully visible columns: floor((width + s) / (w + s)), min 1.
    pub fn columns_for_width(
        viewport_width: f32,
        tile_width: f32,
        tile_spacing: f32,
    ) -> usize {
        let w = tile_width.max(1.0);
        let s = tile_spacing.max(0.0);
        let stride = (w + s).max(1.0);
        let raw = ((viewport_width.max(0.0) + s) / stride).floor() as usize;
        raw.clamp(1, layout::MAX_COLUMNS)
    }

    /// Tiles per row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Tiles visible at once for the given density.
    pub fn visible_slots(&self, row_mode: RowMode) -> usize {
        self.columns.saturating_mul(row_mode.rows())
    }

    /// Index range of the on-screen window. Short near the end, never padded.
    pub fn visible_range(
        offset: usize,
        total: usize,
        visible_slots: usize,
    ) -> Range<usize> {
        let start = offset.min(total);
        let end = start.saturating_add(visible_slots).min(total);
        start..end
    }

    /// The on-screen sub-sequence of `items`.
    pub fn visible_slice<T>(
        items: &[T],
        offset: usize,
        visible_slots: usize,
    ) -> &[T] {
        &items[Self::visible_range(offset, items.len(), visible_slots)]
    }

    /// Largest offset that still fills a whole window.
    pub fn max_offset(total: usize, visible_slots: usize) -> usize {
        total.saturating_sub(visible_slots)
    }

    /// Clamp to `[0, max(0, total - visible_slots)]`.
    pub fn clamp_offset(
        offset: usize,
        total: usize,
        visible_slots: usize,
    ) -> usize {
        offset.min(Self::max_offset(total, visible_slots))
    }

    /// 0-based page of the window starting at `offset`. Unaligned offsets
    /// round up to the page they scroll into; the window that reaches the
    /// end of the sequence is always the last page.
    pub fn page_of(offset: usize, total: usize, visible_slots: usize) -> usize {
        let last = Self::page_count(total, visible_slots) - 1;
        if offset.saturating_add(visible_slots) >= total {
            return last;
        }
        offset.div_ceil(visible_slots.max(1)).min(last)
    }

    /// Pages needed for `total` slots, at least one.
    pub fn page_count(total: usize, visible_slots: usize) -> usize {
        total.div_ceil(visible_slots.max(1)).max(1)
    }
}
