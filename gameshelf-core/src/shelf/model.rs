//! ShelfModel: the authoritative shelf state and its public contract
//!
//! The model owns the collection, density, scroll offset and selection, and
//! composes the windower, gesture detector and arrow controller. Every entry
//! point runs synchronously for one UI event and returns whatever outward
//! signal (and timer request) that event produced.

use std::ops::Range;
use std::time::Instant;

use super::arrows::ArrowController;
use super::gesture::{Gesture, GestureDetector, GestureTarget};
use super::timer::{TimerKind, TimerRequest, TimerToken};
use super::types::{Direction, LongPressPolicy, RowMode, ShelfSignal, Slot};
use super::windower::Windower;
use crate::config::ShelfConfig;
use crate::constants::layout;

/// Construction parameters supplied by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ShelfOptions {
    /// Resource references, in the host's collection order.
    pub items: Vec<String>,
    /// Initial density.
    pub row_mode: RowMode,
    /// Viewport width (px).
    pub viewport_width: f32,
    /// Viewport height (px).
    pub viewport_height: f32,
    /// Append the trailing add slot.
    pub add_slot: bool,
}

impl ShelfOptions {
    /// Options for `items` with the default viewport and an add slot.
    pub fn new<I, S>(items: I, row_mode: RowMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            row_mode,
            viewport_width: layout::DEFAULT_VIEWPORT_WIDTH,
            viewport_height: layout::DEFAULT_VIEWPORT_HEIGHT,
            add_slot: true,
        }
    }

    /// Set the initial viewport.
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Leave out the trailing add slot.
    pub fn without_add_slot(mut self) -> Self {
        self.add_slot = false;
        self
    }
}

/// Single source of truth for one rendered shelf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShelfState {
    collection: Vec<String>,
    add_slot: bool,
    row_mode: RowMode,
    /// Always a real item; the add slot is never selected.
    selected_index: Option<usize>,
    scroll_offset: usize,
}

impl ShelfState {
    /// The host's resource references (no add slot).
    pub fn items(&self) -> &[String] {
        &self.collection
    }

    /// The add slot is displayed.
    pub fn has_add_slot(&self) -> bool {
        self.add_slot
    }

    /// Current density.
    pub fn row_mode(&self) -> RowMode {
        self.row_mode
    }

    /// Logical index of the selected item.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// First visible display position.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Length of the displayed sequence, add slot included.
    pub fn display_len(&self) -> usize {
        self.collection.len() + usize::from(self.add_slot)
    }

    /// Slot at a position of the displayed sequence.
    pub fn slot_at(&self, position: usize) -> Option<Slot> {
        match self.collection.get(position) {
            Some(resource) => Some(Slot::Real {
                index: position,
                resource: resource.clone(),
            }),
            None if self.add_slot && position == self.collection.len() => {
                Some(Slot::AddSlot)
            }
            None => None,
        }
    }

    /// Slots for a range of displayed positions (out-of-range ends dropped).
    pub fn slots(&self, range: Range<usize>) -> Vec<Slot> {
        range.filter_map(|position| self.slot_at(position)).collect()
    }
}

/// Last viewport size reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width (px).
    pub width: f32,
    /// Height (px).
    pub height: f32,
}

/// Result of [`ShelfModel::navigate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    /// Offset after the step.
    pub offset: usize,
    /// False at a bound.
    pub moved: bool,
    /// The new on-screen slice.
    pub visible: Vec<Slot>,
    /// Bounce deadline to arm.
    pub bounce: TimerRequest,
}

/// One mounted shelf.
#[derive(Debug, Clone)]
pub struct ShelfModel {
    state: ShelfState,
    config: ShelfConfig,
    viewport: Viewport,
    windower: Windower,
    gestures: GestureDetector,
    arrows: ArrowController,
    policy: LongPressPolicy,
}

impl ShelfModel {
    /// Mount a shelf.
    pub fn new(options: ShelfOptions, config: ShelfConfig) -> Self {
        let viewport = Viewport {
            width: options.viewport_width,
            height: options.viewport_height,
        };
        let mut model = Self {
            state: ShelfState {
                collection: options.items,
                add_slot: options.add_slot,
                row_mode: options.row_mode,
                selected_index: None,
                scroll_offset: 0,
            },
            windower: Self::windower_for(&config, viewport.width),
            viewport,
            gestures: GestureDetector::new(config.gesture_config()),
            arrows: ArrowController::new(config.bounce_duration()),
            policy: config.long_press_policy(),
            config,
        };
        model.reclamp();
        log::debug!(
            "Shelf mounted: {} items, {:?}, {} columns",
            model.state.collection.len(),
            model.state.row_mode,
            model.windower.columns()
        );
        model
    }

    fn windower_for(config: &ShelfConfig, viewport_width: f32) -> Windower {
        match config.columns() {
            Some(columns) => Windower::new(columns),
            None => Windower::from_viewport(
                viewport_width,
                config.tile_width(),
                config.tile_spacing(),
            ),
        }
    }

    /// Read-only state.
    pub fn state(&self) -> &ShelfState {
        &self.state
    }

    /// Configuration in use.
    pub fn config(&self) -> &ShelfConfig {
        &self.config
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current windower.
    pub fn windower(&self) -> Windower {
        self.windower
    }

    /// Current long-press policy.
    pub fn long_press_policy(&self) -> LongPressPolicy {
        self.policy
    }

    /// Change the long-press policy.
    pub fn set_long_press_policy(&mut self, policy: LongPressPolicy) {
        self.policy = policy;
    }

    /// Slots per page at the current density.
    pub fn visible_slots(&self) -> usize {
        self.windower.visible_slots(self.state.row_mode)
    }

    /// Display positions currently on screen.
    pub fn visible_range(&self) -> Range<usize> {
        Windower::visible_range(
            self.state.scroll_offset,
            self.state.display_len(),
            self.visible_slots(),
        )
    }

    /// The on-screen slots, in display order.
    pub fn visible_slice(&self) -> Vec<Slot> {
        self.state.slots(self.visible_range())
    }

    // ========== HOST UPDATES ==========

    /// Replace the collection, keeping the add slot.
    pub fn set_collection<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_collection_with(items, true);
    }

    /// Replace the collection wholesale.
    ///
    /// Any in-flight contact is abandoned so its long-press timer can no
    /// longer fire. The selection survives if its index still exists.
    pub fn set_collection_with<I, S>(&mut self, items: I, add_slot: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gestures.cancel();
        self.state.collection = items.into_iter().map(Into::into).collect();
        self.state.add_slot = add_slot;

        if let Some(selected) = self.state.selected_index
            && selected >= self.state.collection.len()
        {
            log::debug!(
                "Selection {selected} no longer present after collection \
                 replace ({} items), clearing",
                self.state.collection.len()
            );
            self.state.selected_index = None;
        }

        self.reclamp();
        log::debug!(
            "Collection replaced: {} items, offset {}",
            self.state.collection.len(),
            self.state.scroll_offset
        );
    }

    /// Change density. The offset is re-clamped, not reset.
    pub fn set_row_mode(&mut self, mode: RowMode) {
        if self.state.row_mode == mode {
            return;
        }
        log::debug!("Row mode {:?} -> {:?}", self.state.row_mode, mode);
        self.state.row_mode = mode;
        self.reclamp();
    }

    /// Report a new viewport size. Columns are re-derived unless pinned by
    /// configuration; the offset is re-clamped like a density change.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport { width, height };
        let windower = Self::windower_for(&self.config, width);
        if windower != self.windower {
            log::debug!(
                "Columns changed from {} to {} for width {width}",
                self.windower.columns(),
                windower.columns()
            );
            self.windower = windower;
            self.reclamp();
        }
    }

    /// Restore a previously saved scroll position, clamped to the window.
    pub fn restore_scroll_offset(&mut self, offset: usize) {
        self.state.scroll_offset = offset;
        self.reclamp();
    }

    /// Drop the selection. Idempotent.
    pub fn clear_selection(&mut self) {
        self.state.selected_index = None;
    }

    fn reclamp(&mut self) {
        let before = self.state.scroll_offset;
        let after = Windower::clamp_offset(
            before,
            self.state.display_len(),
            self.visible_slots(),
        );
        if after != before {
            log::debug!("Scroll offset re-clamped {before} -> {after}");
            self.state.scroll_offset = after;
        }
    }

    // ========== POINTER INPUT ==========

    /// Pointer down. The returned long-press deadline must be reported back
    /// through [`ShelfModel::timer_fired`].
    pub fn contact_start(
        &mut self,
        target: GestureTarget,
        position: (f32, f32),
        now: Instant,
    ) -> TimerRequest {
        self.gestures.contact_start(target, position, now)
    }

    /// Pointer moved.
    pub fn contact_move(
        &mut self,
        position: (f32, f32),
        now: Instant,
    ) -> Option<ShelfSignal> {
        let gesture = self.gestures.contact_move(position, now)?;
        self.on_tile_activated(gesture)
    }

    /// Pointer up.
    pub fn contact_end(&mut self, now: Instant) -> Option<ShelfSignal> {
        let gesture = self.gestures.contact_end(now)?;
        self.on_tile_activated(gesture)
    }

    /// Abandon the current contact (pointer capture lost, window blurred).
    pub fn contact_cancel(&mut self) {
        self.gestures.cancel();
    }

    /// Token of the long-press timer that may still fire, if any.
    pub fn pending_long_press(&self) -> Option<TimerToken> {
        self.gestures.pending_long_press()
    }

    /// A requested timer has expired. Stale tokens are ignored.
    pub fn timer_fired(
        &mut self,
        kind: TimerKind,
        token: TimerToken,
        now: Instant,
    ) -> Option<ShelfSignal> {
        match kind {
            TimerKind::LongPress => {
                let gesture = self.gestures.timer_fired(token, now)?;
                self.on_tile_activated(gesture)
            }
            TimerKind::Bounce(direction) => {
                self.arrows.bounce_expired(direction, token);
                None
            }
        }
    }

    /// Frame-driven alternative to timers: resolve a due long-press and
    /// clear finished bounces.
    pub fn poll(&mut self, now: Instant) -> Option<ShelfSignal> {
        self.arrows.tick(now);
        let gesture = self.gestures.poll(now)?;
        self.on_tile_activated(gesture)
    }

    /// Route a classified gesture.
    pub fn on_tile_activated(
        &mut self,
        gesture: Gesture,
    ) -> Option<ShelfSignal> {
        let position = match gesture.target() {
            GestureTarget::Tile(position) => position,
            GestureTarget::Background => {
                if let Gesture::Select(_) = gesture {
                    self.clear_selection();
                }
                return None;
            }
        };

        let Some(slot) = self.state.slot_at(position) else {
            log::debug!("Gesture on position {position} outside the shelf");
            return None;
        };

        match (gesture, slot) {
            (Gesture::Select(_), Slot::AddSlot) => {
                Some(ShelfSignal::AddRequested)
            }
            // The add slot has no secondary action.
            (Gesture::LongPress(_), Slot::AddSlot) => None,
            (Gesture::Select(_), Slot::Real { index, .. }) => {
                self.state.selected_index = Some(index);
                Some(ShelfSignal::ItemSelected(index))
            }
            (Gesture::LongPress(_), Slot::Real { index, .. }) => {
                if self.policy == LongPressPolicy::SelectAndNotify {
                    self.state.selected_index = Some(index);
                }
                Some(ShelfSignal::ItemLongPressed(index))
            }
        }
    }

    // ========== ARROWS ==========

    /// Page in `direction`. At a bound the offset stays put but the arrow
    /// still bounces.
    pub fn navigate(&mut self, direction: Direction, now: Instant) -> Navigation {
        let outcome = self.arrows.activate(
            direction,
            self.state.scroll_offset,
            self.state.display_len(),
            self.visible_slots(),
            now,
        );
        self.state.scroll_offset = outcome.offset;
        Navigation {
            offset: outcome.offset,
            moved: outcome.moved,
            visible: self.visible_slice(),
            bounce: outcome.bounce,
        }
    }

    /// The arrow is mid-bounce at `now`.
    pub fn is_bouncing(&self, direction: Direction, now: Instant) -> bool {
        self.arrows.is_bouncing(direction, now)
    }

    /// Tear down: no timer issued so far can affect state afterwards.
    pub fn unmount(&mut self) {
        self.gestures.cancel();
        self.arrows.reset();
        log::debug!("Shelf unmounted");
    }
}
