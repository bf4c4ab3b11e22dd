//! Discrete UI events accepted by the shelf

use super::gesture::GestureTarget;
use super::timer::{TimerKind, TimerToken};
use super::types::{Direction, RowMode};

/// Input to [`crate::shelf::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShelfMessage {
    // Pointer
    /// Pointer down.
    ContactStart {
        /// What lies under the pointer.
        target: GestureTarget,
        /// Pointer x (px).
        x: f32,
        /// Pointer y (px).
        y: f32,
    },
    /// Pointer moved to a new position.
    ContactMove {
        /// Pointer x (px).
        x: f32,
        /// Pointer y (px).
        y: f32,
    },
    /// Pointer up.
    ContactEnd,
    /// Pointer capture lost.
    ContactCancel,

    // Arrows
    /// Arrow activated.
    Navigate(Direction),

    // Host updates
    /// Replace the collection wholesale.
    SetCollection {
        /// Resource references in collection order.
        items: Vec<String>,
        /// Append the add slot.
        add_slot: bool,
    },
    /// Density changed.
    SetRowMode(RowMode),
    /// Viewport resized.
    SetViewport {
        /// Width (px).
        width: f32,
        /// Height (px).
        height: f32,
    },
    /// Host dropped the selection.
    ClearSelection,

    // Timing
    /// A requested timer reached its deadline.
    TimerExpired {
        /// Kind from the request.
        kind: TimerKind,
        /// Token from the request.
        token: TimerToken,
    },
    /// Frame tick for hosts that do not arm timers.
    Tick,

    /// Tear the shelf down; pending timers become inert.
    Unmount,
}
