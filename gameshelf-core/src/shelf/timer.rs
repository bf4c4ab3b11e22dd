//! Timer tokens
//!
//! Every deadline the engine asks for is tagged with a [`TimerToken`]. A
//! token is only honoured while the state that issued it is still current,
//! so an expiry that arrives after its contact ended (or after the bounce was
//! re-armed) is ignored by construction.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::types::Direction;

/// Opaque handle identifying one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Numeric value, for logs.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// What a timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Long-press threshold of the active contact.
    LongPress,
    /// End of the bounce animation on one arrow.
    Bounce(Direction),
}

/// A deadline the host must report back through
/// [`crate::ShelfModel::timer_fired`] once it passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    /// What the timer is for.
    pub kind: TimerKind,
    /// Echo this back on expiry.
    pub token: TimerToken,
    /// When the timer should fire.
    pub deadline: Instant,
}

/// Monotonic token source. Tokens are never reused within one source.
#[derive(Debug, Default, Clone)]
pub(crate) struct TokenSource {
    next: u64,
}

impl TokenSource {
    pub(crate) fn issue(&mut self) -> TimerToken {
        self.next = self.next.wrapping_add(1);
        TimerToken(self.next)
    }
}
