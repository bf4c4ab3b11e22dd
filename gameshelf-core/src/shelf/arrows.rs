//! Arrow controller: page-by-page navigation with bounce feedback
//!
//! Navigation and feedback are independent. The offset is recomputed on
//! every activation, however rapid; the bounce only restarts its own timer.

use std::time::{Duration, Instant};

use super::timer::{TimerKind, TimerRequest, TimerToken, TokenSource};
use super::types::Direction;
use crate::constants::arrows;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounce {
    token: TimerToken,
    until: Instant,
}

/// Result of one arrow activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowOutcome {
    /// Offset after the step.
    pub offset: usize,
    /// False at a bound; the bounce still plays.
    pub moved: bool,
    /// Deadline that ends this arrow's bounce.
    pub bounce: TimerRequest,
}

/// Page stepping plus per-arrow bounce state.
#[derive(Debug, Clone)]
pub struct ArrowController {
    bounce_duration: Duration,
    prev: Option<Bounce>,
    next: Option<Bounce>,
    tokens: TokenSource,
}

impl Default for ArrowController {
    fn default() -> Self {
        Self::new(Duration::from_millis(arrows::BOUNCE_MS))
    }
}

impl ArrowController {
    /// Controller whose bounces last `bounce_duration`.
    pub fn new(bounce_duration: Duration) -> Self {
        Self {
            bounce_duration,
            prev: None,
            next: None,
            tokens: TokenSource::default(),
        }
    }

    /// Target offset for one page step. NEXT is allowed while the next page
    /// holds at least one slot, so the final page may be short.
    pub fn target_offset(
        direction: Direction,
        offset: usize,
        total: usize,
        visible_slots: usize,
    ) -> usize {
        let step = visible_slots.max(1);
        match direction {
            Direction::Prev => offset.saturating_sub(step),
            Direction::Next => {
                let candidate = offset.saturating_add(step);
                if candidate < total { candidate } else { offset }
            }
        }
    }

    /// Page in `direction` and (re)start that arrow's bounce.
    pub fn activate(
        &mut self,
        direction: Direction,
        offset: usize,
        total: usize,
        visible_slots: usize,
        now: Instant,
    ) -> ArrowOutcome {
        let target =
            Self::target_offset(direction, offset, total, visible_slots);
        let token = self.tokens.issue();
        let until = now + self.bounce_duration;
        *self.slot_mut(direction) = Some(Bounce { token, until });

        if target == offset {
            log::debug!("Arrow {direction:?} at bound (offset {offset})");
        }

        ArrowOutcome {
            offset: target,
            moved: target != offset,
            bounce: TimerRequest {
                kind: TimerKind::Bounce(direction),
                token,
                deadline: until,
            },
        }
    }

    /// The arrow's bounce is still playing at `now`.
    pub fn is_bouncing(&self, direction: Direction, now: Instant) -> bool {
        self.slot(direction).is_some_and(|b| now < b.until)
    }

    /// Bounce timer expiry. Returns true if the bounce was cleared; tokens
    /// from earlier activations of the same arrow are ignored.
    pub fn bounce_expired(
        &mut self,
        direction: Direction,
        token: TimerToken,
    ) -> bool {
        let slot = self.slot_mut(direction);
        if slot.is_some_and(|b| b.token == token) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Clear any bounce whose animation window has passed.
    pub fn tick(&mut self, now: Instant) {
        for direction in [Direction::Prev, Direction::Next] {
            let slot = self.slot_mut(direction);
            if slot.is_some_and(|b| now >= b.until) {
                *slot = None;
            }
        }
    }

    /// Drop all feedback state (unmount).
    pub fn reset(&mut self) {
        self.prev = None;
        self.next = None;
    }

    fn slot(&self, direction: Direction) -> Option<Bounce> {
        match direction {
            Direction::Prev => self.prev,
            Direction::Next => self.next,
        }
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut Option<Bounce> {
        match direction {
            Direction::Prev => &mut self.prev,
            Direction::Next => &mut self.next,
        }
    }
}
