//! Gesture detector: tap vs. sustained press
//!
//! One pointer contact at a time. A contact resolves into at most one
//! [`Gesture`]: a select on release, a long-press once the threshold passes
//! while still down, or nothing if the pointer drifted past the drag
//! tolerance first. Nothing survives past the end of a contact except the
//! token counter.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::timer::{TimerKind, TimerRequest, TimerToken, TokenSource};
use crate::constants::gesture;

/// What sits under the initial contact point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureTarget {
    /// Position in the displayed sequence (real tiles and the add slot).
    Tile(usize),
    /// Shelf background, between or around tiles.
    Background,
}

/// A classified contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Short contact released in place.
    Select(GestureTarget),
    /// Contact held past the threshold.
    LongPress(GestureTarget),
}

impl Gesture {
    /// Where the contact started.
    pub fn target(&self) -> GestureTarget {
        match self {
            Gesture::Select(target) | Gesture::LongPress(target) => *target,
        }
    }
}

/// Classification thresholds.
#[derive(Debug, Clone, Copy)]
pub struct GestureConfig {
    /// Hold time that makes a long-press.
    pub long_press: Duration,
    /// Travel (px) that cancels the contact.
    pub drag_tolerance: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press: Duration::from_millis(gesture::LONG_PRESS_MS),
            drag_tolerance: gesture::DRAG_TOLERANCE_PX,
        }
    }
}

/// Per-contact state; discarded once the contact ends.
#[derive(Debug, Clone, Copy)]
struct GestureSample {
    token: TimerToken,
    target: GestureTarget,
    start_time: Instant,
    origin: (f32, f32),
    cancelled: bool,
    long_press_fired: bool,
}

/// Coarse detector state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// No contact.
    Idle,
    /// In contact and still unresolved.
    Active,
    /// Still in contact, but already resolved or cancelled.
    Settled,
}

/// Classifies one pointer contact at a time.
#[derive(Debug, Default, Clone)]
pub struct GestureDetector {
    config: GestureConfig,
    active: Option<GestureSample>,
    tokens: TokenSource,
}

impl GestureDetector {
    /// Idle detector with `config`.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            active: None,
            tokens: TokenSource::default(),
        }
    }

    /// Thresholds in use.
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Current phase.
    pub fn phase(&self) -> GesturePhase {
        match &self.active {
            None => GesturePhase::Idle,
            Some(s) if s.cancelled || s.long_press_fired => {
                GesturePhase::Settled
            }
            Some(_) => GesturePhase::Active,
        }
    }

    /// Token of the contact whose long-press timer is still meaningful.
    pub fn pending_long_press(&self) -> Option<TimerToken> {
        self.active
            .filter(|s| !s.cancelled && !s.long_press_fired)
            .map(|s| s.token)
    }

    /// Begin a contact and return the long-press deadline to arm.
    ///
    /// A previous contact that never saw its release is dropped silently.
    pub fn contact_start(
        &mut self,
        target: GestureTarget,
        position: (f32, f32),
        now: Instant,
    ) -> TimerRequest {
        if let Some(stale) = self.active.take() {
            log::debug!(
                "Contact {:?} superseded before release",
                stale.token
            );
        }
        let token = self.tokens.issue();
        self.active = Some(GestureSample {
            token,
            target,
            start_time: now,
            origin: position,
            cancelled: false,
            long_press_fired: false,
        });
        TimerRequest {
            kind: TimerKind::LongPress,
            token,
            deadline: now + self.config.long_press,
        }
    }

    /// Track pointer travel. Returns a long-press if the threshold elapsed
    /// before this movement was observed.
    pub fn contact_move(
        &mut self,
        position: (f32, f32),
        now: Instant,
    ) -> Option<Gesture> {
        if let Some(gesture) = self.poll(now) {
            return Some(gesture);
        }
        let tolerance = self.config.drag_tolerance;
        let sample = self.active.as_mut()?;
        if sample.cancelled || sample.long_press_fired {
            return None;
        }
        let dx = position.0 - sample.origin.0;
        let dy = position.1 - sample.origin.1;
        if (dx * dx + dy * dy).sqrt() > tolerance {
            log::debug!("Contact {:?} became a drag", sample.token);
            sample.cancelled = true;
        }
        None
    }

    /// Release the contact and classify it.
    pub fn contact_end(&mut self, now: Instant) -> Option<Gesture> {
        let sample = self.active.take()?;
        if sample.cancelled || sample.long_press_fired {
            return None;
        }
        let held = now.saturating_duration_since(sample.start_time);
        if held >= self.config.long_press {
            // The timer was not serviced in time; the press still counts.
            Some(Gesture::LongPress(sample.target))
        } else {
            Some(Gesture::Select(sample.target))
        }
    }

    /// Long-press timer expiry. Tokens from finished or superseded contacts
    /// are ignored.
    pub fn timer_fired(
        &mut self,
        token: TimerToken,
        now: Instant,
    ) -> Option<Gesture> {
        if self.active.map(|s| s.token) != Some(token) {
            log::debug!("Ignoring stale long-press timer {token:?}");
            return None;
        }
        self.poll(now)
    }

    /// Fire the long-press if the threshold has elapsed. Useful for hosts
    /// that drive the engine from a frame tick instead of timers.
    pub fn poll(&mut self, now: Instant) -> Option<Gesture> {
        let threshold = self.config.long_press;
        let sample = self.active.as_mut()?;
        if sample.cancelled || sample.long_press_fired {
            return None;
        }
        if now.saturating_duration_since(sample.start_time) < threshold {
            return None;
        }
        sample.long_press_fired = true;
        Some(Gesture::LongPress(sample.target))
    }

    /// Abandon the current contact without emitting anything.
    pub fn cancel(&mut self) {
        if let Some(sample) = self.active.take() {
            log::debug!("Contact {:?} cancelled", sample.token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> GestureDetector {
        GestureDetector::new(GestureConfig {
            long_press: Duration::from_millis(500),
            drag_tolerance: 10.0,
        })
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn short_contact_selects() {
        let mut d = detector();
        let t0 = Instant::now();
        let req = d.contact_start(GestureTarget::Tile(2), (0.0, 0.0), t0);
        assert_eq!(req.kind, TimerKind::LongPress);
        assert_eq!(req.deadline, t0 + ms(500));
        assert_eq!(d.phase(), GesturePhase::Active);
        assert_eq!(
            d.contact_end(t0 + ms(120)),
            Some(Gesture::Select(GestureTarget::Tile(2)))
        );
        assert_eq!(d.phase(), GesturePhase::Idle);
    }

    #[test]
    fn timer_fires_long_press_and_suppresses_select() {
        let mut d = detector();
        let t0 = Instant::now();
        let req = d.contact_start(GestureTarget::Tile(1), (0.0, 0.0), t0);
        assert_eq!(
            d.timer_fired(req.token, req.deadline),
            Some(Gesture::LongPress(GestureTarget::Tile(1)))
        );
        assert_eq!(d.phase(), GesturePhase::Settled);
        assert_eq!(d.pending_long_press(), None);
        assert_eq!(d.contact_end(t0 + ms(900)), None);
    }

    #[test]
    fn release_after_threshold_without_timer_is_long_press() {
        let mut d = detector();
        let t0 = Instant::now();
        d.contact_start(GestureTarget::Tile(0), (0.0, 0.0), t0);
        assert_eq!(
            d.contact_end(t0 + ms(500)),
            Some(Gesture::LongPress(GestureTarget::Tile(0)))
        );
    }

    #[test]
    fn stale_timer_after_release_is_ignored() {
        let mut d = detector();
        let t0 = Instant::now();
        let req = d.contact_start(GestureTarget::Tile(3), (0.0, 0.0), t0);
        assert!(d.contact_end(t0 + ms(50)).is_some());
        assert_eq!(d.timer_fired(req.token, t0 + ms(500)), None);
    }

    #[test]
    fn timer_from_superseded_contact_is_ignored() {
        let mut d = detector();
        let t0 = Instant::now();
        let first = d.contact_start(GestureTarget::Tile(3), (0.0, 0.0), t0);
        let second =
            d.contact_start(GestureTarget::Tile(4), (0.0, 0.0), t0 + ms(100));
        assert_ne!(first.token, second.token);
        assert_eq!(d.timer_fired(first.token, t0 + ms(500)), None);
        assert_eq!(
            d.timer_fired(second.token, t0 + ms(600)),
            Some(Gesture::LongPress(GestureTarget::Tile(4)))
        );
    }

    #[test]
    fn early_timer_does_not_fire() {
        let mut d = detector();
        let t0 = Instant::now();
        let req = d.contact_start(GestureTarget::Tile(0), (0.0, 0.0), t0);
        assert_eq!(d.timer_fired(req.token, t0 + ms(499)), None);
        assert_eq!(d.pending_long_press(), Some(req.token));
    }

    #[test]
    fn drag_cancels_both_outcomes() {
        let mut d = detector();
        let t0 = Instant::now();
        let req = d.contact_start(GestureTarget::Tile(0), (0.0, 0.0), t0);
        assert_eq!(d.contact_move((6.0, 6.0), t0 + ms(20)), None);
        assert_eq!(d.phase(), GesturePhase::Active);
        assert_eq!(d.contact_move((12.0, 0.0), t0 + ms(40)), None);
        assert_eq!(d.phase(), GesturePhase::Settled);
        assert_eq!(d.timer_fired(req.token, t0 + ms(500)), None);
        assert_eq!(d.contact_end(t0 + ms(700)), None);
    }

    #[test]
    fn movement_after_threshold_reports_long_press() {
        let mut d = detector();
        let t0 = Instant::now();
        d.contact_start(GestureTarget::Tile(5), (0.0, 0.0), t0);
        assert_eq!(
            d.contact_move((50.0, 0.0), t0 + ms(600)),
            Some(Gesture::LongPress(GestureTarget::Tile(5)))
        );
        assert_eq!(d.contact_end(t0 + ms(700)), None);
    }

    #[test]
    fn cancel_discards_contact() {
        let mut d = detector();
        let t0 = Instant::now();
        let req = d.contact_start(GestureTarget::Background, (0.0, 0.0), t0);
        d.cancel();
        assert_eq!(d.phase(), GesturePhase::Idle);
        assert_eq!(d.timer_fired(req.token, t0 + ms(500)), None);
        assert_eq!(d.contact_end(t0 + ms(10)), None);
    }
}
