//! Message dispatch for the shelf
//!
//! Both the tokio runtime and headless hosts feed events through [`update`],
//! so there is a single place where messages turn into model calls.

use std::time::Instant;

use super::messages::ShelfMessage;
use super::model::ShelfModel;
use super::timer::TimerRequest;
use super::types::ShelfSignal;

/// Side effects of one message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOutcome {
    /// Outward signals, in order.
    pub signals: Vec<ShelfSignal>,
    /// Deadlines the host must arm.
    pub timers: Vec<TimerRequest>,
    /// The shelf was unmounted by this message.
    pub unmounted: bool,
}

impl UpdateOutcome {
    fn signal(signal: Option<ShelfSignal>) -> Self {
        Self {
            signals: signal.into_iter().collect(),
            ..Self::default()
        }
    }

    fn timer(request: TimerRequest) -> Self {
        Self {
            timers: vec![request],
            ..Self::default()
        }
    }
}

/// Apply one message to `model` at `now`.
pub fn update(
    model: &mut ShelfModel,
    message: ShelfMessage,
    now: Instant,
) -> UpdateOutcome {
    match message {
        ShelfMessage::ContactStart { target, x, y } => {
            UpdateOutcome::timer(model.contact_start(target, (x, y), now))
        }
        ShelfMessage::ContactMove { x, y } => {
            UpdateOutcome::signal(model.contact_move((x, y), now))
        }
        ShelfMessage::ContactEnd => UpdateOutcome::signal(model.contact_end(now)),
        ShelfMessage::ContactCancel => {
            model.contact_cancel();
            UpdateOutcome::default()
        }
        ShelfMessage::Navigate(direction) => {
            let navigation = model.navigate(direction, now);
            UpdateOutcome::timer(navigation.bounce)
        }
        ShelfMessage::SetCollection { items, add_slot } => {
            model.set_collection_with(items, add_slot);
            UpdateOutcome::default()
        }
        ShelfMessage::SetRowMode(mode) => {
            model.set_row_mode(mode);
            UpdateOutcome::default()
        }
        ShelfMessage::SetViewport { width, height } => {
            model.set_viewport(width, height);
            UpdateOutcome::default()
        }
        ShelfMessage::ClearSelection => {
            model.clear_selection();
            UpdateOutcome::default()
        }
        ShelfMessage::TimerExpired { kind, token } => {
            UpdateOutcome::signal(model.timer_fired(kind, token, now))
        }
        ShelfMessage::Tick => UpdateOutcome::signal(model.poll(now)),
        ShelfMessage::Unmount => {
            model.unmount();
            UpdateOutcome {
                unmounted: true,
                ..UpdateOutcome::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShelfConfig;
    use crate::shelf::gesture::GestureTarget;
    use crate::shelf::model::ShelfOptions;
    use crate::shelf::timer::TimerKind;
    use crate::shelf::types::{Direction, RowMode};
    use std::time::Duration;

    fn model() -> ShelfModel {
        let config = ShelfConfig {
            columns: Some(4),
            ..ShelfConfig::default()
        };
        ShelfModel::new(ShelfOptions::new(["a", "b", "c"], RowMode::One), config)
    }

    #[test]
    fn contact_start_requests_long_press_timer() {
        let mut m = model();
        let t0 = Instant::now();
        let out = update(
            &mut m,
            ShelfMessage::ContactStart {
                target: GestureTarget::Tile(0),
                x: 1.0,
                y: 1.0,
            },
            t0,
        );
        assert!(out.signals.is_empty());
        assert_eq!(out.timers.len(), 1);
        assert_eq!(out.timers[0].kind, TimerKind::LongPress);

        let req = out.timers[0];
        let out = update(
            &mut m,
            ShelfMessage::TimerExpired {
                kind: req.kind,
                token: req.token,
            },
            t0 + Duration::from_millis(500),
        );
        assert_eq!(out.signals, vec![ShelfSignal::ItemLongPressed(0)]);
    }

    #[test]
    fn navigate_requests_bounce_timer() {
        let mut m = model();
        let out = update(
            &mut m,
            ShelfMessage::Navigate(Direction::Next),
            Instant::now(),
        );
        assert_eq!(out.timers[0].kind, TimerKind::Bounce(Direction::Next));
    }

    #[test]
    fn unmount_is_reported() {
        let mut m = model();
        let out = update(&mut m, ShelfMessage::Unmount, Instant::now());
        assert!(out.unmounted);
    }
}
