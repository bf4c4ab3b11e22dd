//! Headless replay of a script against a [`ShelfModel`]
//!
//! Time is simulated: every requested timer is serviced at its deadline
//! before any later script event, so a replay is deterministic.

use std::time::{Duration, Instant};

use gameshelf_core::shelf::update;
use gameshelf_core::{
    ShelfDirectives, ShelfMessage, ShelfModel, ShelfSignal, TimerRequest,
};
use serde::Serialize;

use crate::script::ScriptEvent;

/// A signal and the simulated time it was emitted at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRecord {
    pub t_ms: u64,
    #[serde(flatten)]
    pub signal: ShelfSignal,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub signals: Vec<SignalRecord>,
    pub directives: ShelfDirectives,
}

pub struct Replay {
    model: ShelfModel,
    base: Instant,
    timers: Vec<TimerRequest>,
    signals: Vec<SignalRecord>,
}

impl Replay {
    pub fn new(model: ShelfModel) -> Self {
        Self {
            model,
            base: Instant::now(),
            timers: Vec::new(),
            signals: Vec::new(),
        }
    }

    pub fn run(mut self, events: Vec<ScriptEvent>) -> ReplayReport {
        let mut end = self.base;
        for event in events {
            let at = self.base + Duration::from_millis(event.t_ms);
            self.fire_due(at);
            self.apply(event.message, at);
            end = at;
        }
        self.fire_due(end);

        ReplayReport {
            signals: self.signals,
            directives: self.model.directives(end),
        }
    }

    fn fire_due(&mut self, until: Instant) {
        self.timers.sort_by_key(|request| request.deadline);
        let due = self
            .timers
            .iter()
            .take_while(|request| request.deadline <= until)
            .count();
        let fired: Vec<TimerRequest> = self.timers.drain(..due).collect();
        for request in fired {
            log::debug!("Servicing {:?} timer", request.kind);
            self.apply(
                ShelfMessage::TimerExpired {
                    kind: request.kind,
                    token: request.token,
                },
                request.deadline,
            );
        }
    }

    fn apply(&mut self, message: ShelfMessage, at: Instant) {
        let outcome = update(&mut self.model, message, at);
        self.timers.extend(outcome.timers);
        let t_ms = self.elapsed_ms(at);
        self.signals.extend(
            outcome
                .signals
                .into_iter()
                .map(|signal| SignalRecord { t_ms, signal }),
        );
    }

    fn elapsed_ms(&self, at: Instant) -> u64 {
        u64::try_from(at.duration_since(self.base).as_millis())
            .unwrap_or(u64::MAX)
    }
}
